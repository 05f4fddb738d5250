//! Splitting issue text into a front-matter fragment and a post body.

/// Marker bracketing the front-matter fragment inside an issue body.
pub const FENCE: &str = "```";

/// Splits issue text at the first two [`FENCE`] markers.
///
/// Returns `(header, body)` where `header` is the trimmed text between the
/// first two fences and `body` the trimmed text after the second one. Text
/// before the first fence is dropped. Without a complete pair of fences the
/// header is empty and the body is the untouched input.
///
/// Fences are not nested or escaped: any third fence is part of the body.
///
/// # Examples
///
/// ```
/// use issues_to_blog::split_header_and_body;
///
/// let (header, body) = split_header_and_body("intro ```date: x``` rest of post");
/// assert_eq!(header, "date: x");
/// assert_eq!(body, "rest of post");
/// ```
#[must_use]
pub fn split_header_and_body(text: &str) -> (&str, &str) {
    let Some(start) = text.find(FENCE) else {
        return ("", text);
    };

    let header_start = start + FENCE.len();
    let Some(offset) = text[header_start..].find(FENCE) else {
        return ("", text);
    };

    let header_end = header_start + offset;
    let body_start = header_end + FENCE.len();
    (
        text[header_start..header_end].trim(),
        text[body_start..].trim(),
    )
}
