//! Parsing the origin remote URL.

use super::GitError;
use url::Url;

/// Username GitHub expects when a token is used as an HTTP password.
const TOKEN_USERNAME: &str = "x-access-token";

/// Owner and repository named by a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// Host of the remote, absent for local paths.
    pub host: Option<String>,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name without the `.git` suffix.
    pub name: String,
}

/// Parses `owner` and `name` from a remote URL.
///
/// Accepts URLs with a scheme (`https://github.com/owner/repo.git`,
/// `ssh://git@github.com/owner/repo`) and scp-style SSH remotes
/// (`git@github.com:owner/repo.git`). A trailing `.git` is removed
/// case-insensitively and the remaining path must have exactly two segments.
///
/// # Errors
///
/// Returns [`GitError::InvalidRemoteUrl`] if the path is not `owner/name`.
pub fn parse_remote_url(raw: &str) -> Result<RemoteRepository, GitError> {
    let (host, path) = split_host_and_path(raw);

    let path = path.trim_matches('/');
    let path = strip_suffix_ignore_ascii_case(path, ".git");

    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(RemoteRepository {
            host,
            owner: (*owner).to_string(),
            name: (*name).to_string(),
        }),
        _ => Err(GitError::InvalidRemoteUrl {
            url: raw.to_string(),
            reason: format!("expected an 'owner/name' path, got '{path}'"),
        }),
    }
}

/// Builds the URL used to push with `token` as credentials.
///
/// HTTP(S) remotes get the token as basic-auth password. SSH remotes are
/// rewritten to HTTPS on the same host. Anything else (local paths, `file://`)
/// is returned unchanged.
#[must_use]
pub fn authenticated_push_url(raw: &str, token: &str) -> String {
    if let Ok(mut url) = Url::parse(raw) {
        match url.scheme() {
            "http" | "https" => {
                if url.set_username(TOKEN_USERNAME).is_ok()
                    && url.set_password(Some(token)).is_ok()
                {
                    return url.to_string();
                }
                return raw.to_string();
            }
            "ssh" | "git" => {
                if let Some(host) = url.host_str() {
                    return https_url(host, url.path(), token);
                }
                return raw.to_string();
            }
            _ => return raw.to_string(),
        }
    }

    match split_scp_like(raw) {
        Some((host, path)) => https_url(host, path, token),
        None => raw.to_string(),
    }
}

fn https_url(host: &str, path: &str, token: &str) -> String {
    format!(
        "https://{TOKEN_USERNAME}:{}@{host}/{}",
        encoded_password(token),
        path.trim_start_matches('/')
    )
}

/// Returns `token` as it appears in the userinfo of a URL.
pub(crate) fn encoded_password(token: &str) -> String {
    Url::parse("https://github.com")
        .ok()
        .and_then(|mut url| {
            url.set_password(Some(token)).ok()?;
            url.password().map(str::to_string)
        })
        .unwrap_or_else(|| token.to_string())
}

fn split_host_and_path(raw: &str) -> (Option<String>, String) {
    if let Ok(url) = Url::parse(raw) {
        if url.scheme() != "file" {
            return (url.host_str().map(str::to_string), url.path().to_string());
        }
    }

    match split_scp_like(raw) {
        Some((host, path)) => (Some(host.to_string()), path.to_string()),
        None => (None, raw.to_string()),
    }
}

/// Splits `user@host:path` into host and path.
fn split_scp_like(raw: &str) -> Option<(&str, &str)> {
    let (authority, path) = raw.split_once(':')?;
    if authority.contains('/') || path.starts_with("//") {
        return None;
    }
    let host = authority.rsplit('@').next().unwrap_or(authority);
    Some((host, path))
}

fn strip_suffix_ignore_ascii_case<'a>(text: &'a str, suffix: &str) -> &'a str {
    if text.len() >= suffix.len()
        && text.is_char_boundary(text.len() - suffix.len())
        && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    {
        &text[..text.len() - suffix.len()]
    } else {
        text
    }
}
