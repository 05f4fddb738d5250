//! Run summary types.

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of labeled issues returned by the API.
    pub issues_fetched: usize,

    /// Number of post files written (or that would be written).
    pub posts_written: usize,

    /// Number of comment records written (or that would be written).
    pub comments_written: usize,

    /// Branch the generated files were pushed to.
    pub pushed_branch: Option<String>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Counts one rendered issue and its comments.
    pub fn record_issue(&mut self, comments: usize) {
        self.posts_written += 1;
        self.comments_written += comments;
    }

    /// Total number of generated files.
    #[must_use]
    pub fn files_written(&self) -> usize {
        self.posts_written + self.comments_written
    }

    /// Returns true if the run pushed a commit.
    #[must_use]
    pub fn pushed(&self) -> bool {
        self.pushed_branch.is_some()
    }
}
