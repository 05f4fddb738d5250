//! Optional per-blog settings file.

use crate::config::ConfigError;
use bstr::ByteSlice;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Name of the settings file looked up in the working tree root.
pub const DEFAULT_SETTINGS_FILE: &str = "issues-to-blog.toml";

/// Parsed contents of an `issues-to-blog.toml` file.
///
/// Every key is optional; a blog without a settings file gets [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct BlogSettings {
    /// Only open issues carrying this label are mirrored.
    pub label: String,

    /// Message of the commit created by `push`.
    pub commit_message: String,

    /// Branch to push to; the checked-out branch when unset.
    pub branch: Option<String>,

    /// GitHub API root, for GitHub Enterprise hosts.
    pub api_base_url: Option<String>,

    /// Whether posts link to the issue's comment form.
    pub new_comment_anchor: bool,

    /// Handlebars template replacing the built-in post layout.
    pub post_template: Option<PathBuf>,

    /// Handlebars template replacing the built-in comment layout.
    pub comment_template: Option<PathBuf>,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            label: default_label(),
            commit_message: default_commit_message(),
            branch: None,
            api_base_url: None,
            new_comment_anchor: true,
            post_template: None,
            comment_template: None,
        }
    }
}

pub(crate) fn default_label() -> String {
    "post".to_string()
}

pub(crate) fn default_commit_message() -> String {
    "update".to_string()
}

impl BlogSettings {
    /// Loads settings for the working tree at `root`.
    ///
    /// An `explicit` path must exist and is used as given, so a relative one
    /// resolves against the current directory. Without one,
    /// `issues-to-blog.toml` in `root` is used when present and defaults
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => {
                let path = path.to_path_buf();
                if !path.exists() {
                    return Err(ConfigError::MissingFile {
                        path: path.display().to_string(),
                    });
                }
                path
            }
            None => {
                let path = root.join(DEFAULT_SETTINGS_FILE);
                if !path.exists() {
                    debug!(path = %path.display(), "No settings file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::load_file(&path)
    }

    /// Parses and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates the settings loaded from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first invalid key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.label.trim().is_empty() {
            return Err(invalid("label must not be empty".to_string()));
        }

        if self.commit_message.trim().is_empty() {
            return Err(invalid("commit-message must not be empty".to_string()));
        }

        if let Some(branch) = &self.branch {
            let full_name = format!("refs/heads/{branch}");
            gix_validate::reference::name(full_name.as_bytes().as_bstr())
                .map_err(|e| invalid(format!("invalid branch '{branch}': {e}")))?;
        }

        if let Some(api_base_url) = &self.api_base_url {
            Url::parse(api_base_url)
                .map_err(|e| invalid(format!("invalid api-base-url '{api_base_url}': {e}")))?;
        }

        Ok(())
    }

    /// Reads an optional template file, resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or empty.
    pub fn read_template(
        root: &Path,
        template: Option<&Path>,
    ) -> Result<Option<String>, ConfigError> {
        let Some(template) = template else {
            return Ok(None);
        };

        let path = root.join(template);
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "template is empty".to_string(),
            });
        }

        Ok(Some(content))
    }
}
