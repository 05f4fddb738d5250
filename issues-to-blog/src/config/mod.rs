//! Run configuration.
//!
//! Credentials and identity overrides come from the environment, blog
//! settings from an optional `issues-to-blog.toml`. Both are resolved once at
//! startup and passed around as values.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{BlogSettings, DEFAULT_SETTINGS_FILE};

use std::path::{Path, PathBuf};

/// Token variables, checked in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["PERSONAL_ACCESS_TOKEN", "GITHUB_TOKEN"];

/// Overrides the commit author name.
pub const VIEWER_NAME_ENV: &str = "VIEWER_NAME";

/// Overrides the commit author email.
pub const VIEWER_EMAIL_ENV: &str = "VIEWER_EMAIL";

/// Configuration for a single run.
#[derive(Clone)]
pub struct BlogConfig {
    /// GitHub token used for the API and for pushing.
    token: String,
    /// Commit author name override.
    viewer_name: Option<String>,
    /// Commit author email override.
    viewer_email: Option<String>,
    /// Whether generated files are committed and pushed.
    push: bool,
    /// Whether to only report what would be written.
    dry_run: bool,
    /// Settings file chosen on the command line.
    settings_path: Option<PathBuf>,
}

impl std::fmt::Debug for BlogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogConfig")
            .field("token", &"<redacted>")
            .field("viewer_name", &self.viewer_name)
            .field("viewer_email", &self.viewer_email)
            .field("push", &self.push)
            .field("dry_run", &self.dry_run)
            .field("settings_path", &self.settings_path)
            .finish()
    }
}

impl BlogConfig {
    /// Creates a configuration from explicit values.
    pub fn new(token: String, push: bool) -> Self {
        Self {
            token,
            viewer_name: None,
            viewer_email: None,
            push,
            dry_run: false,
            settings_path: None,
        }
    }

    /// Reads the token and identity overrides from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if no token variable is set.
    pub fn from_env(push: bool) -> Result<Self, ConfigError> {
        let token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| env_value(name))
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(token, push);
        config.viewer_name = env_value(VIEWER_NAME_ENV);
        config.viewer_email = env_value(VIEWER_EMAIL_ENV);
        Ok(config)
    }

    /// Sets the commit identity overrides.
    pub fn with_viewer(mut self, name: Option<String>, email: Option<String>) -> Self {
        self.viewer_name = name;
        self.viewer_email = email;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets an explicit settings file.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the commit author name override.
    pub fn viewer_name(&self) -> Option<&str> {
        self.viewer_name.as_deref()
    }

    /// Returns the commit author email override.
    pub fn viewer_email(&self) -> Option<&str> {
        self.viewer_email.as_deref()
    }

    /// Returns whether generated files are pushed.
    pub fn push(&self) -> bool {
        self.push
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the explicit settings file, if any.
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
