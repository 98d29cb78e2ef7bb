//! Store configuration types and builder

use alloc::string::{String, ToString};

pub use crate::error::ConfigError;
use crate::filesystem::join_path;

/// Directory holding the firmware's private state on the SD card
pub const DEFAULT_STATE_DIR: &str = "/.crosspoint";
pub const DEFAULT_JSON_FILE_NAME: &str = "recent.json";
pub const DEFAULT_LEGACY_FILE_NAME: &str = "recent.bin";
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";
/// Maximum number of books kept in the list
pub const DEFAULT_MAX_BOOKS: usize = 10;

/// Store configuration
///
/// Use [`RecentBooksConfig::builder`] to create a non-default config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentBooksConfig {
    /// Directory for `recent.json` and the legacy file
    pub state_dir: String,
    /// Structured file name
    pub json_file_name: String,
    /// Legacy binary file name
    pub legacy_file_name: String,
    /// Appended to the legacy path once it has been migrated
    pub backup_suffix: String,
    /// List capacity
    pub max_books: usize,
}

impl RecentBooksConfig {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn json_path(&self) -> String {
        join_path(&self.state_dir, &self.json_file_name)
    }

    pub fn legacy_path(&self) -> String {
        join_path(&self.state_dir, &self.legacy_file_name)
    }

    pub fn backup_path(&self) -> String {
        let mut path = self.legacy_path();
        path.push_str(&self.backup_suffix);
        path
    }
}

impl Default for RecentBooksConfig {
    fn default() -> Self {
        RecentBooksConfig {
            state_dir: DEFAULT_STATE_DIR.to_string(),
            json_file_name: DEFAULT_JSON_FILE_NAME.to_string(),
            legacy_file_name: DEFAULT_LEGACY_FILE_NAME.to_string(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            max_books: DEFAULT_MAX_BOOKS,
        }
    }
}

/// Builder for constructing store configuration
///
/// # Example
///
/// ```
/// use xteink_recent_books::RecentBooksConfig;
///
/// let config = RecentBooksConfig::builder()
///     .state_dir("/.reader")
///     .max_books(5)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.json_path(), "/.reader/recent.json");
/// ```
#[derive(Default)]
pub struct Builder {
    config: RecentBooksConfig,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.state_dir = dir.into();
        self
    }

    pub fn json_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.json_file_name = name.into();
        self
    }

    pub fn legacy_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.legacy_file_name = name.into();
        self
    }

    pub fn backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.backup_suffix = suffix.into();
        self
    }

    pub fn max_books(mut self, max: usize) -> Self {
        self.config.max_books = max;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the capacity is outside 1..=255, the state
    /// directory is relative, or a file name is empty or contains a slash.
    pub fn build(self) -> Result<RecentBooksConfig, ConfigError> {
        let config = self.config;
        if config.max_books == 0 || config.max_books > usize::from(u8::MAX) {
            return Err(ConfigError::InvalidMaxBooks(config.max_books));
        }
        if !config.state_dir.starts_with('/') {
            return Err(ConfigError::InvalidStateDir(config.state_dir));
        }
        for name in [&config.json_file_name, &config.legacy_file_name] {
            if name.is_empty() || name.contains('/') {
                return Err(ConfigError::InvalidFileName(name.clone()));
            }
        }
        if config.backup_suffix.is_empty() || config.backup_suffix.contains('/') {
            return Err(ConfigError::InvalidFileName(config.backup_suffix));
        }
        Ok(config)
    }
}
