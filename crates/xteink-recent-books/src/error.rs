//! Error types for the recent books store
//!
//! - [`RecentBooksError`] - load, save and migration failures
//! - [`ConfigError`] - rejected [`RecentBooksConfig`](crate::config::RecentBooksConfig) values
//! - [`FileSystemError`] - storage primitive failures, wrapped by `RecentBooksError`

use alloc::string::String;

use crate::filesystem::FileSystemError;

/// Errors that can occur while loading or persisting the recent books list
///
/// None of these leave the in-memory list partially populated: a failed load
/// keeps the previous list, a failed save keeps the mutation that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentBooksError {
    /// Underlying storage failure (read, write, rename, mkdir)
    FileSystem(FileSystemError),
    /// The list could not be encoded as JSON
    Serialize(String),
    /// `recent.json` exists but is not a valid book list
    Parse(String),
    /// Neither `recent.json` nor a legacy `recent.bin` is present
    NotFound,
    /// Legacy file carries a version tag this build does not understand
    UnknownLegacyVersion(u8),
    /// Legacy file ended early or holds invalid strings
    CorruptLegacyFile(&'static str),
}

impl core::fmt::Display for RecentBooksError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecentBooksError::FileSystem(err) => write!(f, "Storage error: {err}"),
            RecentBooksError::Serialize(msg) => write!(f, "Failed to encode recent books: {msg}"),
            RecentBooksError::Parse(msg) => write!(f, "Failed to parse recent books: {msg}"),
            RecentBooksError::NotFound => write!(f, "No recent books file"),
            RecentBooksError::UnknownLegacyVersion(version) => {
                write!(f, "Unknown legacy recent books version {version}")
            }
            RecentBooksError::CorruptLegacyFile(reason) => {
                write!(f, "Corrupt legacy recent books file: {reason}")
            }
        }
    }
}

impl core::error::Error for RecentBooksError {}

impl From<FileSystemError> for RecentBooksError {
    fn from(err: FileSystemError) -> Self {
        RecentBooksError::FileSystem(err)
    }
}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be between 1 and 255 (the legacy count field is a single byte)
    InvalidMaxBooks(usize),
    /// State directory must be an absolute device path
    InvalidStateDir(String),
    /// File names must be non-empty and must not contain '/'
    InvalidFileName(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidMaxBooks(max) => {
                write!(f, "Invalid recent books capacity {max} (expected 1..=255)")
            }
            ConfigError::InvalidStateDir(dir) => {
                write!(f, "State directory must be absolute: {dir:?}")
            }
            ConfigError::InvalidFileName(name) => write!(f, "Invalid file name {name:?}"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn filesystem_errors_convert() {
        let err: RecentBooksError = FileSystemError::PermissionDenied.into();
        assert_eq!(err, RecentBooksError::FileSystem(FileSystemError::PermissionDenied));
        assert_eq!(err.to_string(), "Storage error: Permission denied");
    }

    #[test]
    fn legacy_errors_display() {
        assert_eq!(
            RecentBooksError::UnknownLegacyVersion(9).to_string(),
            "Unknown legacy recent books version 9"
        );
        assert_eq!(
            ConfigError::InvalidMaxBooks(0).to_string(),
            "Invalid recent books capacity 0 (expected 1..=255)"
        );
    }
}
