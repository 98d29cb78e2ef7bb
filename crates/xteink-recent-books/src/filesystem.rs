//! Filesystem abstraction for the recent books store.
//! Backed by the SD card on device, by a host directory on the desktop and by
//! memory in tests.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Filesystem error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    NotFound,
    PermissionDenied,
    IoError(String),
    NotSupported,
}

impl core::fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FileSystemError::NotFound => write!(f, "File not found"),
            FileSystemError::PermissionDenied => write!(f, "Permission denied"),
            FileSystemError::IoError(msg) => write!(f, "IO error: {}", msg),
            FileSystemError::NotSupported => write!(f, "Operation not supported"),
        }
    }
}

impl core::error::Error for FileSystemError {}

/// Storage primitives the store needs.
///
/// Implementations:
/// - `HostFileSystem` for desktop tools (a directory standing in for the SD root)
/// - `MockFileSystem` for tests
pub trait FileSystem {
    /// Read entire file as string
    ///
    /// # Errors
    /// Returns FileSystemError if file not found or read fails
    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError>;

    /// Read entire file as raw bytes
    fn read_file_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError>;

    /// Create or truncate `path` and write `data` to it
    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError>;

    /// Move `from` to `to`, replacing any existing file at `to`
    fn rename(&mut self, from: &str, to: &str) -> Result<(), FileSystemError>;

    /// Create a directory and any missing parents. Existing directories are fine.
    fn make_dir(&mut self, path: &str) -> Result<(), FileSystemError>;

    /// Check if file exists
    fn exists(&mut self, path: &str) -> bool;
}

impl<T: FileSystem + ?Sized> FileSystem for &mut T {
    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError> {
        (**self).read_file(path)
    }

    fn read_file_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        (**self).read_file_bytes(path)
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        (**self).write_file(path, data)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FileSystemError> {
        (**self).rename(from, to)
    }

    fn make_dir(&mut self, path: &str) -> Result<(), FileSystemError> {
        (**self).make_dir(path)
    }

    fn exists(&mut self, path: &str) -> bool {
        (**self).exists(path)
    }
}

/// Check a path against a list of extensions, ignoring ASCII case.
/// Extensions are given with their leading dot (e.g. ".epub").
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    let name = basename(path);
    extensions.iter().any(|ext| {
        name.len() >= ext.len()
            && name.is_char_boundary(name.len() - ext.len())
            && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
    })
}

/// Get filename without path
pub fn basename(path: &str) -> &str {
    path.rfind('/').map(|i| &path[i + 1..]).unwrap_or(path)
}

/// Get parent directory
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Join paths
pub fn join_path(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}
