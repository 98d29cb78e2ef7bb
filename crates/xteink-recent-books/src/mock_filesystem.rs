//! Mock Filesystem Implementation for tests and simulators
//!
//! Provides a simple in-memory filesystem so the store can run without an SD card.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::filesystem::{dirname, FileSystem, FileSystemError};

/// In-memory file entry
#[derive(Clone)]
enum MockEntry {
    File { content: Vec<u8> },
    Directory,
}

/// Mock filesystem for tests
///
/// Counts writes and can be told to reject them, which lets tests observe
/// whether an operation persisted anything.
pub struct MockFileSystem {
    files: BTreeMap<String, MockEntry>,
    writes: usize,
    fail_writes: bool,
}

impl MockFileSystem {
    /// Create mock filesystem with an SD card style layout
    pub fn new() -> Self {
        let mut fs = Self::empty();
        fs.add_directory("/books");
        fs
    }

    /// Create empty mock filesystem (root directory only)
    pub fn empty() -> Self {
        let mut files = BTreeMap::new();
        files.insert("/".to_string(), MockEntry::Directory);
        Self {
            files,
            writes: 0,
            fail_writes: false,
        }
    }

    /// Add a file, creating missing parent directories
    pub fn add_file(&mut self, path: &str, content: impl AsRef<[u8]>) {
        self.add_directory(dirname(path));
        self.files.insert(
            path.to_string(),
            MockEntry::File {
                content: content.as_ref().to_vec(),
            },
        );
    }

    /// Add a directory and its missing parents
    pub fn add_directory(&mut self, path: &str) {
        let mut current = path;
        while current != "/" && current != "." && !current.is_empty() {
            self.files
                .entry(current.to_string())
                .or_insert(MockEntry::Directory);
            current = dirname(current);
        }
    }

    /// Raw file contents, for assertions
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        match self.files.get(path) {
            Some(MockEntry::File { content }) => Some(content.as_slice()),
            _ => None,
        }
    }

    /// Number of successful `write_file` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Make every following `write_file` fail with a permission error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn is_directory(&self, path: &str) -> bool {
        path == "/" || matches!(self.files.get(path), Some(MockEntry::Directory))
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError> {
        let bytes = self.read_file_bytes(path)?;
        String::from_utf8(bytes).map_err(|_| FileSystemError::IoError("Invalid UTF-8".to_string()))
    }

    fn read_file_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        match self.files.get(path) {
            Some(MockEntry::File { content }) => Ok(content.clone()),
            Some(MockEntry::Directory) => {
                Err(FileSystemError::IoError("Is a directory".to_string()))
            }
            None => Err(FileSystemError::NotFound),
        }
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        if self.fail_writes {
            return Err(FileSystemError::PermissionDenied);
        }
        if !self.is_directory(dirname(path)) {
            return Err(FileSystemError::NotFound);
        }
        if matches!(self.files.get(path), Some(MockEntry::Directory)) {
            return Err(FileSystemError::IoError("Is a directory".to_string()));
        }
        self.files.insert(
            path.to_string(),
            MockEntry::File {
                content: data.to_vec(),
            },
        );
        self.writes += 1;
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FileSystemError> {
        if !self.is_directory(dirname(to)) {
            return Err(FileSystemError::NotFound);
        }
        match self.files.remove(from) {
            Some(entry @ MockEntry::File { .. }) => {
                self.files.insert(to.to_string(), entry);
                Ok(())
            }
            Some(entry) => {
                self.files.insert(from.to_string(), entry);
                Err(FileSystemError::NotSupported)
            }
            None => Err(FileSystemError::NotFound),
        }
    }

    fn make_dir(&mut self, path: &str) -> Result<(), FileSystemError> {
        if matches!(self.files.get(path), Some(MockEntry::File { .. })) {
            return Err(FileSystemError::IoError("Not a directory".to_string()));
        }
        self.add_directory(path);
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
