//! Host directory standing in for the SD card root.
//!
//! Device paths such as `/.crosspoint/recent.json` are mapped below `base_path`,
//! the same way the firmware maps them below its FAT mount point.

use std::fs;
use std::path::Path;

use crate::filesystem::{FileSystem, FileSystemError};

pub struct HostFileSystem {
    base_path: String,
}

impl HostFileSystem {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        let base_path = base_path.as_ref().to_string_lossy().to_string();
        log::info!("[RECENT] host filesystem rooted at {}", base_path);
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn host_path(&self, path: &str) -> String {
        if path == "/" {
            self.base_path.clone()
        } else {
            format!(
                "{}/{}",
                self.base_path.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

fn to_fs_error(err: std::io::Error) -> FileSystemError {
    match err.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied,
        _ => FileSystemError::IoError(format!("{:?}", err)),
    }
}

impl FileSystem for HostFileSystem {
    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError> {
        fs::read_to_string(self.host_path(path)).map_err(to_fs_error)
    }

    fn read_file_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        fs::read(self.host_path(path)).map_err(to_fs_error)
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        fs::write(self.host_path(path), data).map_err(to_fs_error)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FileSystemError> {
        fs::rename(self.host_path(from), self.host_path(to)).map_err(to_fs_error)
    }

    fn make_dir(&mut self, path: &str) -> Result<(), FileSystemError> {
        fs::create_dir_all(self.host_path(path)).map_err(to_fs_error)
    }

    fn exists(&mut self, path: &str) -> bool {
        Path::new(&self.host_path(path)).exists()
    }
}
