//! Recent books registry for the Xteink X4 e-reader.
//! Works on ESP32 and on the desktop.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod filesystem;
pub mod recent;

#[cfg(feature = "std")]
pub mod host_filesystem;

#[cfg(any(test, feature = "std"))]
pub mod mock_filesystem;

pub use config::{Builder as ConfigBuilder, RecentBooksConfig};
pub use error::{ConfigError, RecentBooksError};
pub use filesystem::{FileSystem, FileSystemError};
pub use recent::{
    BookMetadata, FileNameResolver, LoadOutcome, LoadState, MetadataResolver, NoMetadata,
    RecentBook, RecentBooksStore,
};

#[cfg(feature = "std")]
pub use host_filesystem::HostFileSystem;

#[cfg(any(test, feature = "std"))]
pub use mock_filesystem::MockFileSystem;
