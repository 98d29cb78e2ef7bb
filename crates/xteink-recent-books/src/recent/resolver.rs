//! Metadata lookup used when a book has to be added without the reader's help.
//!
//! Per-format readers (EPUB, XTC) live outside this crate and plug in through
//! [`MetadataResolver`].

use alloc::string::{String, ToString};

use crate::filesystem::{basename, has_extension};

/// Plain-text formats whose file name doubles as the title
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &[".txt", ".md"];

/// Title, author and cover thumbnail path of a book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub cover_path: String,
}

impl BookMetadata {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        cover_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            cover_path: cover_path.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty()
    }
}

/// Resolves metadata for a book path.
///
/// Failures are reported as empty metadata; the store then refuses to create
/// the entry.
pub trait MetadataResolver {
    fn resolve(&mut self, path: &str) -> BookMetadata;
}

impl<F: FnMut(&str) -> BookMetadata> MetadataResolver for F {
    fn resolve(&mut self, path: &str) -> BookMetadata {
        self(path)
    }
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataResolver for NoMetadata {
    fn resolve(&mut self, _path: &str) -> BookMetadata {
        BookMetadata::default()
    }
}

/// Uses the file name as title for `.txt` / `.md` files.
///
/// Other formats need their reader to parse the container, so they resolve
/// to empty metadata here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNameResolver;

impl MetadataResolver for FileNameResolver {
    fn resolve(&mut self, path: &str) -> BookMetadata {
        if has_extension(path, PLAIN_TEXT_EXTENSIONS) {
            BookMetadata::new(basename(path).to_string(), "", "")
        } else {
            BookMetadata::default()
        }
    }
}
