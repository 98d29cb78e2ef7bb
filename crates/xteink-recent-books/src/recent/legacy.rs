//! Reader for the binary `recent.bin` layout that predates `recent.json`.
//!
//! ```text
//! [version:u8][count:u8][record]*count
//! string = [len:u32 le][utf-8 bytes]
//! v1 record: path
//! v2 record: path title author
//! v3 record: path title author cover_path
//! ```
//!
//! None of the versions carried progress or reading time.

use alloc::string::String;
use alloc::vec::Vec;

use super::book::RecentBook;
use super::resolver::{BookMetadata, MetadataResolver};
use crate::error::RecentBooksError;

pub const LEGACY_VERSION_PATHS: u8 = 1;
pub const LEGACY_VERSION_TITLES: u8 = 2;
pub const LEGACY_VERSION_COVERS: u8 = 3;

/// One record as stored; `stored` is `None` for version 1 (path only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRecord {
    pub path: String,
    pub stored: Option<BookMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFile {
    pub version: u8,
    pub records: Vec<LegacyRecord>,
}

/// Books recovered from a legacy file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: u8,
    pub books: Vec<RecentBook>,
    /// Records dropped because no title could be found for them
    pub omitted: usize,
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], RecentBooksError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(RecentBooksError::CorruptLegacyFile("unexpected end of file"))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8, RecentBooksError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32_le(&mut self) -> Result<u32, RecentBooksError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_string(&mut self) -> Result<String, RecentBooksError> {
        let len = self.read_u32_le()? as usize;
        let bytes = self.take(len)?;
        core::str::from_utf8(bytes)
            .map(String::from)
            .map_err(|_| RecentBooksError::CorruptLegacyFile("string is not valid UTF-8"))
    }
}

/// Decode a legacy file.
///
/// # Errors
///
/// `UnknownLegacyVersion` for a version tag other than 1-3, and
/// `CorruptLegacyFile` when a record is cut short. Nothing is returned in
/// either case.
pub fn parse(data: &[u8]) -> Result<LegacyFile, RecentBooksError> {
    let mut reader = ByteReader::new(data);
    let version = reader.read_u8()?;
    if !(LEGACY_VERSION_PATHS..=LEGACY_VERSION_COVERS).contains(&version) {
        return Err(RecentBooksError::UnknownLegacyVersion(version));
    }

    let count = reader.read_u8()?;
    let mut records = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let path = reader.read_string()?;
        let stored = match version {
            LEGACY_VERSION_PATHS => None,
            LEGACY_VERSION_TITLES => {
                let title = reader.read_string()?;
                let author = reader.read_string()?;
                Some(BookMetadata::new(title, author, ""))
            }
            _ => {
                let title = reader.read_string()?;
                let author = reader.read_string()?;
                let cover_path = reader.read_string()?;
                Some(BookMetadata::new(title, author, cover_path))
            }
        };
        records.push(LegacyRecord { path, stored });
    }

    Ok(LegacyFile { version, records })
}

/// Turn decoded records into books.
///
/// - v1: metadata comes from the resolver alone.
/// - v2: each resolved field wins when non-empty, else the stored title/author.
/// - v3: stored metadata is used as-is.
///
/// Records that still have no title are counted in `omitted` and skipped.
pub fn migrate(file: LegacyFile, resolver: &mut dyn MetadataResolver) -> Migration {
    let version = file.version;
    let mut books = Vec::with_capacity(file.records.len());
    let mut omitted = 0;

    for record in file.records {
        let metadata = match (version, record.stored) {
            (LEGACY_VERSION_COVERS, Some(stored)) => stored,
            (_, stored) => {
                let resolved = resolver.resolve(&record.path);
                match stored {
                    Some(stored) => BookMetadata::new(
                        or_stored(resolved.title, stored.title),
                        or_stored(resolved.author, stored.author),
                        resolved.cover_path,
                    ),
                    None => resolved,
                }
            }
        };

        if metadata.title.is_empty() {
            log::debug!("[RECENT] legacy entry without title omitted: {}", record.path);
            omitted += 1;
            continue;
        }

        books.push(RecentBook::new(
            record.path,
            metadata.title,
            metadata.author,
            metadata.cover_path,
        ));
    }

    Migration {
        version,
        books,
        omitted,
    }
}

fn or_stored(resolved: String, stored: String) -> String {
    if resolved.is_empty() {
        stored
    } else {
        resolved
    }
}

/// Encode records in the given legacy version. Test fixtures only.
#[cfg(test)]
pub(crate) fn encode(version: u8, records: &[(&str, &str, &str, &str)]) -> Vec<u8> {
    fn push_string(out: &mut Vec<u8>, value: &str) {
        out.extend_from_slice(&(value.len() as u32).to_le_bytes());
        out.extend_from_slice(value.as_bytes());
    }

    let mut out = alloc::vec![version, records.len() as u8];
    for (path, title, author, cover_path) in records {
        push_string(&mut out, path);
        if version >= LEGACY_VERSION_TITLES {
            push_string(&mut out, title);
            push_string(&mut out, author);
        }
        if version >= LEGACY_VERSION_COVERS {
            push_string(&mut out, cover_path);
        }
    }
    out
}
