//! Recently opened books with reading progress and time.
//!
//! [`RecentBooksStore`] keeps the most-recently-used list and persists it to
//! `recent.json` after every change. On first boot after an upgrade it
//! migrates the older `recent.bin` layout (see [`legacy`]).

mod book;
pub mod legacy;
pub mod metrics;
mod resolver;
mod storage;
mod store;

pub use book::{RecentBook, StoredBook, UNKNOWN_SENTINEL};
pub use resolver::{
    BookMetadata, FileNameResolver, MetadataResolver, NoMetadata, PLAIN_TEXT_EXTENSIONS,
};
pub use storage::{decode as decode_json, encode as encode_json};
pub use store::{LoadOutcome, LoadState, RecentBooksStore};
