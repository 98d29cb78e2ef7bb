//! `recent.json` encoding.

use alloc::string::ToString;
use alloc::vec::Vec;

use super::book::{RecentBook, StoredBook};
use crate::error::RecentBooksError;

pub fn encode(books: &[RecentBook]) -> Result<Vec<u8>, RecentBooksError> {
    let records: Vec<StoredBook> = books.iter().map(RecentBook::to_record).collect();
    serde_json::to_vec_pretty(&records).map_err(|err| RecentBooksError::Serialize(err.to_string()))
}

/// Parse the book list, dropping duplicate paths (first wins) and anything
/// past `max_books`.
pub fn decode(json: &str, max_books: usize) -> Result<Vec<RecentBook>, RecentBooksError> {
    let records: Vec<StoredBook> =
        serde_json::from_str(json).map_err(|err| RecentBooksError::Parse(err.to_string()))?;
    let books = records.into_iter().map(RecentBook::from_record).collect();
    Ok(normalize(books, max_books))
}

/// Enforce path uniqueness and capacity on a list read from disk.
pub(crate) fn normalize(books: Vec<RecentBook>, max_books: usize) -> Vec<RecentBook> {
    let mut unique: Vec<RecentBook> = Vec::with_capacity(books.len().min(max_books));
    for book in books {
        if unique.len() == max_books {
            break;
        }
        if !unique.iter().any(|kept| kept.path() == book.path()) {
            unique.push(book);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_records() {
        let books = decode(r#"[{"path":"/a.epub","title":"A"},{"path":"/b.txt"}]"#, 10).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title(), "A");
        assert_eq!(books[0].progress_percent(), None);
        assert_eq!(books[1].author(), "");
        assert_eq!(books[1].metrics_text(), "0h 00m · --");
    }

    #[test]
    fn decode_clamps_and_recomputes() {
        let books = decode(
            r#"[{"path":"/a.epub","title":"A","readTimeSeconds":1800,"readPercent":250,"remainingTimeSeconds":99}]"#,
            10,
        )
        .unwrap();
        assert_eq!(books[0].progress_percent(), Some(100));
        assert_eq!(books[0].remaining_seconds(), Some(0));
        assert_eq!(books[0].metrics_text(), "0h 30m · 0h 00m");
    }

    #[test]
    fn decode_drops_duplicates_and_overflow() {
        let books = decode(
            r#"[{"path":"/a"},{"path":"/b"},{"path":"/a","title":"dup"},{"path":"/c"}]"#,
            2,
        )
        .unwrap();
        let paths: Vec<&str> = books.iter().map(RecentBook::path).collect();
        assert_eq!(paths, ["/a", "/b"]);
        assert_eq!(books[0].title(), "");
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(decode("{", 10), Err(RecentBooksError::Parse(_))));
        assert!(matches!(
            decode(r#"{"path":"/a"}"#, 10),
            Err(RecentBooksError::Parse(_))
        ));
        assert!(matches!(
            decode(r#"[{"title":"no path"}]"#, 10),
            Err(RecentBooksError::Parse(_))
        ));
    }

    #[test]
    fn encode_then_decode_keeps_order() {
        let books = [
            RecentBook::new("/b.epub", "B", "Bob", ""),
            RecentBook::new("/a.epub", "A", "Ann", "/a.bmp"),
        ];
        let json = encode(&books).unwrap();
        let decoded = decode(core::str::from_utf8(&json).unwrap(), 10).unwrap();
        assert_eq!(decoded, books);
    }
}
