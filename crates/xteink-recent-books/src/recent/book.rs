use alloc::string::String;

use serde::{Deserialize, Serialize};

use super::metrics;

/// On-disk sentinel for an unknown percentage or estimate
pub const UNKNOWN_SENTINEL: i32 = -1;

/// One recently opened book with its reading metrics.
///
/// The display strings are derived from the counters and are refreshed by
/// every constructor and mutator, so they can be handed to the UI as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentBook {
    path: String,
    title: String,
    author: String,
    cover_path: String,
    progress_percent: Option<u8>,
    reading_seconds: u32,
    remaining_seconds: Option<u32>,
    progress_text: String,
    metrics_text: String,
}

impl RecentBook {
    /// Create a book with unknown progress and no reading time
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        cover_path: impl Into<String>,
    ) -> Self {
        let mut book = Self {
            path: path.into(),
            title: title.into(),
            author: author.into(),
            cover_path: cover_path.into(),
            progress_percent: None,
            reading_seconds: 0,
            remaining_seconds: None,
            progress_text: String::new(),
            metrics_text: String::new(),
        };
        book.refresh();
        book
    }

    /// Build a book from a parsed `recent.json` record.
    ///
    /// The stored remaining-time estimate is ignored and recomputed, and an
    /// out-of-range percentage is clamped.
    pub fn from_record(record: StoredBook) -> Self {
        let mut book = Self::new(record.path, record.title, record.author, record.cover_path);
        book.progress_percent = if record.read_percent < 0 {
            None
        } else {
            Some(metrics::clamp_percent(record.read_percent))
        };
        book.reading_seconds = record.read_time_seconds;
        book.refresh();
        book
    }

    pub fn to_record(&self) -> StoredBook {
        StoredBook {
            path: self.path.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            cover_path: self.cover_path.clone(),
            read_time_seconds: self.reading_seconds,
            read_percent: self
                .progress_percent
                .map_or(UNKNOWN_SENTINEL, i32::from),
            remaining_time_seconds: self
                .remaining_seconds
                .map_or(i64::from(UNKNOWN_SENTINEL), i64::from),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn cover_path(&self) -> &str {
        &self.cover_path
    }

    /// Progress in 0..=100, `None` until the reader reports one
    pub fn progress_percent(&self) -> Option<u8> {
        self.progress_percent
    }

    pub fn reading_seconds(&self) -> u32 {
        self.reading_seconds
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    /// `"45%"` or `"--%"`
    pub fn progress_text(&self) -> &str {
        &self.progress_text
    }

    /// `"1h 00m · 1h 00m"`: elapsed, then the estimate or `--`
    pub fn metrics_text(&self) -> &str {
        &self.metrics_text
    }

    /// Elapsed reading time on its own, e.g. `"0h 30m"`
    pub fn reading_time_text(&self) -> String {
        metrics::format_duration(self.reading_seconds)
    }

    pub(crate) fn set_metadata(&mut self, title: &str, author: &str, cover_path: &str) {
        self.title = String::from(title);
        self.author = String::from(author);
        self.cover_path = String::from(cover_path);
    }

    /// Returns `false` when the clamped value equals the current one.
    pub(crate) fn set_progress(&mut self, percent: i32) -> bool {
        let clamped = Some(metrics::clamp_percent(percent));
        if self.progress_percent == clamped {
            return false;
        }
        self.progress_percent = clamped;
        self.refresh();
        true
    }

    /// Saturates at `u32::MAX` rather than wrapping.
    pub(crate) fn add_reading_seconds(&mut self, seconds: u32) {
        self.reading_seconds = self.reading_seconds.saturating_add(seconds);
        self.refresh();
    }

    pub(crate) fn copy_counters_from(&mut self, other: &RecentBook) {
        self.progress_percent = other.progress_percent;
        self.reading_seconds = other.reading_seconds;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.remaining_seconds =
            metrics::remaining_seconds(self.progress_percent, self.reading_seconds);
        self.progress_text = metrics::progress_text(self.progress_percent);
        self.metrics_text = metrics::metrics_text(self.reading_seconds, self.remaining_seconds);
    }
}

fn unknown_sentinel() -> i32 {
    UNKNOWN_SENTINEL
}

fn unknown_estimate() -> i64 {
    i64::from(UNKNOWN_SENTINEL)
}

/// One element of the `recent.json` array.
///
/// Only `path` is required; missing fields take the values a freshly added
/// book would have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBook {
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover_path: String,
    #[serde(default)]
    pub read_time_seconds: u32,
    #[serde(default = "unknown_sentinel")]
    pub read_percent: i32,
    /// Written for other readers of the file, recomputed on load
    #[serde(default = "unknown_estimate")]
    pub remaining_time_seconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_has_placeholder_metrics() {
        let book = RecentBook::new("/a.epub", "Title", "Author", "/c.bmp");
        assert_eq!(book.progress_percent(), None);
        assert_eq!(book.reading_seconds(), 0);
        assert_eq!(book.remaining_seconds(), None);
        assert_eq!(book.progress_text(), "--%");
        assert_eq!(book.metrics_text(), "0h 00m · --");
    }

    #[test]
    fn progress_is_clamped_and_change_detected() {
        let mut book = RecentBook::new("/a.epub", "Title", "", "");
        assert!(book.set_progress(150));
        assert_eq!(book.progress_percent(), Some(100));
        assert!(!book.set_progress(101));
        assert!(book.set_progress(-3));
        assert_eq!(book.progress_percent(), Some(0));
        assert_eq!(book.progress_text(), "0%");
    }

    #[test]
    fn reading_time_saturates() {
        let mut book = RecentBook::new("/a.epub", "Title", "", "");
        book.add_reading_seconds(u32::MAX - 10);
        book.add_reading_seconds(100);
        assert_eq!(book.reading_seconds(), u32::MAX);
    }

    #[test]
    fn record_round_trip_recomputes_estimate() {
        let record = StoredBook {
            path: "/a.epub".into(),
            title: "Title".into(),
            author: "Author".into(),
            cover_path: "/c.bmp".into(),
            read_time_seconds: 3600,
            read_percent: 50,
            remaining_time_seconds: 12,
        };
        let book = RecentBook::from_record(record);
        assert_eq!(book.remaining_seconds(), Some(3600));
        assert_eq!(book.metrics_text(), "1h 00m · 1h 00m");
        assert_eq!(book.to_record().remaining_time_seconds, 3600);
    }

    #[test]
    fn record_sentinels_map_to_unknown() {
        let book = RecentBook::from_record(StoredBook {
            path: "/a.txt".into(),
            title: "a".into(),
            author: String::new(),
            cover_path: String::new(),
            read_time_seconds: 0,
            read_percent: -1,
            remaining_time_seconds: -1,
        });
        assert_eq!(book.progress_percent(), None);

        let record = book.to_record();
        assert_eq!(record.read_percent, -1);
        assert_eq!(record.remaining_time_seconds, -1);
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let book = RecentBook::new("/a.epub", "Title", "Author", "/c.bmp");
        let json = serde_json::to_string(&book.to_record()).unwrap();
        assert_eq!(
            json,
            r#"{"path":"/a.epub","title":"Title","author":"Author","coverPath":"/c.bmp","readTimeSeconds":0,"readPercent":-1,"remainingTimeSeconds":-1}"#
        );
    }
}
