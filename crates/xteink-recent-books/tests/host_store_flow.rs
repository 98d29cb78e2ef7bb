use std::fs;
use std::path::Path;

use xteink_recent_books::{
    BookMetadata, HostFileSystem, LoadOutcome, LoadState, RecentBooksError, RecentBooksStore,
};

fn legacy_string(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value.as_bytes());
}

fn write_legacy(root: &Path, bytes: &[u8]) {
    fs::create_dir_all(root.join(".crosspoint")).unwrap();
    fs::write(root.join(".crosspoint/recent.bin"), bytes).unwrap();
}

#[test]
fn session_survives_reboot() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    store
        .add_book("/a.epub", "Title", "Author", "/c.bmp")
        .unwrap();
    store.update_progress("/a.epub", 45).unwrap();
    store.add_reading_time("/a.epub", 1800).unwrap();
    drop(store);

    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    assert_eq!(store.load(), Ok(LoadOutcome::Json { count: 1 }));
    let book = store.first().unwrap();
    assert_eq!(book.path(), "/a.epub");
    assert_eq!(book.progress_text(), "45%");
    assert_eq!(book.reading_time_text(), "0h 30m");
    assert_eq!(book.cover_path(), "/c.bmp");
}

#[test]
fn json_layout_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    store.add_book("/b.epub", "B", "Bob", "").unwrap();
    store.update_progress("/b.epub", 50).unwrap();
    store.add_reading_time("/b.epub", 3600).unwrap();

    let raw = fs::read_to_string(dir.path().join(".crosspoint/recent.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "path": "/b.epub",
            "title": "B",
            "author": "Bob",
            "coverPath": "",
            "readTimeSeconds": 3600,
            "readPercent": 50,
            "remainingTimeSeconds": 3600
        }])
    );
}

#[test]
fn legacy_v3_file_is_migrated_and_backed_up() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = vec![3u8, 3];
    for (path, title, author, cover) in [
        ("/books/dune.epub", "Dune", "Frank Herbert", "/.crosspoint/dune.bmp"),
        ("/books/blank.epub", "", "", ""),
        ("/books/emma.epub", "Emma", "Jane Austen", ""),
    ] {
        legacy_string(&mut bytes, path);
        legacy_string(&mut bytes, title);
        legacy_string(&mut bytes, author);
        legacy_string(&mut bytes, cover);
    }
    write_legacy(dir.path(), &bytes);

    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    assert_eq!(
        store.load(),
        Ok(LoadOutcome::Migrated {
            version: 3,
            count: 2,
            omitted: 1,
            persisted: true,
        })
    );

    let state = dir.path().join(".crosspoint");
    assert!(!state.join("recent.bin").exists());
    assert_eq!(fs::read(state.join("recent.bin.bak")).unwrap(), bytes);

    let mut reloaded = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    assert_eq!(reloaded.load(), Ok(LoadOutcome::Json { count: 2 }));
    let titles: Vec<&str> = reloaded.books().iter().map(|book| book.title()).collect();
    assert_eq!(titles, ["Dune", "Emma"]);
    assert_eq!(reloaded.first().unwrap().metrics_text(), "0h 00m · --");
}

#[test]
fn legacy_v2_uses_resolver_then_stored_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = vec![2u8, 2];
    for (path, title, author) in [
        ("/books/known.epub", "Old Title", "Old Author"),
        ("/books/other.epub", "Stored", "Someone"),
    ] {
        legacy_string(&mut bytes, path);
        legacy_string(&mut bytes, title);
        legacy_string(&mut bytes, author);
    }
    write_legacy(dir.path(), &bytes);

    let resolver = |path: &str| {
        if path == "/books/known.epub" {
            BookMetadata::new("Fresh Title", "Fresh Author", "/.crosspoint/known.bmp")
        } else {
            BookMetadata::default()
        }
    };
    let mut store = RecentBooksStore::with_resolver(HostFileSystem::new(dir.path()), resolver);
    assert!(matches!(
        store.load(),
        Ok(LoadOutcome::Migrated { version: 2, count: 2, omitted: 0, .. })
    ));

    let known = store.get("/books/known.epub").unwrap();
    assert_eq!(known.title(), "Fresh Title");
    assert_eq!(known.cover_path(), "/.crosspoint/known.bmp");
    let other = store.get("/books/other.epub").unwrap();
    assert_eq!(other.title(), "Stored");
    assert_eq!(other.author(), "Someone");
}

#[test]
fn unknown_legacy_version_leaves_everything_in_place() {
    let dir = tempfile::tempdir().unwrap();
    write_legacy(dir.path(), &[9, 0]);

    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    assert_eq!(store.load(), Err(RecentBooksError::UnknownLegacyVersion(9)));
    assert_eq!(store.load_state(), LoadState::Failed);
    assert!(store.is_empty());
    assert!(dir.path().join(".crosspoint/recent.bin").exists());
    assert!(!dir.path().join(".crosspoint/recent.json").exists());
}

#[test]
fn missing_books_are_pruned_on_request() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("books")).unwrap();
    fs::write(dir.path().join("books/kept.txt"), "hello").unwrap();

    let mut store = RecentBooksStore::new(HostFileSystem::new(dir.path()));
    store.add_book("/books/kept.txt", "kept.txt", "", "").unwrap();
    store.add_book("/books/deleted.txt", "deleted.txt", "", "").unwrap();
    assert_eq!(store.len(), 2);

    assert_eq!(store.retain_existing(), Ok(1));
    assert_eq!(store.first().unwrap().path(), "/books/kept.txt");
}
