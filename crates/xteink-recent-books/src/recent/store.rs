use alloc::vec::Vec;

use super::book::RecentBook;
use super::legacy;
use super::resolver::{FileNameResolver, MetadataResolver};
use super::storage;
use crate::config::RecentBooksConfig;
use crate::error::RecentBooksError;
use crate::filesystem::FileSystem;

/// Where the store is in its boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// `load` has not run yet
    #[default]
    Unloaded,
    /// The list came from `recent.json` or a migrated legacy file;
    /// `LoadOutcome` tells which
    Loaded,
    /// Nothing usable was found; the list kept its previous contents
    Failed,
}

/// What a successful `load` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Json {
        count: usize,
    },
    Migrated {
        version: u8,
        count: usize,
        omitted: usize,
        /// `recent.json` was written and the legacy file moved to its backup name
        persisted: bool,
    },
}

/// Most-recently-used list of opened books, index 0 being the latest.
///
/// Every mutation rewrites `recent.json` before returning. Mutators report
/// `Ok(true)` when the list changed and was saved, `Ok(false)` when there was
/// nothing to do, and `Err` when the save failed; the in-memory change is kept
/// in that case so a later save can still persist it.
///
/// The store is single threaded. A multi-threaded host should keep the whole
/// store behind one `Mutex`.
pub struct RecentBooksStore<F: FileSystem, R: MetadataResolver = FileNameResolver> {
    fs: F,
    resolver: R,
    config: RecentBooksConfig,
    books: Vec<RecentBook>,
    state: LoadState,
}

impl<F: FileSystem> RecentBooksStore<F, FileNameResolver> {
    /// Store with the default config and file-name based metadata lookup
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, FileNameResolver, RecentBooksConfig::default())
    }
}

impl<F: FileSystem, R: MetadataResolver> RecentBooksStore<F, R> {
    pub fn with_resolver(fs: F, resolver: R) -> Self {
        Self::with_config(fs, resolver, RecentBooksConfig::default())
    }

    pub fn with_config(fs: F, resolver: R, config: RecentBooksConfig) -> Self {
        Self {
            fs,
            resolver,
            config,
            books: Vec::new(),
            state: LoadState::Unloaded,
        }
    }

    /// Books, most recent first
    pub fn books(&self) -> &[RecentBook] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn first(&self) -> Option<&RecentBook> {
        self.books.first()
    }

    pub fn get(&self, path: &str) -> Option<&RecentBook> {
        self.books.iter().find(|book| book.path() == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    pub fn config(&self) -> &RecentBooksConfig {
        &self.config
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    /// Record that a book was opened.
    ///
    /// The book moves to the front, keeping the progress and reading time it
    /// already had. The oldest book is dropped when the list is full.
    pub fn add_book(
        &mut self,
        path: &str,
        title: &str,
        author: &str,
        cover_path: &str,
    ) -> Result<bool, RecentBooksError> {
        let mut book = RecentBook::new(path, title, author, cover_path);
        if let Some(index) = self.position(path) {
            let previous = self.books.remove(index);
            book.copy_counters_from(&previous);
        }

        self.books.insert(0, book);
        self.books.truncate(self.config.max_books);
        self.persist()
    }

    /// Replace a book's metadata without moving it. No-op for unknown paths.
    pub fn update_book(
        &mut self,
        path: &str,
        title: &str,
        author: &str,
        cover_path: &str,
    ) -> Result<bool, RecentBooksError> {
        let Some(book) = self.find_mut(path) else {
            return Ok(false);
        };
        book.set_metadata(title, author, cover_path);
        self.persist()
    }

    /// Set progress, clamped to 0..=100. Nothing is written when the book is
    /// unknown or the clamped value is unchanged.
    pub fn update_progress(&mut self, path: &str, percent: i32) -> Result<bool, RecentBooksError> {
        let Some(book) = self.find_mut(path) else {
            return Ok(false);
        };
        if !book.set_progress(percent) {
            return Ok(false);
        }
        self.persist()
    }

    /// Add elapsed reading time, saturating at `u32::MAX`.
    pub fn add_reading_time(
        &mut self,
        path: &str,
        elapsed_seconds: u32,
    ) -> Result<bool, RecentBooksError> {
        if elapsed_seconds == 0 {
            return Ok(false);
        }
        let Some(book) = self.find_mut(path) else {
            return Ok(false);
        };
        book.add_reading_seconds(elapsed_seconds);
        self.persist()
    }

    /// Apply a finished reading session in one write.
    ///
    /// Unknown books are created at the front from resolved metadata; when the
    /// resolver has no title for the path nothing is created or written.
    pub fn update_reading_stats(
        &mut self,
        path: &str,
        session_seconds: u32,
        percent: i32,
    ) -> Result<bool, RecentBooksError> {
        let mut changed = false;
        let index = match self.position(path) {
            Some(index) => index,
            None => {
                let metadata = self.resolver.resolve(path);
                if metadata.title.is_empty() {
                    log::debug!("[RECENT] no metadata for {}, not tracking it", path);
                    return Ok(false);
                }
                self.books.insert(
                    0,
                    RecentBook::new(path, metadata.title, metadata.author, metadata.cover_path),
                );
                self.books.truncate(self.config.max_books);
                changed = true;
                0
            }
        };

        let book = &mut self.books[index];
        if session_seconds > 0 {
            book.add_reading_seconds(session_seconds);
            changed = true;
        }
        changed |= book.set_progress(percent);

        if !changed {
            return Ok(false);
        }
        self.persist()
    }

    /// Forget a book.
    pub fn remove_book(&mut self, path: &str) -> Result<bool, RecentBooksError> {
        let Some(index) = self.position(path) else {
            return Ok(false);
        };
        self.books.remove(index);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<bool, RecentBooksError> {
        if self.books.is_empty() {
            return Ok(false);
        }
        self.books.clear();
        self.persist()
    }

    /// Drop books whose files are gone from the filesystem and return how many
    /// were removed. Callers run this before showing the list; mutators never
    /// check for existence themselves.
    pub fn retain_existing(&mut self) -> Result<usize, RecentBooksError> {
        let before = self.books.len();
        let fs = &mut self.fs;
        self.books.retain(|book| fs.exists(book.path()));

        let removed = before - self.books.len();
        if removed > 0 {
            log::info!("[RECENT] dropped {} missing book(s)", removed);
            self.persist()?;
        }
        Ok(removed)
    }

    /// Write the whole list to `recent.json`.
    ///
    /// # Errors
    ///
    /// Storage and encoding failures; the in-memory list is never modified.
    pub fn save(&mut self) -> Result<(), RecentBooksError> {
        self.fs.make_dir(&self.config.state_dir)?;
        let data = storage::encode(&self.books)?;
        self.fs.write_file(&self.config.json_path(), &data)?;
        log::debug!("[RECENT] saved {} book(s)", self.books.len());
        Ok(())
    }

    /// Populate the list at boot.
    ///
    /// `recent.json` is used when it exists and parses, even if a legacy file
    /// is also present. Otherwise the legacy binary file is migrated: the
    /// result is saved as `recent.json` and the legacy file is renamed to its
    /// backup name. On failure the list is left untouched.
    pub fn load(&mut self) -> Result<LoadOutcome, RecentBooksError> {
        match self.load_inner() {
            Ok(outcome) => {
                self.state = LoadState::Loaded;
                Ok(outcome)
            }
            Err(err) => {
                log::warn!("[RECENT] load failed: {}", err);
                self.state = LoadState::Failed;
                Err(err)
            }
        }
    }

    fn load_inner(&mut self) -> Result<LoadOutcome, RecentBooksError> {
        let json_path = self.config.json_path();
        let mut json_error = None;

        if self.fs.exists(&json_path) {
            match self.fs.read_file(&json_path) {
                Ok(json) if json.trim().is_empty() => {
                    log::warn!("[RECENT] {} is empty", json_path);
                }
                Ok(json) => match storage::decode(&json, self.config.max_books) {
                    Ok(books) => {
                        self.books = books;
                        log::info!(
                            "[RECENT] loaded {} book(s) from {}",
                            self.books.len(),
                            json_path
                        );
                        return Ok(LoadOutcome::Json {
                            count: self.books.len(),
                        });
                    }
                    Err(err) => {
                        log::warn!("[RECENT] {} unreadable: {}", json_path, err);
                        json_error = Some(err);
                    }
                },
                Err(err) => {
                    log::warn!("[RECENT] failed to read {}: {}", json_path, err);
                    json_error = Some(err.into());
                }
            }
        }

        let legacy_path = self.config.legacy_path();
        if !self.fs.exists(&legacy_path) {
            return Err(json_error.unwrap_or(RecentBooksError::NotFound));
        }
        self.migrate_legacy(&legacy_path)
    }

    fn migrate_legacy(&mut self, legacy_path: &str) -> Result<LoadOutcome, RecentBooksError> {
        let data = self.fs.read_file_bytes(legacy_path)?;
        let file = legacy::parse(&data).inspect_err(|err| {
            log::error!("[RECENT] legacy migration failed: {}", err);
        })?;

        let migration = legacy::migrate(file, &mut self.resolver);
        if migration.omitted > 0 {
            log::debug!(
                "[RECENT] omitted {} legacy book(s) with missing title",
                migration.omitted
            );
        }
        self.books = storage::normalize(migration.books, self.config.max_books);

        let persisted = match self.save() {
            Ok(()) => {
                let backup_path = self.config.backup_path();
                if let Err(err) = self.fs.rename(legacy_path, &backup_path) {
                    log::warn!("[RECENT] could not back up {}: {}", legacy_path, err);
                }
                true
            }
            Err(err) => {
                log::warn!(
                    "[RECENT] keeping {} until migrated list is saved: {}",
                    legacy_path,
                    err
                );
                false
            }
        };

        log::info!(
            "[RECENT] migrated {} book(s) from legacy v{} file",
            self.books.len(),
            migration.version
        );
        Ok(LoadOutcome::Migrated {
            version: migration.version,
            count: self.books.len(),
            omitted: migration.omitted,
            persisted,
        })
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.books.iter().position(|book| book.path() == path)
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut RecentBook> {
        self.books.iter_mut().find(|book| book.path() == path)
    }

    fn persist(&mut self) -> Result<bool, RecentBooksError> {
        self.save().inspect_err(|err| {
            log::warn!("[RECENT] failed to save recent books: {}", err);
        })?;
        Ok(true)
    }
}
