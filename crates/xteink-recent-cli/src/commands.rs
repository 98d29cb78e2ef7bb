use std::io::{self, Write};

use clap::Subcommand;
use xteink_recent_books::{
    FileSystem, LoadOutcome, MetadataResolver, RecentBooksError, RecentBooksStore,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the list, most recent first
    List,
    /// Record that a book was opened
    Add {
        path: String,
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        cover: String,
    },
    /// Replace a book's metadata without reordering
    Update {
        path: String,
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        cover: String,
    },
    /// Set reading progress (clamped to 0..=100)
    Progress {
        path: String,
        #[arg(allow_negative_numbers = true)]
        percent: i32,
    },
    /// Add reading time in seconds
    Time { path: String, seconds: u32 },
    /// Apply a reading session, creating the entry from file metadata if needed
    Stats {
        path: String,
        seconds: u32,
        #[arg(allow_negative_numbers = true)]
        percent: i32,
    },
    /// Forget a book
    Remove { path: String },
    /// Drop books whose files no longer exist
    Prune,
    /// Load (and migrate if needed), then report what was found
    Load,
}

/// Run one command against a loaded store, writing firmware-CLI style output.
///
/// Returns `Ok(false)` when the command failed and an `ERR` line was written.
pub fn handle_command<F, R>(
    command: &Command,
    store: &mut RecentBooksStore<F, R>,
    out: &mut dyn Write,
) -> io::Result<bool>
where
    F: FileSystem,
    R: MetadataResolver,
{
    let result = match command {
        Command::List => {
            for (index, book) in store.books().iter().enumerate() {
                writeln!(
                    out,
                    "{} {} {} {} | {} | {}",
                    index,
                    book.progress_text(),
                    book.metrics_text(),
                    book.path(),
                    book.title(),
                    book.author()
                )?;
            }
            Ok(true)
        }
        Command::Add {
            path,
            title,
            author,
            cover,
        } => store.add_book(path, title, author, cover),
        Command::Update {
            path,
            title,
            author,
            cover,
        } => store.update_book(path, title, author, cover),
        Command::Progress { path, percent } => store.update_progress(path, *percent),
        Command::Time { path, seconds } => store.add_reading_time(path, *seconds),
        Command::Stats {
            path,
            seconds,
            percent,
        } => store.update_reading_stats(path, *seconds, *percent),
        Command::Remove { path } => store.remove_book(path),
        Command::Prune => match store.retain_existing() {
            Ok(removed) => {
                writeln!(out, "removed {}", removed)?;
                Ok(removed > 0)
            }
            Err(err) => Err(err),
        },
        Command::Load => return Ok(true),
    };

    match result {
        Ok(true) => writeln!(out, "OK")?,
        Ok(false) => writeln!(out, "OK unchanged")?,
        Err(err) => {
            writeln!(out, "ERR {}", err)?;
            return Ok(false);
        }
    }
    Ok(true)
}

/// Describe a load result; `NotFound` is a normal first run.
pub fn report_load(
    outcome: &Result<LoadOutcome, RecentBooksError>,
    out: &mut dyn Write,
) -> io::Result<bool> {
    match outcome {
        Ok(LoadOutcome::Json { count }) => writeln!(out, "loaded {} book(s) from json", count)?,
        Ok(LoadOutcome::Migrated {
            version,
            count,
            omitted,
            persisted,
        }) => writeln!(
            out,
            "migrated {} book(s) from legacy v{} ({} omitted){}",
            count,
            version,
            omitted,
            if *persisted { "" } else { ", not saved" }
        )?,
        Err(RecentBooksError::NotFound) => writeln!(out, "no recent books yet")?,
        Err(err) => {
            writeln!(out, "ERR {}", err)?;
            return Ok(false);
        }
    }
    Ok(true)
}
