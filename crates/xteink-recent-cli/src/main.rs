//! Desktop tool for the recent books list of an Xteink X4.
//!
//! Works on a directory holding a copy (or the mount point) of the SD card.

mod commands;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use xteink_recent_books::config::{DEFAULT_MAX_BOOKS, DEFAULT_STATE_DIR};
use xteink_recent_books::{
    FileNameResolver, HostFileSystem, RecentBooksConfig, RecentBooksError, RecentBooksStore,
};

use commands::{handle_command, report_load, Command};

#[derive(Debug, Parser)]
#[command(name = "xteink-recent", version, about)]
struct Cli {
    /// Directory standing in for the SD card root
    #[arg(long, env = "XTEINK_SD_ROOT", default_value = ".")]
    root: PathBuf,

    /// Firmware state directory on the card
    #[arg(long, default_value = DEFAULT_STATE_DIR)]
    state_dir: String,

    /// List capacity
    #[arg(long, default_value_t = DEFAULT_MAX_BOOKS)]
    max_books: usize,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = RecentBooksConfig::builder()
        .state_dir(cli.state_dir.as_str())
        .max_books(cli.max_books)
        .build()?;
    let mut store =
        RecentBooksStore::with_config(HostFileSystem::new(&cli.root), FileNameResolver, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let loaded = store.load();
    if matches!(cli.command, Command::Load) {
        let ok = report_load(&loaded, &mut out)?;
        out.flush()?;
        return Ok(ok);
    }
    // A broken recent.json must not be overwritten by the next save.
    if let Err(err) = &loaded {
        if *err != RecentBooksError::NotFound {
            writeln!(out, "ERR {}", err)?;
            return Ok(false);
        }
    }

    let ok = handle_command(&cli.command, &mut store, &mut out)?;
    out.flush()?;
    Ok(ok)
}
