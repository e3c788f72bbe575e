//! Startup configuration: command-line options plus the default locations of
//! the data and log files beneath the user's home directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".game-fund-board";
/// JSON catalogue loaded at startup.
const DATA_FILE_NAME: &str = "games.json";
/// Plain-text log written while the dashboard owns the terminal.
const LOG_FILE_NAME: &str = "game-fund-board.log";
/// Environment variable holding `tracing` filter directives.
pub const LOG_FILTER_ENV: &str = "GAME_FUND_BOARD_LOG";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "game-fund-board",
    version,
    about = "Terminal dashboard for crowdfunded game campaigns"
)]
pub struct Cli {
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "Games JSON file (seeded with a sample catalogue if missing)."
    )]
    pub data: Option<PathBuf>,

    #[arg(long = "log", value_name = "FILE", help = "Where to write the log file.")]
    pub log: Option<PathBuf>,
}

impl Cli {
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DATA_FILE_NAME)),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }
}

/// Resolve the application folder inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Send `tracing` output to `path`. The terminal belongs to the dashboard, so
/// nothing is written to stdout or stderr.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = log_filter();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

/// Filter directives from [`LOG_FILTER_ENV`], then `RUST_LOG`, then `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
