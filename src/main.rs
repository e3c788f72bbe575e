//! Binary entry point: parse options, route logs to a file, load the game
//! catalogue and hand control to the Ratatui event loop.
use clap::Parser;
use game_fund_board::config::{init_logging, Cli};
use game_fund_board::{run_app, App, RecordStore};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path()?)?;

    let data_path = cli.data_path()?;
    let store = RecordStore::load_or_seed(&data_path)?;
    info!(games = store.len(), "starting dashboard");

    let mut app = App::new(store)?;
    run_app(&mut app)
}
