//! Ratatui front-end. The terminal board is just another display surface: key
//! presses become triggers, the controller renders onto the board, and the
//! draw pass paints whatever the board currently holds.

mod app;
mod board;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
