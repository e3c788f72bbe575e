//! Core library surface for the game funding board.
//!
//! Records flow one way: the [`store`] owns the loaded games, the [`derive`]
//! functions compute views and aggregates over them, the [`render`] pass turns
//! a view into cards on a [`render::DisplaySurface`], and the [`controller`]
//! maps view-selection triggers onto that pipeline. The [`ui`] module is the
//! terminal surface built on top.
pub mod config;
pub mod controller;
pub mod derive;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
pub mod ui;

pub use controller::{Trigger, ViewController, HANDLERS};
pub use derive::{
    filter_funded, filter_unfunded, search, top_by_pledged, top_two_by_pledged, total_backers,
    total_pledged, unfunded_count, Summary,
};
pub use error::ViewError;
pub use models::GameRecord;
pub use render::{render, CardView, DisplaySurface};
pub use store::RecordStore;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
