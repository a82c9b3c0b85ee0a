// Terminal UI implementation using ratatui
// Listing, detail and favorites screens over the catalog store

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, Effect, InputMode, Screen};
pub use runner::run_tui;
