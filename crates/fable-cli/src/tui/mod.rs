//! Terminal user interface module using ratatui.
//!
//! A single-page form: title input, persona selector, and a
//! collapsible summary panel.

mod app;
mod events;
mod ui;
mod widgets;

pub use app::run_tui;
