//! Widgets for the fable form TUI.

mod persona_select;
mod result_panel;
mod status_bar;
mod title_input;

pub use persona_select::PersonaSelect;
pub use result_panel::ResultPanel;
pub use status_bar::StatusBar;
pub use title_input::TitleInput;
