//! Event handling for the TUI.
//!
//! Defines pipeline events and keyboard input processing.

use fable_core::Summary;

/// Events sent from the spawned pipeline task to the TUI. One
/// submission produces Searching, then Summarizing, then exactly one of
/// Done or Failed.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// The search call is in flight
    Searching,
    /// Search text arrived; the completion call is in flight
    Summarizing,
    /// Pipeline finished with a renderable outcome
    Done { summary: Summary },
    /// The search transport failed
    Failed { message: String },
}

/// Input action from keyboard events
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Move cursor left
    Left,
    /// Move cursor right
    Right,
    /// Move cursor to start of line
    Home,
    /// Move cursor to end of line
    End,
    /// Delete word before cursor
    DeleteWord,
    /// Submit the form
    Submit,
    /// Cycle to the next persona
    NextPersona,
    /// Cycle to the previous persona
    PrevPersona,
    /// Collapse/expand the summary panel
    ToggleResult,
    /// Quit the application
    Quit,
}
