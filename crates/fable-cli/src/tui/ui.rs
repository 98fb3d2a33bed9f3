//! UI layout rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{Phase, TuiApp};
use super::widgets::{PersonaSelect, ResultPanel, StatusBar, TitleInput};

/// Render the entire TUI
pub fn render(app: &TuiApp, frame: &mut Frame) {
    let area = frame.area();
    let chunks = create_layout(area);

    // Status bar at top
    let mut status_bar = StatusBar::new(&app.model).phase(app.phase, app.tick);
    if let Some(ref msg) = app.validation_error {
        status_bar = status_bar.status(msg, true);
    } else if let Some(ref msg) = app.status_message {
        status_bar = status_bar.status(msg, app.status_is_error);
    }
    frame.render_widget(status_bar, chunks.status);

    // Form: title input + persona selector
    let form_active = app.phase == Phase::Idle;
    frame.render_widget(TitleInput::new(&app.input).active(form_active), chunks.title);
    frame.render_widget(
        PersonaSelect::new(app.persona).active(form_active),
        chunks.persona,
    );

    // Summary panel, once there is something to show
    if let Some(ref summary) = app.summary {
        let text = summary.display_text();
        let panel = ResultPanel::new(&text)
            .collapsed(app.result_collapsed)
            .error(summary.is_failure());
        frame.render_widget(panel, chunks.result);
    } else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Enter a fairy-tale title above and press Enter.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )));
        frame.render_widget(placeholder, chunks.result);
    }

    // Hint bar
    let hint = if app.phase == Phase::Idle {
        "Enter submit | Tab persona | Ctrl+T collapse summary | Ctrl+C quit"
    } else {
        "Working... this cannot be cancelled"
    };
    let hint_bar = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint_bar, chunks.hint);
}

/// Layout regions
struct LayoutRegions {
    status: Rect,
    title: Rect,
    persona: Rect,
    result: Rect,
    hint: Rect,
}

fn create_layout(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Status bar
            Constraint::Length(3), // Title input
            Constraint::Length(3), // Persona selector
            Constraint::Min(5),    // Summary panel
            Constraint::Length(1), // Hint bar
        ])
        .split(area);

    LayoutRegions {
        status: chunks[0],
        title: chunks[1],
        persona: chunks[2],
        result: chunks[3],
        hint: chunks[4],
    }
}
