//! Status bar widget showing model, phase, and status information.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::super::app::Phase;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Status bar display state
pub struct StatusBar<'a> {
    model: &'a str,
    phase: Phase,
    tick: usize,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(model: &'a str) -> Self {
        Self {
            model,
            phase: Phase::Idle,
            tick: 0,
            status_message: None,
            is_error: false,
        }
    }

    pub fn phase(mut self, phase: Phase, tick: usize) -> Self {
        self.phase = phase;
        self.tick = tick;
        self
    }

    pub fn status(mut self, message: &'a str, is_error: bool) -> Self {
        self.status_message = Some(message);
        self.is_error = is_error;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style_label = Style::default().fg(Color::DarkGray);
        let style_value = Style::default().fg(Color::White);
        let style_busy = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let style_error = Style::default().fg(Color::Red);

        let mut spans = vec![
            Span::styled(" fable ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::styled("model: ", style_label),
            Span::styled(self.model, style_value),
        ];

        let spinner = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
        match self.phase {
            Phase::Idle => {}
            Phase::Searching => {
                spans.push(Span::styled(
                    format!("  {} Searching the web...", spinner),
                    style_busy,
                ));
            }
            Phase::Summarizing => {
                spans.push(Span::styled(
                    format!("  {} Generating summary...", spinner),
                    style_busy,
                ));
            }
        }

        if let Some(msg) = self.status_message {
            let style = if self.is_error { style_error } else { style_label };
            spans.push(Span::styled(format!("  {}", msg), style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        paragraph.render(area, buf);
    }
}
