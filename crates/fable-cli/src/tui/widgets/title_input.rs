//! Title input widget with line editing support.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_input::Input;
use unicode_width::UnicodeWidthChar;

/// Single-line title input with a visible cursor.
pub struct TitleInput<'a> {
    input: &'a Input,
    is_active: bool,
}

impl<'a> TitleInput<'a> {
    pub fn new(input: &'a Input) -> Self {
        Self {
            input,
            is_active: true,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for TitleInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(" Title ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let value = self.input.value();
        let cursor = self.input.cursor();
        let chars: Vec<char> = value.chars().collect();

        // Scroll the visible window so the cursor stays on screen.
        let width = inner.width as usize;
        let start = cursor.saturating_sub(width.saturating_sub(1));

        let input_style = Style::default().fg(Color::White);
        let cursor_style = if self.is_active {
            input_style.add_modifier(Modifier::REVERSED)
        } else {
            input_style
        };

        let mut spans: Vec<Span> = Vec::new();
        let mut rendered_width = 0usize;
        for (idx, ch) in chars.iter().enumerate().skip(start) {
            let ch_width = UnicodeWidthChar::width(*ch).unwrap_or(0);
            if rendered_width + ch_width > width {
                break;
            }
            rendered_width += ch_width;
            let style = if idx == cursor && self.is_active {
                cursor_style
            } else {
                input_style
            };
            spans.push(Span::styled(ch.to_string(), style));
        }

        // Cursor sits past the end of the text
        if self.is_active && cursor >= chars.len() && rendered_width < width {
            spans.push(Span::styled(" ", cursor_style));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
