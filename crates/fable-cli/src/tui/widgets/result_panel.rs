//! Collapsible summary panel widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Summary panel that can be collapsed.
pub struct ResultPanel<'a> {
    content: &'a str,
    is_collapsed: bool,
    is_error: bool,
}

impl<'a> ResultPanel<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            is_collapsed: false,
            is_error: false,
        }
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.is_collapsed = collapsed;
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.is_error = error;
        self
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_style = Style::default().fg(Color::Yellow);

        let title = if self.is_collapsed {
            " Summary [+] "
        } else {
            " Summary "
        };

        let block = Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.is_collapsed {
            let collapsed_text = format!(
                "({} chars) Press Ctrl+T to expand",
                self.content.chars().count()
            );
            let paragraph = Paragraph::new(Line::from(Span::styled(
                collapsed_text,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            paragraph.render(area, buf);
        } else {
            let content_style = if self.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };

            let lines: Vec<Line> = self
                .content
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), content_style)))
                .collect();

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false });

            paragraph.render(area, buf);
        }
    }
}
