//! Radio-style persona selector.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use fable_core::Persona;

/// Single-choice selector over the closed persona set. Selection is
/// always valid; there is no unselected state.
pub struct PersonaSelect {
    selected: Persona,
    is_active: bool,
}

impl PersonaSelect {
    pub fn new(selected: Persona) -> Self {
        Self {
            selected,
            is_active: true,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for PersonaSelect {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Explained by ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let selected_style = if self.is_active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let unselected_style = Style::default().fg(Color::DarkGray);

        let mut spans: Vec<Span> = Vec::new();
        for persona in Persona::ALL {
            if !spans.is_empty() {
                spans.push(Span::raw("   "));
            }
            let (marker, style) = if persona == self.selected {
                ("(*) ", selected_style)
            } else {
                ("( ) ", unselected_style)
            };
            spans.push(Span::styled(format!("{}{}", marker, persona.label()), style));
        }
        spans.push(Span::styled(
            "   Tab to switch",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
