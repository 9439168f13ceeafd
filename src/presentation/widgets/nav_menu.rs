//! Navigation menu widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::shell::LinkView;

pub struct NavMenuStyle {
    pub border: Style,
    pub shortcut: Style,
    pub link: Style,
    pub current: Style,
}

impl Default for NavMenuStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            shortcut: Style::default().fg(Color::DarkGray),
            link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            current: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Numbered list of page links. The active page shows as plain text.
pub struct NavMenu<'a> {
    items: &'a [LinkView],
    style: NavMenuStyle,
}

impl<'a> NavMenu<'a> {
    #[must_use]
    pub fn new(items: &'a [LinkView]) -> Self {
        Self {
            items,
            style: NavMenuStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: NavMenuStyle) -> Self {
        self.style = style;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let label_style = if item.is_link() {
                    self.style.link
                } else {
                    self.style.current
                };
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), self.style.shortcut),
                    Span::styled(item.label(), label_style),
                ])
            })
            .collect()
    }
}

impl Widget for NavMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(self.style.border);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines()).render(inner, buf);
    }
}
