use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::TextInput;

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub location: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::White).bg(Color::DarkGray),
            location: Style::default().fg(Color::Yellow),
        }
    }
}

/// Top bar with the app name and the current location.
///
/// While the location bar is open its input replaces the fragment display.
pub struct HeaderBar<'a> {
    fragment: &'a str,
    location_input: Option<&'a TextInput>,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(fragment: &'a str) -> Self {
        Self {
            fragment,
            location_input: None,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn location_input(mut self, input: Option<&'a TextInput>) -> Self {
        self.location_input = input;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Rows the header needs.
    #[must_use]
    pub const fn height(&self) -> u16 {
        if self.location_input.is_some() { 4 } else { 1 }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style.background);

        let [title_area, input_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let mut spans = vec![
            Span::styled(format!(" {} ", crate::NAME), self.style.app_name),
            Span::styled(format!(" v{} ", crate::VERSION), self.style.version),
        ];
        if self.location_input.is_none() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("#{}", self.fragment), self.style.location));
        }
        Paragraph::new(Line::from(spans)).render(title_area, buf);

        if let Some(input) = self.location_input {
            input.render(input_area, buf);
        }
    }
}
