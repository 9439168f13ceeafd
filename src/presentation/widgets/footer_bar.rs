use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A key and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            info: Style::default().fg(Color::DarkGray),
        }
    }
}

pub struct FooterBar<'a> {
    hints: &'a [KeyHint],
    label: Option<&'a str>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self {
            hints,
            label: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    /// Page or mode name shown at the left edge.
    #[must_use]
    pub const fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style.background);

        let mut spans = Vec::new();
        if let Some(label) = self.label {
            spans.push(Span::styled(format!(" {label} "), self.style.label_style));
            spans.push(Span::raw(" "));
        }
        for hint in self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), self.style.key_style));
            spans.push(Span::styled(format!(" {} ", hint.action), self.style.info));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        if let Some(info) = self.right_info {
            let width = u16::try_from(info.chars().count()).unwrap_or(area.width);
            if width < area.width {
                let info_area = Rect {
                    x: area.x + area.width - width,
                    width,
                    ..area
                };
                Paragraph::new(Span::styled(info, self.style.info)).render(info_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_hints_and_info() {
        let hints = [KeyHint::new("^S", "save"), KeyHint::new("Tab", "next field")];
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(&hints)
            .label("FORM")
            .right_info(Some("Saved"))
            .render(area, &mut buf);

        let line: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.starts_with(" FORM "));
        assert!(line.contains("^S"));
        assert!(line.contains("next field"));
        assert!(line.trim_end().ends_with("Saved"));
    }
}
