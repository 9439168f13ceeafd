//! Organization list screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::application::shell::{LinkView, PageLink};
use crate::domain::{Organization, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    None,
    /// Follow the selected organization's link.
    Open(PageLink),
    /// Fetch the list again.
    Refresh,
}

/// "Theatre Organizations" list. Entries link to the edit form.
#[derive(Debug, Default)]
pub struct HomeScreen {
    links: Option<Vec<PageLink>>,
    selected: usize,
}

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the list has been fetched.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.links.is_some()
    }

    /// Forgets the fetched list, showing the loading state again.
    pub fn set_loading(&mut self) {
        self.links = None;
        self.selected = 0;
    }

    /// Replaces the list with fetched records, already sorted by name.
    pub fn set_organizations(&mut self, organizations: &[Organization]) {
        let links: Vec<_> = organizations
            .iter()
            .map(|org| {
                PageLink::new(Page::EditOrganization, org.name.clone())
                    .with_arg("id", org.id.as_str())
            })
            .collect();
        self.selected = self.selected.min(links.len().saturating_sub(1));
        self.links = Some(links);
    }

    /// Links in display order.
    #[must_use]
    pub fn links(&self) -> &[PageLink] {
        self.links.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HomeAction {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return HomeAction::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.links().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.links().len().saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(link) = self.links().get(self.selected) {
                    return HomeAction::Open(link.clone());
                }
            }
            KeyCode::Char('r') => return HomeAction::Refresh,
            _ => {}
        }
        HomeAction::None
    }

    fn item_lines(&self) -> Vec<Line<'_>> {
        let Some(links) = &self.links else {
            return vec![Line::from(Span::styled(
                "Loading...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))];
        };

        if links.is_empty() {
            return vec![Line::from(Span::styled(
                "No organizations yet.",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let marker = if i == self.selected { "> " } else { "  " };
                let mut style = match link.render(Some(Page::Home)) {
                    LinkView::Link { .. } => Style::default().fg(Color::Cyan),
                    LinkView::Text { .. } => Style::default(),
                };
                if i == self.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(link.label().to_string(), style),
                ])
            })
            .collect()
    }
}

impl Widget for &HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(Span::styled(
            "Theatre Organizations",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(title_area, buf);

        let visible = usize::from(list_area.height);
        let skip = if visible == 0 {
            0
        } else {
            self.selected.saturating_sub(visible - 1)
        };
        let lines: Vec<_> = self.item_lines().into_iter().skip(skip).collect();
        Paragraph::new(lines).render(list_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> HomeScreen {
        let mut screen = HomeScreen::new();
        screen.set_organizations(&[
            Organization::new("1", "ACT", ""),
            Organization::new("2", "Intiman", ""),
        ]);
        screen
    }

    #[test]
    fn test_starts_unloaded() {
        let screen = HomeScreen::new();
        assert!(!screen.is_loaded());
        assert!(screen.links().is_empty());
    }

    #[test]
    fn test_entries_link_to_edit_form() {
        let screen = loaded();
        let link = &screen.links()[1];

        assert_eq!(link.label(), "Intiman");
        assert_eq!(link.href(), "#p=edit-organization&id=2");
    }

    #[test]
    fn test_navigation_and_open() {
        let mut screen = loaded();

        screen.handle_key(key(KeyCode::Char('j')));
        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.selected(), 1);

        let HomeAction::Open(link) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected open");
        };
        assert_eq!(link.target().get("id"), Some("2"));

        screen.handle_key(key(KeyCode::Char('k')));
        assert_eq!(screen.selected(), 0);
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut screen = HomeScreen::new();
        screen.set_organizations(&[]);
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), HomeAction::None);
    }

    #[test]
    fn test_refresh_key() {
        let mut screen = loaded();
        assert_eq!(screen.handle_key(key(KeyCode::Char('r'))), HomeAction::Refresh);
    }

    #[test]
    fn test_set_loading_resets() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Down));
        screen.set_loading();

        assert!(!screen.is_loaded());
        assert_eq!(screen.selected(), 0);
    }

    #[test]
    fn test_render_lists_names() {
        let screen = loaded();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);

        (&screen).render(area, &mut buf);

        let row = |y: u16| -> String { (0..30).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(0).starts_with("Theatre Organizations"));
        assert!(row(2).contains("ACT"));
        assert!(row(3).contains("Intiman"));
    }
}
