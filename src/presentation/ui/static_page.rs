//! Pages with fixed content.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::domain::Page;

const ESSAY: &str = "There seem to be several types of theatre institutions. Actually, \
perhaps \"myriad\" types would be more appropriate. One type that I am particularly \
interested in is PRODUCING theatre organizations. Let me give you an example. Strawberry \
Theatre Workshop produces theatre productions. That is their main thing. They don't host \
touring productions. They are not primarily a venue. They do not curate theatre. Not to \
say that those other things are not legitimate things to do. But producing organizations \
are particularly interesting to me. Productions that are produced locally have a \
particular flavor. Home-grown. They are born of our body and spirit, as Seattle. They are \
born of our strengths and failings as a regional center for the arts. Something \
compelling about that. They are ours.";

/// Maximum width of the essay column.
const ESSAY_WIDTH: u16 = 72;

/// Placeholder or essay page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPage {
    title: Option<&'static str>,
    body: &'static str,
    scroll: u16,
}

impl StaticPage {
    /// Content for `page`, or `None` for pages with their own screen.
    #[must_use]
    pub const fn for_page(page: Page) -> Option<Self> {
        let (title, body) = match page {
            Page::Home | Page::EditOrganization => return None,
            Page::EditProduction => (None, "Edit Production."),
            Page::EditVenue => (None, "Edit Venue."),
            Page::EditTheatreArtist => (None, "Edit Theatre Artist."),
            Page::RandomAssThoughts => (Some("Random-Ass Thoughts"), ESSAY),
        };
        Some(Self {
            title,
            body,
            scroll: 0,
        })
    }

    #[must_use]
    pub const fn title(&self) -> Option<&'static str> {
        self.title
    }

    #[must_use]
    pub const fn body(&self) -> &'static str {
        self.body
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
    }
}

impl Widget for &StaticPage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [column, _] =
            Layout::horizontal([Constraint::Max(ESSAY_WIDTH), Constraint::Fill(1)]).areas(area);

        let body_area = if let Some(title) = self.title {
            let [title_area, _, body_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(column);
            Paragraph::new(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .render(title_area, buf);
            body_area
        } else {
            column
        };

        Paragraph::new(self.body)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0))
            .render(body_area, buf);
    }
}
