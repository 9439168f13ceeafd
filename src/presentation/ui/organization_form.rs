//! Organization create/edit form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use tui_textarea::{CursorMove, TextArea};

use crate::domain::{Organization, OrganizationId};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::TextInput;

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Name,
    Mission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for the record named in the location.
    Loading,
    Editing,
    Saving,
    /// The save request went out; its outcome is only logged.
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Save(Organization),
}

/// Form for one organization: a name field and a mission text area.
pub struct OrganizationForm {
    id: OrganizationId,
    name: TextInput,
    mission: TextArea<'static>,
    focus: FormFocus,
    state: FormState,
}

impl OrganizationForm {
    /// Blank form for a new record with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(OrganizationId::generate(), FormState::Editing)
    }

    /// Form waiting for the record `id`.
    #[must_use]
    pub fn loading(id: OrganizationId) -> Self {
        Self::with_state(id, FormState::Loading)
    }

    fn with_state(id: OrganizationId, state: FormState) -> Self {
        let mut name = TextInput::new("Name").placeholder("Organization name");
        name.set_focused(true);
        Self {
            id,
            name,
            mission: TextArea::default(),
            focus: FormFocus::Name,
            state,
        }
    }

    /// Fills the form from a fetched record.
    ///
    /// When nothing was found the requested id is kept, so saving creates
    /// the record.
    pub fn populate(&mut self, organization: Option<Organization>) {
        if let Some(org) = organization {
            self.id = org.id;
            self.name.set_value(org.name);
            self.mission = TextArea::new(org.mission.split('\n').map(str::to_string).collect());
        }
        self.state = FormState::Editing;
    }

    /// Marks a save request as sent.
    pub fn set_sent(&mut self) {
        self.state = FormState::Sent;
    }

    #[must_use]
    pub const fn id(&self) -> &OrganizationId {
        &self.id
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    #[must_use]
    pub const fn focus(&self) -> FormFocus {
        self.focus
    }

    /// Current field values as a record.
    #[must_use]
    pub fn organization(&self) -> Organization {
        Organization::new(
            self.id.clone(),
            self.name.value(),
            self.mission.lines().join("\n"),
        )
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormFocus::Name => FormFocus::Mission,
            FormFocus::Mission => FormFocus::Name,
        };
        self.name.set_focused(self.focus == FormFocus::Name);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.state == FormState::Loading {
            return FormAction::None;
        }

        if EventHandler::is_save_event(&key) {
            self.state = FormState::Saving;
            return FormAction::Save(self.organization());
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.toggle_focus();
            return FormAction::None;
        }

        let edited = match self.focus {
            FormFocus::Name => self.handle_name_key(key),
            FormFocus::Mission => self.handle_mission_key(key),
        };
        if edited && self.state == FormState::Sent {
            self.state = FormState::Editing;
        }
        FormAction::None
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !has_command_modifier(&key) => {
                self.name.input_char(c);
                true
            }
            KeyCode::Backspace => {
                self.name.backspace();
                true
            }
            KeyCode::Delete => {
                self.name.delete();
                true
            }
            KeyCode::Left => {
                self.name.move_left();
                false
            }
            KeyCode::Right => {
                self.name.move_right();
                false
            }
            KeyCode::Home => {
                self.name.move_start();
                false
            }
            KeyCode::End => {
                self.name.move_end();
                false
            }
            KeyCode::Enter => {
                self.toggle_focus();
                false
            }
            _ => false,
        }
    }

    fn handle_mission_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !has_command_modifier(&key) => {
                self.mission.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.mission.insert_newline();
                true
            }
            KeyCode::Backspace => self.mission.delete_char(),
            KeyCode::Delete => self.mission.delete_next_char(),
            KeyCode::Left => {
                self.mission.move_cursor(CursorMove::Back);
                false
            }
            KeyCode::Right => {
                self.mission.move_cursor(CursorMove::Forward);
                false
            }
            KeyCode::Up => {
                self.mission.move_cursor(CursorMove::Up);
                false
            }
            KeyCode::Down => {
                self.mission.move_cursor(CursorMove::Down);
                false
            }
            KeyCode::Home => {
                self.mission.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.mission.move_cursor(CursorMove::End);
                false
            }
            _ => false,
        }
    }

    fn render_mission(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == FormFocus::Mission;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Mission");
        let inner = block.inner(area);
        block.render(area, buf);

        let (cursor_row, cursor_col) = self.mission.cursor();
        let height = usize::from(inner.height);
        let scroll = if height == 0 {
            0
        } else {
            cursor_row.saturating_sub(height - 1)
        };

        let lines: Vec<Line<'_>> = self
            .mission
            .lines()
            .iter()
            .enumerate()
            .skip(scroll)
            .map(|(row, line)| {
                if !focused || row != cursor_row {
                    return Line::raw(line.as_str());
                }
                let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
                let before: String = line.chars().take(cursor_col).collect();
                let at = line.chars().nth(cursor_col).unwrap_or(' ');
                let after: String = line.chars().skip(cursor_col + 1).collect();
                Line::from(vec![
                    Span::raw(before),
                    Span::styled(at.to_string(), cursor_style),
                    Span::raw(after),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }

    fn status_line(&self) -> Line<'static> {
        match self.state {
            FormState::Loading => Line::from(Span::styled(
                "Loading organization...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            FormState::Editing => Line::from(Span::styled(
                "Ctrl+S: Save | Tab: Next field",
                Style::default().fg(Color::DarkGray),
            )),
            FormState::Saving => Line::from(Span::styled(
                "Saving...",
                Style::default().fg(Color::Yellow),
            )),
            FormState::Sent => Line::from(Span::styled(
                "Save sent.",
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
}

impl Default for OrganizationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &OrganizationForm {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, id_area, name_area, mission_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(Span::styled(
            "Edit Organization",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(title_area, buf);

        Paragraph::new(Span::styled(
            format!("id: {}", self.id),
            Style::default().fg(Color::DarkGray),
        ))
        .wrap(Wrap { trim: true })
        .render(id_area, buf);

        (&self.name).render(name_area, buf);
        self.render_mission(mission_area, buf);

        Paragraph::new(self.status_line()).render(status_area, buf);
    }
}
