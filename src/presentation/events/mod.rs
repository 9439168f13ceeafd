//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Key classification shared by all screens.
pub struct EventHandler;

impl EventHandler {
    /// Number of navigation shortcuts (F1..F6, 1..6).
    pub const NAV_SHORTCUTS: usize = 6;

    /// Checks if key quits from anywhere.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key quits from screens without text entry.
    #[must_use]
    pub fn is_dismiss_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Checks if key saves the current form.
    #[must_use]
    pub fn is_save_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Checks if key opens the location bar.
    #[must_use]
    pub fn is_location_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Maps a navigation shortcut to a zero-based menu index.
    ///
    /// Function keys always count; digits only when `allow_digits` is set,
    /// since text fields need them.
    #[must_use]
    pub fn nav_shortcut(key: &KeyEvent, allow_digits: bool) -> Option<usize> {
        let index = match key.code {
            KeyCode::F(n) => usize::from(n).checked_sub(1)?,
            KeyCode::Char(c @ '1'..='9')
                if allow_digits
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                (c as usize) - ('1' as usize)
            }
            _ => return None,
        };
        (index < Self::NAV_SHORTCUTS).then_some(index)
    }
}
