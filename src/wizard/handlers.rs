//! Common event handlers for the wizard
//!
//! Screens call these before their own key handling so shared bindings
//! behave the same everywhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::traits::{FormHandler, Navigable, ScreenAction};

/// Common keyboard event handling utilities
pub struct CommonKeyHandler;

impl CommonKeyHandler {
    /// Handle navigation keys for list-based screens
    pub fn handle_navigation_keys<T: Navigable>(
        navigable: &mut T,
        key: KeyEvent,
    ) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                navigable.navigate_up();
                Some(ScreenAction::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                navigable.navigate_down();
                Some(ScreenAction::None)
            }
            KeyCode::Home => {
                navigable.navigate_to_first();
                Some(ScreenAction::SetStatus("First session".to_string()))
            }
            KeyCode::End => {
                navigable.navigate_to_last();
                Some(ScreenAction::SetStatus("Last session".to_string()))
            }
            _ => None,
        }
    }

    /// Handle form navigation and input
    pub fn handle_form_keys<T: FormHandler>(
        form: &mut T,
        key: KeyEvent,
    ) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Tab => {
                form.next_field();
                Some(ScreenAction::None)
            }
            KeyCode::BackTab => {
                form.previous_field();
                Some(ScreenAction::None)
            }
            KeyCode::Enter => Some(ScreenAction::Submit),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.handle_char_input(c);
                Some(ScreenAction::None)
            }
            KeyCode::Backspace => {
                form.handle_backspace();
                Some(ScreenAction::None)
            }
            KeyCode::Delete => {
                form.handle_delete();
                Some(ScreenAction::None)
            }
            _ => None,
        }
    }

    /// Handle global application keys
    pub fn handle_global_keys(key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(ScreenAction::Quit)
            }
            KeyCode::F(1) => Some(ScreenAction::ToggleHelp),
            _ => None,
        }
    }
}
