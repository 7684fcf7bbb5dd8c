//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings plus arrow/page keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the key code and modifiers take part in the lookup.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind a key, replacing any previous action for it.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Vim-style scrolling
        bindings.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        bindings.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);

        // Arrow keys
        bindings.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        bindings.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Page navigation
        bindings.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        bindings.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        bindings.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bindings.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bindings.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::PageDown);

        // Application controls
        bindings.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bindings.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_map_vim_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::ScrollToBottom),
            "Uppercase 'G' (shift+g) should jump to the bottom"
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn unbound_key_is_none() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let repeat = KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NUM_LOCK,
        };
        assert_eq!(bindings.get(repeat), Some(KeyAction::ScrollDown));
    }

    #[test]
    fn bind_replaces_existing_action() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollToTop)
        );
    }
}
