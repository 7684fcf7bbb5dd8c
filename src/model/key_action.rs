//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move content down by one wheel step (reveal earlier lines). Default: k/↑
    ScrollUp,
    /// Move content up by one wheel step (reveal later lines). Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first dialogue row. Default: g/Home
    ScrollToTop,
    /// Jump to the last dialogue row. Default: G/End
    ScrollToBottom,
    /// Exit the viewer. Default: q/Esc
    Quit,
}

impl KeyAction {
    /// True for actions that move the scroll offset.
    pub fn is_scroll(&self) -> bool {
        !matches!(self, KeyAction::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_not_a_scroll_action() {
        assert!(!KeyAction::Quit.is_scroll());
        assert!(KeyAction::PageDown.is_scroll());
        assert!(KeyAction::ScrollToTop.is_scroll());
    }
}
