//! Layout dimension constants for TUI rendering.

/// Height of the title bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for scroll position, mode and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width assumed when the terminal reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;
