//! Dialogue styling and terminal stand-ins for images.
//!
//! The terminal cannot show bitmaps, so glyphs render as a symbol and
//! avatars as an initials badge.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== DialogueStyles =====

/// Styles for each kind of dialogue element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueStyles {
    /// Speaker label.
    pub speaker: Style,
    /// Dialogue text.
    pub text: Style,
    /// Inline glyph symbol.
    pub glyph: Style,
    /// Avatar badge.
    pub avatar: Style,
    /// Title bar.
    pub header: Style,
    /// Status line.
    pub status: Style,
}

impl DialogueStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles for an explicit color configuration.
    ///
    /// Without colors only text modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                speaker: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                text: Style::default(),
                glyph: Style::default().fg(Color::Yellow),
                avatar: Style::default().fg(Color::Magenta),
                header: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                status: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                speaker: Style::default().add_modifier(Modifier::BOLD),
                text: Style::default(),
                glyph: Style::default(),
                avatar: Style::default(),
                header: Style::default().add_modifier(Modifier::REVERSED),
                status: Style::default(),
            }
        }
    }
}

impl Default for DialogueStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Image stand-ins =====

/// Symbol drawn for a glyph without a dedicated one.
pub const FALLBACK_GLYPH: &str = "◆";

/// Symbol drawn in place of a named glyph image.
pub fn glyph_symbol(name: &str) -> &'static str {
    match name {
        "satisfied" => "☺",
        "intrigued" => "?",
        "neutral" => "•",
        "affirmative" => "✓",
        "laughing" => "☻",
        "win" => "★",
        "sad" => "☹",
        _ => FALLBACK_GLYPH,
    }
}

/// Up to two uppercase initials for a name.
///
/// Multi-word names use the first letter of the first two words; single
/// words use their first two letters.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let letters: String = match words.as_slice() {
        [] => String::new(),
        [word] => word.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    letters.to_uppercase()
}

/// Lines of an avatar badge fitting `width x height` cells.
///
/// Boxes the initials when there is room (at least 4x3), otherwise shows
/// them bare on the first line.
pub fn avatar_badge(name: &str, width: usize, height: usize) -> Vec<String> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let letters = initials(name);

    if width < 4 || height < 3 {
        let line: String = letters.chars().take(width).collect();
        return vec![line];
    }

    let inner = width - 2;
    let label: String = letters.chars().take(inner).collect();
    let label_width = label.chars().count();
    let left = (inner - label_width) / 2;
    let right = inner - label_width - left;

    let mut lines = Vec::with_capacity(height);
    lines.push(format!("╭{}╮", "─".repeat(inner)));
    let middle = (height - 1) / 2;
    for row in 1..height - 1 {
        if row == middle {
            lines.push(format!("│{}{}{}│", " ".repeat(left), label, " ".repeat(right)));
        } else {
            lines.push(format!("│{}│", " ".repeat(inner)));
        }
    }
    lines.push(format!("╰{}╯", "─".repeat(inner)));
    lines
}
