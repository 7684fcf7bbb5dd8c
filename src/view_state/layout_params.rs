//! Layout metrics shared by every dialogue row.

/// Fixed sizes that shape the layout.
///
/// All values are in abstract layout units: terminal cells for the TUI host,
/// pixels for a pixel host. Two metrics values are equal iff they produce
/// identical layouts for identical inputs, so equality doubles as an
/// invalidation check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Vertical advance per wrapped line.
    pub line_height: f64,
    /// Width of an inline glyph icon.
    pub glyph_width: f64,
    /// Height of an inline glyph icon.
    pub glyph_height: f64,
    /// Width of an avatar icon.
    pub avatar_width: f64,
    /// Height of an avatar icon.
    pub avatar_height: f64,
    /// Space between the avatar and the text block.
    pub avatar_gap: f64,
    /// Space added below every row.
    pub row_gap: f64,
    /// Space removed from each side of the viewport to derive the max width.
    pub horizontal_padding: f64,
    /// Prefix each row with a `"<speaker>:"` label.
    pub show_speaker: bool,
}

impl LayoutMetrics {
    /// Terminal cell metrics. A 2x1 cell glyph is visually square.
    pub const fn terminal() -> Self {
        Self {
            line_height: 1.0,
            glyph_width: 2.0,
            glyph_height: 1.0,
            avatar_width: 6.0,
            avatar_height: 3.0,
            avatar_gap: 1.0,
            row_gap: 1.0,
            horizontal_padding: 1.0,
            show_speaker: true,
        }
    }

    /// Pixel metrics matching a 24px text line with 20px square glyphs.
    pub const fn pixel() -> Self {
        Self {
            line_height: 24.0,
            glyph_width: 20.0,
            glyph_height: 20.0,
            avatar_width: 64.0,
            avatar_height: 64.0,
            avatar_gap: 12.0,
            row_gap: 16.0,
            horizontal_padding: 50.0,
            show_speaker: true,
        }
    }

    /// Same metrics without speaker labels.
    pub const fn without_speaker(mut self) -> Self {
        self.show_speaker = false;
        self
    }

    /// Width available to rows in a viewport of the given width.
    ///
    /// May be zero or negative for tiny viewports; layout treats that as
    /// "no wrapping".
    pub fn max_width_for(&self, viewport_width: f64) -> f64 {
        viewport_width - 2.0 * self.horizontal_padding
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::terminal()
    }
}
