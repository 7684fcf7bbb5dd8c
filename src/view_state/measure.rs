//! Text width measurement.
//!
//! The layout engine never shapes text itself. It asks a [`TextMeasurer`] for
//! the advance width of each word or whitespace piece.

use unicode_width::UnicodeWidthStr;

/// Measures the rendered width of a text piece.
///
/// # Contract
/// - MUST be deterministic for a fixed configuration (layout relies on it)
/// - MUST return a finite, non-negative width
pub trait TextMeasurer {
    /// Width of `text` in layout units.
    fn measure_width(&self, text: &str) -> f64;
}

/// Terminal cell width via `unicode-width` (wide CJK/emoji count as 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure_width(&self, text: &str) -> f64 {
        text.width() as f64
    }
}

/// Every code point advances by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per code point.
    pub advance: f64,
}

impl FixedAdvanceMeasurer {
    /// Create a measurer with the given advance.
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> f64,
{
    fn measure_width(&self, text: &str) -> f64 {
        self(text)
    }
}
