//! Visible range calculation

use super::layout::ContentModel;
use super::types::RowIndex;

/// Range of rows visible in the current viewport.
///
/// Computed via binary search on row offsets.
///
/// # Invariants
/// - `start <= end`
/// - `end <= rows.len()`
/// - Every row in range intersects the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// First visible row (inclusive).
    pub start: RowIndex,
    /// One past the last visible row (exclusive).
    pub end: RowIndex,
}

impl VisibleRange {
    /// Create a range.
    pub fn new(start: RowIndex, end: RowIndex) -> Self {
        debug_assert!(start <= end, "VisibleRange start must not exceed end");
        Self { start, end }
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.end.get() - self.start.get()
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible row indices.
    pub fn indices(&self) -> impl Iterator<Item = RowIndex> {
        (self.start.get()..self.end.get()).map(RowIndex::new)
    }

    /// Check if a row is visible.
    pub fn contains(&self, index: RowIndex) -> bool {
        self.start <= index && index < self.end
    }
}

/// Rows intersecting the window `[-offset, -offset + viewport_height)`.
pub fn visible_rows(content: &ContentModel, offset: f64, viewport_height: f64) -> VisibleRange {
    let rows = content.rows();
    if rows.is_empty() || viewport_height.is_nan() || viewport_height <= 0.0 {
        return VisibleRange::default();
    }

    let top = -offset;
    let bottom = top + viewport_height;

    let start = rows.partition_point(|row| row.bottom() <= top);
    let end = rows.partition_point(|row| row.y < bottom).max(start);

    VisibleRange::new(RowIndex::new(start), RowIndex::new(end))
}
