//! Core view-state newtypes

/// Row index within the content model. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Create a new RowIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// 1-based index for display.
    pub fn display(&self) -> usize {
        self.0 + 1
    }
}

/// Viewport size in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal area of `width x height` cells.
    pub fn from_cells(width: u16, height: u16) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}
