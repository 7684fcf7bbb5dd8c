//! View-state layer - layout, scrolling and visible range
//!
//! Turns tokenized dialogue into positioned elements and owns the scroll
//! offset over them. Everything here is host-agnostic: sizes are `f64`
//! layout units (terminal cells for the TUI, pixels elsewhere).
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (RowIndex, Viewport)
//! - `measure`: TextMeasurer - text width collaborator
//! - `layout_params`: LayoutMetrics - fixed sizes shared by every row
//! - `layout`: LayoutEngine, Row, ContentModel - greedy line layout
//! - `scroll`: ScrollController - drag/wheel/inertia state machine
//! - `visible_range`: VisibleRange - rows intersecting the viewport
//! - `dialogue`: DialogueViewState - ties the above together for one document

pub mod dialogue;
pub mod layout;
pub mod layout_params;
pub mod measure;
pub mod scroll;
pub mod types;
pub mod visible_range;

pub use dialogue::DialogueViewState;
pub use layout::{
    build_content_model, ContentModel, ElementKind, ElementPayload, LayoutEngine,
    PositionedElement, Row,
};
pub use layout_params::LayoutMetrics;
pub use measure::{CellMeasurer, FixedAdvanceMeasurer, TextMeasurer};
pub use scroll::{ScrollConfig, ScrollController, ScrollEvent, ScrollMode, ScrollState};
pub use types::{RowIndex, Viewport};
pub use visible_range::{visible_rows, VisibleRange};
