//! Line layout for dialogue rows.
//!
//! Turns one dialogue entry's tokens into a [`Row`] of positioned text, glyph
//! and avatar elements, word-wrapped under a maximum width, and stacks rows
//! into a [`ContentModel`].
//!
//! # Wrapping
//! A piece moves to the next line only when the current line already holds
//! content (`line_x > 0`) and the piece would overflow the wrap width. The
//! first piece of a line is always accepted, so an oversized word overflows
//! instead of looping. A whitespace piece that triggers a wrap is consumed
//! by the break.

use crate::catalog::{ImageCatalog, ImageHandle};
use crate::model::{AssetKind, AvatarPosition, AvatarSpec, DialogueEntry, DialogueSet, Token};
use crate::parser::split_runs;
use std::collections::BTreeSet;

use super::layout_params::LayoutMetrics;
use super::measure::TextMeasurer;

/// What a positioned element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A word, whitespace run or speaker label.
    Text,
    /// An inline glyph icon.
    Glyph,
    /// The row's avatar icon.
    Avatar,
}

/// Content attached to a positioned element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementPayload {
    /// Dialogue text piece.
    Text(String),
    /// Speaker label text.
    Speaker(String),
    /// Resolved glyph or avatar image.
    Image(ImageHandle),
}

/// An element placed in row-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    /// Element kind.
    pub kind: ElementKind,
    /// Left edge relative to the row.
    pub x: f64,
    /// Top edge relative to the row.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// What to draw.
    pub payload: ElementPayload,
}

impl PositionedElement {
    /// Text content for text elements.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            ElementPayload::Text(text) | ElementPayload::Speaker(text) => Some(text),
            ElementPayload::Image(_) => None,
        }
    }

    /// Image handle for glyph and avatar elements.
    pub fn image(&self) -> Option<&ImageHandle> {
        match &self.payload {
            ElementPayload::Image(handle) => Some(handle),
            _ => None,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// The laid-out block for one dialogue entry.
///
/// # Invariants
/// - `height = max(avatar height if any, line_count * line_height) + row_gap`
/// - element coordinates are relative to the row; `y` places the row in the
///   content model
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Elements in placement order (avatar first when present).
    pub elements: Vec<PositionedElement>,
    /// Offset of the row's top from the top of the content.
    pub y: f64,
    /// Total height including the inter-row gap.
    pub height: f64,
    /// Number of wrapped lines holding at least one element.
    pub line_count: usize,
}

impl Row {
    /// Offset of the line immediately after this row.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Elements of a given kind.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &PositionedElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }
}

/// The complete ordered layout of all rows.
///
/// Rebuilt wholesale when the input, width or catalog changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentModel {
    rows: Vec<Row>,
    total_height: f64,
}

impl ContentModel {
    /// Stack rows top to bottom, assigning each row's `y`.
    pub fn from_rows(mut rows: Vec<Row>) -> Self {
        let mut y = 0.0;
        for row in &mut rows {
            row.y = y;
            y += row.height;
        }
        Self {
            rows,
            total_height: y,
        }
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Sum of all row heights.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Stack laid-out rows into a content model.
pub fn build_content_model(rows: Vec<Row>) -> ContentModel {
    ContentModel::from_rows(rows)
}

/// Lays out dialogue rows against a fixed catalog, measurer and metrics.
///
/// Layout is a pure function of its inputs: calling it again with the same
/// tokens, avatar, width and catalog contents yields an identical row.
pub struct LayoutEngine<'a, C: ?Sized, M: ?Sized> {
    metrics: &'a LayoutMetrics,
    catalog: &'a C,
    measurer: &'a M,
}

impl<'a, C, M> LayoutEngine<'a, C, M>
where
    C: ImageCatalog + ?Sized,
    M: TextMeasurer + ?Sized,
{
    /// Create an engine.
    pub fn new(metrics: &'a LayoutMetrics, catalog: &'a C, measurer: &'a M) -> Self {
        Self {
            metrics,
            catalog,
            measurer,
        }
    }

    /// Lay out one entry.
    ///
    /// `tokens` may be coarse (from `tokenize`) or already split into words;
    /// text runs are split at whitespace boundaries either way.
    ///
    /// A `max_width` that is not a positive finite number disables wrapping:
    /// every element lands on line 0.
    ///
    /// Any glyph the catalog holds may resolve here; [`layout_all`] restricts
    /// glyphs to the set's declared names.
    ///
    /// [`layout_all`]: LayoutEngine::layout_all
    pub fn layout_row(
        &self,
        entry: &DialogueEntry,
        tokens: &[Token],
        avatar: Option<&AvatarSpec>,
        max_width: f64,
    ) -> Row {
        self.place_row(entry, tokens, avatar, None, max_width)
    }

    /// Lay out every entry of a dialogue set and stack the rows.
    ///
    /// A `{name}` reference resolves only when `name` is one of the set's
    /// declared glyph names.
    pub fn layout_all(&self, set: &DialogueSet, tokens: &[Vec<Token>], max_width: f64) -> ContentModel {
        let declared = Some(set.glyph_names());
        let rows = set
            .entries()
            .iter()
            .zip(tokens)
            .map(|(entry, entry_tokens)| {
                self.place_row(entry, entry_tokens, set.avatar_for(entry), declared, max_width)
            })
            .collect();
        build_content_model(rows)
    }

    fn place_row(
        &self,
        entry: &DialogueEntry,
        tokens: &[Token],
        avatar: Option<&AvatarSpec>,
        declared: Option<&BTreeSet<String>>,
        max_width: f64,
    ) -> Row {
        let m = self.metrics;
        let wraps = max_width.is_finite() && max_width > 0.0;
        let max_width = if wraps { max_width } else { 0.0 };

        let reservation = match avatar {
            Some(_) => m.avatar_width + m.avatar_gap,
            None => 0.0,
        };
        let text_origin = match avatar.map(|a| a.position) {
            Some(AvatarPosition::Left) => reservation,
            _ => 0.0,
        };

        let mut elements = Vec::new();

        if let Some(spec) = avatar {
            if let Some(handle) = self.catalog.resolve_image(AssetKind::Avatar, &spec.name) {
                let x = match spec.position {
                    AvatarPosition::Left => 0.0,
                    AvatarPosition::Right => (max_width - m.avatar_width).max(0.0),
                };
                elements.push(PositionedElement {
                    kind: ElementKind::Avatar,
                    x,
                    y: 0.0,
                    width: m.avatar_width,
                    height: m.avatar_height,
                    payload: ElementPayload::Image(handle.clone()),
                });
            }
        }

        let mut cursor = LineCursor {
            x: 0.0,
            line: 0,
            wrap_width: (max_width - reservation).max(0.0),
            wraps,
            last_filled_line: None,
        };

        if m.show_speaker {
            let label = format!("{}:", entry.speaker_name());
            let width = self.measurer.measure_width(&label);
            if let Some((x, line)) = cursor.place(width, false) {
                elements.push(self.text_element(
                    text_origin + x,
                    line,
                    width,
                    ElementPayload::Speaker(label),
                ));
            }
            self.place_text(&mut cursor, &mut elements, text_origin, " ");
        }

        for piece in split_runs(tokens) {
            match &piece {
                Token::TextRun(content) => {
                    self.place_text(&mut cursor, &mut elements, text_origin, content);
                }
                Token::GlyphRef(name) => {
                    // Undeclared or unresolved glyphs collapse to a zero-width gap.
                    if declared.is_some_and(|names| !names.contains(name.as_str())) {
                        continue;
                    }
                    let Some(handle) = self.catalog.resolve_image(AssetKind::Glyph, name) else {
                        continue;
                    };
                    if let Some((x, line)) = cursor.place(m.glyph_width, false) {
                        let line_y = line as f64 * m.line_height;
                        elements.push(PositionedElement {
                            kind: ElementKind::Glyph,
                            x: text_origin + x,
                            y: line_y + (m.line_height - m.glyph_height) / 2.0,
                            width: m.glyph_width,
                            height: m.glyph_height,
                            payload: ElementPayload::Image(handle.clone()),
                        });
                    }
                }
            }
        }

        let line_count = cursor.line_count();
        let text_height = line_count as f64 * m.line_height;
        let avatar_height = if avatar.is_some() {
            m.avatar_height
        } else {
            0.0
        };

        Row {
            elements,
            y: 0.0,
            height: text_height.max(avatar_height) + m.row_gap,
            line_count,
        }
    }

    fn place_text(
        &self,
        cursor: &mut LineCursor,
        elements: &mut Vec<PositionedElement>,
        text_origin: f64,
        content: &str,
    ) {
        let width = self.measurer.measure_width(content);
        let is_space = content.chars().all(char::is_whitespace);
        if let Some((x, line)) = cursor.place(width, is_space) {
            elements.push(self.text_element(
                text_origin + x,
                line,
                width,
                ElementPayload::Text(content.to_string()),
            ));
        }
    }

    fn text_element(&self, x: f64, line: usize, width: f64, payload: ElementPayload) -> PositionedElement {
        PositionedElement {
            kind: ElementKind::Text,
            x,
            y: line as f64 * self.metrics.line_height,
            width,
            height: self.metrics.line_height,
            payload,
        }
    }
}

/// Greedy line-filling cursor.
#[derive(Debug)]
struct LineCursor {
    x: f64,
    line: usize,
    wrap_width: f64,
    wraps: bool,
    last_filled_line: Option<usize>,
}

impl LineCursor {
    /// Reserve `width` on the current line, wrapping first if needed.
    ///
    /// Returns the placement `(x, line)`, or `None` when a whitespace piece
    /// was consumed by the line break.
    fn place(&mut self, width: f64, consumed_by_break: bool) -> Option<(f64, usize)> {
        if self.wraps && self.x > 0.0 && width > 0.0 && self.x + width > self.wrap_width {
            self.x = 0.0;
            self.line += 1;
            if consumed_by_break {
                return None;
            }
        }

        let placed = (self.x, self.line);
        self.x += width;
        self.last_filled_line = Some(self.line);
        Some(placed)
    }

    fn line_count(&self) -> usize {
        self.last_filled_line.map_or(0, |line| line + 1)
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
