//! View-state for a dialogue document.
//!
//! Owns the entries, their tokens, the image catalog, the content model and
//! the scroll controller. The content model is rebuilt wholesale whenever the
//! wrap width, the metrics or the catalog changes; the scroll offset survives
//! every rebuild and is re-clamped against the new content height.

use super::layout::{ContentModel, LayoutEngine};
use super::layout_params::LayoutMetrics;
use super::measure::TextMeasurer;
use super::scroll::{ScrollConfig, ScrollController};
use super::types::Viewport;
use super::visible_range::{visible_rows, VisibleRange};
use crate::catalog::{AssetEvent, ImageHandle, MemoryCatalog};
use crate::model::{DialogueSet, KeyAction, Token};
use crate::parser::tokenize_words;
use std::fmt;
use tracing::debug;

/// Layout and scroll state for one dialogue set.
pub struct DialogueViewState {
    set: DialogueSet,
    tokens: Vec<Vec<Token>>,
    catalog: MemoryCatalog,
    metrics: LayoutMetrics,
    measurer: Box<dyn TextMeasurer + Send>,
    viewport: Viewport,
    max_width: f64,
    content: ContentModel,
    scroll: ScrollController,
}

impl fmt::Debug for DialogueViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueViewState")
            .field("entries", &self.set.len())
            .field("resolved_images", &self.catalog.len())
            .field("viewport", &self.viewport)
            .field("max_width", &self.max_width)
            .field("total_height", &self.content.total_height())
            .field("scroll", &self.scroll.state())
            .finish()
    }
}

impl DialogueViewState {
    /// Tokenize every entry and lay out against an empty viewport.
    pub fn new<M>(set: DialogueSet, metrics: LayoutMetrics, measurer: M, scroll: ScrollConfig) -> Self
    where
        M: TextMeasurer + Send + 'static,
    {
        let tokens = set
            .entries()
            .iter()
            .map(|entry| tokenize_words(entry.raw_text()))
            .collect();

        let mut state = Self {
            set,
            tokens,
            catalog: MemoryCatalog::new(),
            metrics,
            measurer: Box::new(measurer),
            viewport: Viewport::default(),
            max_width: metrics.max_width_for(0.0),
            content: ContentModel::default(),
            scroll: ScrollController::new(scroll),
        };
        state.relayout();
        state
    }

    // === Accessors ===

    /// The dialogue set being shown.
    pub fn set(&self) -> &DialogueSet {
        &self.set
    }

    /// Tokens per entry, in entry order.
    pub fn tokens(&self) -> &[Vec<Token>] {
        &self.tokens
    }

    /// Current content model.
    pub fn content(&self) -> &ContentModel {
        &self.content
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    /// Scroll controller.
    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    /// Mutable scroll controller for pointer and wheel input.
    pub fn scroll_mut(&mut self) -> &mut ScrollController {
        &mut self.scroll
    }

    /// Image catalog.
    pub fn catalog(&self) -> &MemoryCatalog {
        &self.catalog
    }

    /// Layout metrics.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Last viewport pushed by the host.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Wrap width derived from the viewport.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Rows intersecting the viewport at the current offset.
    pub fn visible_range(&self) -> VisibleRange {
        visible_rows(&self.content, self.scroll.offset(), self.viewport.height)
    }

    // === Inputs ===

    /// Push new viewport geometry.
    ///
    /// Relayouts only when the derived max width changes; always re-clamps
    /// against the new height.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }
        debug!(width, height, "Viewport changed");
        self.viewport = viewport;

        let max_width = self.metrics.max_width_for(width);
        if max_width != self.max_width {
            self.max_width = max_width;
            self.relayout();
        } else {
            self.scroll
                .set_bounds(self.viewport.height, self.content.total_height());
        }
    }

    /// Replace layout metrics, relaying out if they differ.
    pub fn set_metrics(&mut self, metrics: LayoutMetrics) {
        if metrics == self.metrics {
            return;
        }
        self.metrics = metrics;
        self.max_width = metrics.max_width_for(self.viewport.width);
        self.relayout();
    }

    /// Add a resolved image. Returns true if the layout was rebuilt.
    pub fn insert_image(&mut self, handle: ImageHandle) -> bool {
        self.apply_asset_events([AssetEvent::Loaded(handle)])
    }

    /// Feed loader results into the catalog; rebuild the layout if any
    /// resolution changed. Returns true if the layout was rebuilt.
    pub fn apply_asset_events<I>(&mut self, events: I) -> bool
    where
        I: IntoIterator<Item = AssetEvent>,
    {
        let mut changed = false;
        for event in events {
            changed |= self.catalog.apply(event);
        }
        if changed {
            self.relayout();
        }
        changed
    }

    /// Apply a keyboard action. Returns true if the offset changed.
    pub fn handle_key_action(&mut self, action: KeyAction, wheel_step: f64) -> bool {
        let before = self.scroll.offset();
        let page = self.viewport.height.max(1.0);
        match action {
            KeyAction::ScrollUp => self.scroll.scroll_by(-wheel_step),
            KeyAction::ScrollDown => self.scroll.scroll_by(wheel_step),
            KeyAction::PageUp => self.scroll.scroll_by(-page),
            KeyAction::PageDown => self.scroll.scroll_by(page),
            KeyAction::ScrollToTop => self.scroll.scroll_to_top(),
            KeyAction::ScrollToBottom => self.scroll.scroll_to_bottom(),
            KeyAction::Quit => {}
        }
        self.scroll.offset() != before
    }

    /// Advance inertia. Returns true while still animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.scroll.tick(dt)
    }

    /// Rebuild the content model from scratch and re-clamp the offset.
    pub fn relayout(&mut self) {
        let engine = LayoutEngine::new(&self.metrics, &self.catalog, self.measurer.as_ref());
        self.content = engine.layout_all(&self.set, &self.tokens, self.max_width);
        self.scroll
            .set_bounds(self.viewport.height, self.content.total_height());
        debug!(
            rows = self.content.rows().len(),
            total_height = self.content.total_height(),
            max_width = self.max_width,
            offset = self.scroll.offset(),
            "Relayout"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetKind, AvatarPosition, AvatarSpec, DialogueEntry};
    use crate::view_state::layout::ElementKind;
    use crate::view_state::measure::FixedAdvanceMeasurer;
    use crate::view_state::scroll::ScrollMode;
    use std::collections::HashMap;

    fn state(lines: &[&str]) -> DialogueViewState {
        let entries = lines
            .iter()
            .map(|text| DialogueEntry::new("Penny", *text, None))
            .collect();
        let set = DialogueSet::new(entries, HashMap::new()).with_glyph_names(["win", "sad"]);
        DialogueViewState::new(
            set,
            LayoutMetrics::terminal().without_speaker(),
            FixedAdvanceMeasurer::new(1.0),
            ScrollConfig::default(),
        )
    }

    fn glyph(name: &str) -> ImageHandle {
        ImageHandle::new(name, format!("https://x/{name}.png"), AssetKind::Glyph)
    }

    #[test]
    fn initial_layout_is_unwrapped() {
        let s = state(&["one two three", "four"]);
        assert_eq!(s.content().rows().len(), 2);
        assert!(s.content().rows().iter().all(|r| r.line_count == 1));
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn narrowing_viewport_wraps_rows() {
        let mut s = state(&["one two three"]);
        // max width 7 - 2 = 5
        s.set_viewport(7.0, 10.0);
        assert_eq!(s.max_width(), 5.0);
        assert_eq!(s.content().rows()[0].line_count, 3);
        // 3 lines + 1 row gap
        assert_eq!(s.content().total_height(), 4.0);
    }

    #[test]
    fn height_only_change_keeps_layout_but_reclamps() {
        let mut s = state(&["a", "b", "c", "d", "e"]);
        s.set_viewport(20.0, 4.0);
        s.scroll_mut().scroll_to_bottom();
        assert_eq!(s.offset(), -6.0);

        let before = s.content().clone();
        s.set_viewport(20.0, 8.0);
        assert_eq!(s.content(), &before);
        assert_eq!(s.offset(), -2.0);
    }

    #[test]
    fn offset_survives_relayout() {
        let mut s = state(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        s.set_viewport(20.0, 4.0);
        s.handle_key_action(KeyAction::ScrollDown, 3.0);
        assert_eq!(s.offset(), -3.0);

        s.set_viewport(30.0, 4.0);
        assert_eq!(s.offset(), -3.0);
    }

    #[test]
    fn loaded_glyph_triggers_relayout() {
        let mut s = state(&["hi {win}"]);
        s.set_viewport(40.0, 10.0);
        let glyphs = |s: &DialogueViewState| {
            s.content().rows()[0]
                .elements_of(ElementKind::Glyph)
                .count()
        };
        assert_eq!(glyphs(&s), 0);

        assert!(s.insert_image(glyph("win")));
        assert_eq!(glyphs(&s), 1);

        // Same image again is not a change.
        assert!(!s.insert_image(glyph("win")));
    }

    #[test]
    fn failed_asset_stays_unresolved() {
        let mut s = state(&["hi {sad}"]);
        let changed = s.apply_asset_events([AssetEvent::Failed {
            name: "sad".to_string(),
            kind: AssetKind::Glyph,
            reason: "404".to_string(),
        }]);
        assert!(changed);
        assert!(s.catalog().is_failed(AssetKind::Glyph, "sad"));
        assert_eq!(
            s.content().rows()[0].elements_of(ElementKind::Glyph).count(),
            0
        );
    }

    #[test]
    fn avatar_arrival_does_not_move_text() {
        let entries = vec![DialogueEntry::new("Leonard", "hello", Some("Leonard".to_string()))];
        let mut avatars = HashMap::new();
        avatars.insert(
            "Leonard".to_string(),
            AvatarSpec::new("Leonard", AvatarPosition::Left),
        );
        let mut s = DialogueViewState::new(
            DialogueSet::new(entries, avatars),
            LayoutMetrics::terminal().without_speaker(),
            FixedAdvanceMeasurer::new(1.0),
            ScrollConfig::default(),
        );
        s.set_viewport(40.0, 10.0);
        let before = s.content().rows()[0].clone();

        s.insert_image(ImageHandle::new("Leonard", "https://x/l.png", AssetKind::Avatar));
        let after = &s.content().rows()[0];

        assert_eq!(after.height, before.height);
        let text = |row: &crate::view_state::layout::Row| {
            row.elements_of(ElementKind::Text).next().map(|e| e.x)
        };
        assert_eq!(text(after), text(&before));
        assert_eq!(after.elements_of(ElementKind::Avatar).count(), 1);
    }

    #[test]
    fn key_actions_move_offset() {
        let mut s = state(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        s.set_viewport(20.0, 4.0);

        assert!(s.handle_key_action(KeyAction::PageDown, 1.0));
        assert_eq!(s.offset(), -4.0);
        assert!(s.handle_key_action(KeyAction::ScrollUp, 1.0));
        assert_eq!(s.offset(), -3.0);
        assert!(s.handle_key_action(KeyAction::ScrollToBottom, 1.0));
        assert_eq!(s.offset(), -12.0);
        assert!(!s.handle_key_action(KeyAction::PageDown, 1.0));
        assert!(s.handle_key_action(KeyAction::ScrollToTop, 1.0));
        assert!(!s.handle_key_action(KeyAction::Quit, 1.0));
        assert_eq!(s.scroll().mode(), ScrollMode::Idle);
    }

    #[test]
    fn visible_range_follows_offset() {
        let mut s = state(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        s.set_viewport(20.0, 4.0);
        assert_eq!(s.visible_range().len(), 2);

        s.handle_key_action(KeyAction::ScrollDown, 4.0);
        let first = s.visible_range().indices().next().map(|i| i.get());
        assert_eq!(first, Some(2));
    }

    #[test]
    fn metrics_change_relayouts() {
        let mut s = state(&["a"]);
        s.set_viewport(20.0, 10.0);
        let with_label = LayoutMetrics::terminal();
        s.set_metrics(with_label);
        assert_eq!(s.content().rows()[0].elements.len(), 3);
    }
}
