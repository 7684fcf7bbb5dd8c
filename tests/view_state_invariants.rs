//! Invariants of the dialogue view state across resizes, image arrivals and
//! scrolling, driven through the public API with the bundled sample.

use magic_words::catalog::AssetEvent;
use magic_words::model::KeyAction;
use magic_words::source::DocumentSource;
use magic_words::view_state::{
    visible_rows, CellMeasurer, DialogueViewState, ElementKind, LayoutMetrics, ScrollConfig,
};
use proptest::prelude::*;

fn sample_state() -> DialogueViewState {
    let set = DocumentSource::Sample.load().unwrap();
    DialogueViewState::new(set, LayoutMetrics::terminal(), CellMeasurer, ScrollConfig::default())
}

fn assert_clamped(state: &DialogueViewState) {
    let offset = state.offset();
    let min = (state.viewport().height - state.content().total_height()).min(0.0);
    assert!(offset <= 0.0 && offset >= min, "offset {offset} outside [{min}, 0]");
}

fn assert_stacked(state: &DialogueViewState) {
    let mut y = 0.0;
    for row in state.content().rows() {
        assert_eq!(row.y, y);
        y += row.height;
    }
    assert_eq!(state.content().total_height(), y);
}

#[test]
fn sample_rows_stack_without_gaps() {
    let mut state = sample_state();
    state.set_viewport(60.0, 20.0);
    assert_eq!(state.content().rows().len(), state.set().len());
    assert_stacked(&state);
}

#[test]
fn resolving_sample_assets_adds_images_and_keeps_stacking() {
    let mut state = sample_state();
    state.set_viewport(60.0, 20.0);
    let glyphs_before: usize = state
        .content()
        .rows()
        .iter()
        .map(|row| row.elements_of(ElementKind::Glyph).count())
        .sum();
    assert_eq!(glyphs_before, 0);

    let events: Vec<_> = state.set().assets().iter().map(AssetEvent::resolve).collect();
    let failures = events
        .iter()
        .filter(|event| matches!(event, AssetEvent::Failed { .. }))
        .count();
    assert!(state.apply_asset_events(events));

    let glyphs_after: usize = state
        .content()
        .rows()
        .iter()
        .map(|row| row.elements_of(ElementKind::Glyph).count())
        .sum();
    let avatars_after: usize = state
        .content()
        .rows()
        .iter()
        .map(|row| row.elements_of(ElementKind::Avatar).count())
        .sum();
    assert!(glyphs_after > 0);
    assert!(avatars_after > 0);
    assert_eq!(state.catalog().failed_count(), failures);
    assert!(failures >= 2, "sample declares a bad glyph and a bad avatar");
    assert_stacked(&state);
    assert_clamped(&state);
}

#[test]
fn scrolled_to_bottom_stays_clamped_after_widening() {
    let mut state = sample_state();
    state.set_viewport(24.0, 10.0);
    state.handle_key_action(KeyAction::ScrollToBottom, 3.0);
    assert_eq!(state.offset(), state.scroll().min_offset());

    // Wider rows wrap less, so the content shrinks under the offset.
    state.set_viewport(200.0, 10.0);
    assert_clamped(&state);
}

#[test]
fn visible_range_matches_window() {
    let mut state = sample_state();
    state.set_viewport(40.0, 8.0);
    state.handle_key_action(KeyAction::PageDown, 3.0);

    let range = state.visible_range();
    let top = -state.offset();
    let bottom = top + state.viewport().height;
    for (index, row) in state.content().rows().iter().enumerate() {
        let intersects = row.y < bottom && row.bottom() > top;
        let listed = (range.start.get()..range.end.get()).contains(&index);
        assert_eq!(intersects, listed, "row {index} at {}..{}", row.y, row.bottom());
    }
}

#[test]
fn page_down_moves_by_viewport_height() {
    let mut state = sample_state();
    state.set_viewport(40.0, 8.0);
    assert!(state.handle_key_action(KeyAction::PageDown, 3.0));
    assert_eq!(state.offset(), -8.0);
    assert!(state.handle_key_action(KeyAction::PageUp, 3.0));
    assert_eq!(state.offset(), 0.0);
    assert!(!state.handle_key_action(KeyAction::PageUp, 3.0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn offset_clamped_through_resizes(
        sizes in prop::collection::vec((1.0f64..160.0, 1.0f64..60.0), 1..12),
        steps in prop::collection::vec(-20.0f64..20.0, 1..12),
    ) {
        let mut state = sample_state();
        for ((width, height), step) in sizes.iter().zip(steps.iter().cycle()) {
            state.set_viewport(*width, *height);
            state.scroll_mut().scroll_by(*step);
            assert_clamped(&state);
            assert_stacked(&state);

            let range = visible_rows(state.content(), state.offset(), state.viewport().height);
            prop_assert!(range.end.get() <= state.content().rows().len());
            prop_assert!(!range.is_empty());
        }
    }
}
