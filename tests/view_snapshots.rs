//! Snapshot tests for the dialogue pane
//!
//! Uses insta to pin the terminal rendering of a small dialogue: avatar
//! badge, speaker label, inline glyph symbol and row gaps.

use magic_words::catalog::ImageHandle;
use magic_words::model::{AssetKind, AvatarPosition, AvatarSpec, DialogueEntry, DialogueSet};
use magic_words::view::{ColorConfig, DialoguePane, DialogueStyles};
use magic_words::view_state::{CellMeasurer, DialogueViewState, LayoutMetrics, ScrollConfig};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::collections::HashMap;

// ===== Test Helpers =====

/// Render the pane and number each line so leading spaces survive.
fn render(state: &DialogueViewState, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    let styles = DialogueStyles::with_color_config(ColorConfig::new(false));
    DialoguePane::new(state, &styles).render(area, &mut buffer);

    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            format!("{y}|{}", line.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn two_speaker_state(width: f64, height: f64) -> DialogueViewState {
    let avatars = HashMap::from([(
        "Sheldon".to_string(),
        AvatarSpec::new("Sheldon", AvatarPosition::Left),
    )]);
    let entries = vec![
        DialogueEntry::new("Sheldon", "Hi {win} there", Some("Sheldon".to_string())),
        DialogueEntry::new("Penny", "Hello!", None),
    ];
    let mut state = DialogueViewState::new(
        DialogueSet::new(entries, avatars).with_glyph_names(["win"]),
        LayoutMetrics::terminal(),
        CellMeasurer,
        ScrollConfig::default(),
    );
    state.set_viewport(width, height);
    state.insert_image(ImageHandle::new("win", "https://x/win.png", AssetKind::Glyph));
    state.insert_image(ImageHandle::new("Sheldon", "https://x/sheldon.png", AssetKind::Avatar));
    state
}

#[test]
fn snapshot_dialogue_pane_top() {
    let state = two_speaker_state(30.0, 6.0);
    insta::assert_snapshot!(render(&state, 30, 6), @r"
0| ╭────╮ Sheldon: Hi ★  there
1| │ SH │
2| ╰────╯
3|
4| Penny: Hello!
5|
");
}

#[test]
fn snapshot_dialogue_pane_scrolled() {
    let mut state = two_speaker_state(30.0, 3.0);
    state.scroll_mut().scroll_by(2.0);
    insta::assert_snapshot!(render(&state, 30, 3), @r"
0| ╰────╯
1|
2| Penny: Hello!
");
}

#[test]
fn snapshot_dialogue_pane_unresolved_images() {
    let avatars = HashMap::from([(
        "Sheldon".to_string(),
        AvatarSpec::new("Sheldon", AvatarPosition::Left),
    )]);
    let entries = vec![DialogueEntry::new(
        "Sheldon",
        "Hi {win} there",
        Some("Sheldon".to_string()),
    )];
    let mut state = DialogueViewState::new(
        DialogueSet::new(entries, avatars),
        LayoutMetrics::terminal(),
        CellMeasurer,
        ScrollConfig::default(),
    );
    state.set_viewport(30.0, 4.0);
    insta::assert_snapshot!(render(&state, 30, 4), @r"
0|        Sheldon: Hi  there
1|
2|
3|
");
}
