//! Screen layout: title bar, dialogue pane and status bar.

use crate::view::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::dialogue_pane::DialoguePane;
use crate::view::styles::DialogueStyles;
use crate::view_state::DialogueViewState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar.
    pub header: Rect,
    /// Bordered dialogue pane.
    pub pane: Rect,
    /// Dialogue content inside the pane border.
    pub dialogue: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into header, bordered pane and status bar.
pub fn calculate_areas(frame_area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    let pane = chunks[1];
    let dialogue = pane_block().inner(pane);

    ScreenAreas {
        header: chunks[0],
        pane,
        dialogue,
        status: chunks[2],
    }
}

fn pane_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &DialogueViewState, title: &str, styles: &DialogueStyles) {
    let areas = calculate_areas(frame.area());

    let header = Paragraph::new(Line::from(format!(" Magic Words · {title}"))).style(styles.header);
    frame.render_widget(header, areas.header);

    frame.render_widget(pane_block(), areas.pane);
    frame.render_widget(DialoguePane::new(state, styles), areas.dialogue);

    let status = Paragraph::new(Line::from(status_text(state))).style(styles.status);
    frame.render_widget(status, areas.status);
}

/// Status line text: position, mode, image counts and key hints.
pub fn status_text(state: &DialogueViewState) -> String {
    let scroll = state.scroll();
    let percent = (scroll.progress() * 100.0).round() as i64;
    let catalog = state.catalog();
    let failed = if catalog.failed_count() > 0 {
        format!(" ({} failed)", catalog.failed_count())
    } else {
        String::new()
    };
    format!(
        " {percent:>3}% · offset {:.0} · {} · images {}{failed} · j/k scroll · q quit",
        scroll.offset(),
        scroll.mode().label(),
        catalog.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DialogueEntry, DialogueSet};
    use crate::view_state::{CellMeasurer, LayoutMetrics, ScrollConfig};
    use std::collections::HashMap;

    #[test]
    fn areas_reserve_header_border_and_status() {
        let areas = calculate_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.header, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));
        assert_eq!(areas.pane, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.dialogue, Rect::new(1, 2, 78, 20));
    }

    #[test]
    fn tiny_frame_does_not_panic() {
        let areas = calculate_areas(Rect::new(0, 0, 1, 1));
        assert_eq!(areas.dialogue.width, 0);
    }

    #[test]
    fn status_reports_position_and_mode() {
        let entries = vec![DialogueEntry::new("A", "b", None)];
        let mut state = DialogueViewState::new(
            DialogueSet::new(entries, HashMap::new()),
            LayoutMetrics::terminal(),
            CellMeasurer,
            ScrollConfig::default(),
        );
        state.set_viewport(20.0, 10.0);
        let text = status_text(&state);
        assert!(text.contains("  0%"), "{text}");
        assert!(text.contains("idle"), "{text}");
        assert!(text.contains("images 0"), "{text}");
    }
}
