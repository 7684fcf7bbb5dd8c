//! Dialogue pane widget.
//!
//! Draws the visible slice of the content model into a terminal area,
//! shifted by the scroll offset and clipped to the area.

use crate::view::styles::{avatar_badge, glyph_symbol, DialogueStyles};
use crate::view_state::{DialogueViewState, ElementKind, ElementPayload, PositionedElement};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Renders a [`DialogueViewState`] at its current offset.
pub struct DialoguePane<'a> {
    state: &'a DialogueViewState,
    styles: &'a DialogueStyles,
}

impl<'a> DialoguePane<'a> {
    /// Create the widget.
    pub fn new(state: &'a DialogueViewState, styles: &'a DialogueStyles) -> Self {
        Self { state, styles }
    }
}

impl Widget for DialoguePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let offset = self.state.offset();
        let padding = self.state.metrics().horizontal_padding;
        let content = self.state.content();
        let clip = Clip::new(area);

        for index in self.state.visible_range().indices() {
            let Some(row) = content.rows().get(index.get()) else {
                continue;
            };
            for element in &row.elements {
                let x = area.x as f64 + padding + element.x;
                let y = area.y as f64 + row.y + element.y + offset;
                self.draw_element(buf, &clip, element, x.round() as i64, y.round() as i64);
            }
        }
    }
}

impl DialoguePane<'_> {
    fn draw_element(&self, buf: &mut Buffer, clip: &Clip, element: &PositionedElement, x: i64, y: i64) {
        let width = element.width.round().max(0.0) as usize;
        match (&element.kind, &element.payload) {
            (ElementKind::Text, ElementPayload::Speaker(label)) => {
                clip.put(buf, x, y, label, width, self.styles.speaker);
            }
            (ElementKind::Text, ElementPayload::Text(text)) => {
                clip.put(buf, x, y, text, width, self.styles.text);
            }
            (ElementKind::Glyph, ElementPayload::Image(handle)) => {
                clip.put(buf, x, y, glyph_symbol(&handle.name), width, self.styles.glyph);
            }
            (ElementKind::Avatar, ElementPayload::Image(handle)) => {
                let height = element.height.round().max(0.0) as usize;
                for (line_index, line) in avatar_badge(&handle.name, width, height).iter().enumerate() {
                    clip.put(buf, x, y + line_index as i64, line, width, self.styles.avatar);
                }
            }
            _ => {}
        }
    }
}

/// Clipping rectangle in signed screen coordinates.
struct Clip {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Clip {
    fn new(area: Rect) -> Self {
        Self {
            left: i64::from(area.left()),
            top: i64::from(area.top()),
            right: i64::from(area.right()),
            bottom: i64::from(area.bottom()),
        }
    }

    /// Write `text` at `(x, y)`, at most `max_width` cells, clipped to the area.
    fn put(&self, buf: &mut Buffer, x: i64, y: i64, text: &str, max_width: usize, style: ratatui::style::Style) {
        if y < self.top || y >= self.bottom || x >= self.right {
            return;
        }

        // Drop the columns that fall left of the area.
        let skip = (self.left - x).max(0) as usize;
        let start = x.max(self.left);
        let visible: String = text.chars().skip(skip).collect();
        let room = (self.right - start) as usize;
        let width = max_width.saturating_sub(skip).min(room);
        if width == 0 || visible.is_empty() {
            return;
        }

        buf.set_stringn(start as u16, y as u16, visible, width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageHandle;
    use crate::model::{AssetKind, AvatarPosition, AvatarSpec, DialogueEntry, DialogueSet};
    use crate::view::styles::ColorConfig;
    use crate::view_state::{CellMeasurer, LayoutMetrics, ScrollConfig};
    use std::collections::HashMap;

    fn render(state: &DialogueViewState, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let styles = DialogueStyles::with_color_config(ColorConfig::new(false));
        DialoguePane::new(state, &styles).render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn view(lines: &[(&str, &str)], avatars: &[(&str, AvatarPosition)]) -> DialogueViewState {
        let avatar_map: HashMap<String, AvatarSpec> = avatars
            .iter()
            .map(|(name, pos)| (name.to_string(), AvatarSpec::new(*name, *pos)))
            .collect();
        let entries = lines
            .iter()
            .map(|(speaker, text)| {
                let avatar = avatar_map.contains_key(*speaker).then(|| speaker.to_string());
                DialogueEntry::new(*speaker, *text, avatar)
            })
            .collect();
        DialogueViewState::new(
            DialogueSet::new(entries, avatar_map).with_glyph_names(["win"]),
            LayoutMetrics::terminal(),
            CellMeasurer,
            ScrollConfig::default(),
        )
    }

    #[test]
    fn renders_speaker_and_text_with_padding() {
        let mut state = view(&[("Penny", "Hi there")], &[]);
        state.set_viewport(30.0, 4.0);
        let screen = render(&state, 30, 4);
        assert_eq!(screen[0], " Penny: Hi there");
    }

    #[test]
    fn renders_resolved_glyph_symbol() {
        let mut state = view(&[("Penny", "ok {win} go")], &[]);
        state.set_viewport(30.0, 4.0);
        state.insert_image(ImageHandle::new("win", "https://x/win.png", AssetKind::Glyph));
        let screen = render(&state, 30, 4);
        // the glyph owns two cells, the symbol fills one
        assert_eq!(screen[0], " Penny: ok ★  go");
    }

    #[test]
    fn offset_scrolls_rows_out_of_view() {
        let mut state = view(&[("A", "one"), ("B", "two"), ("C", "three")], &[]);
        state.set_viewport(20.0, 2.0);
        state.scroll_mut().scroll_by(2.0);
        let screen = render(&state, 20, 2);
        assert_eq!(screen[0], " B: two");
    }

    #[test]
    fn wrapped_text_stays_inside_area() {
        let mut state = view(&[("Sheldon", "alpha beta gamma delta")], &[]);
        state.set_viewport(16.0, 6.0);
        let screen = render(&state, 16, 6);
        assert!(screen.iter().all(|line| line.chars().count() <= 16));
        assert!(screen.iter().filter(|line| !line.is_empty()).count() >= 2);
    }

    #[test]
    fn avatar_badge_drawn_on_left() {
        let mut state = view(&[("Leonard", "hey")], &[("Leonard", AvatarPosition::Left)]);
        state.set_viewport(30.0, 5.0);
        state.insert_image(ImageHandle::new("Leonard", "https://x/l.png", AssetKind::Avatar));
        let screen = render(&state, 30, 5);
        assert_eq!(screen[0], " ╭────╮ Leonard: hey");
        assert_eq!(screen[1], " │ LE │");
        assert_eq!(screen[2], " ╰────╯");
    }

    #[test]
    fn partially_scrolled_avatar_is_clipped() {
        let mut state = view(&[("Leonard", "hey")], &[("Leonard", AvatarPosition::Left)]);
        state.set_viewport(30.0, 2.0);
        state.insert_image(ImageHandle::new("Leonard", "https://x/l.png", AssetKind::Avatar));
        state.scroll_mut().scroll_by(1.0);
        let screen = render(&state, 30, 2);
        assert_eq!(screen[0], " │ LE │");
    }

    #[test]
    fn zero_area_is_a_no_op() {
        let state = view(&[("A", "b")], &[]);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        let styles = DialogueStyles::new();
        DialoguePane::new(&state, &styles).render(area, &mut buf);
    }
}
