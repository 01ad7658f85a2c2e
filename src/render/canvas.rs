//! Drawing surface abstraction.
//!
//! The console renderer only needs three primitives. [`BufferCanvas`]
//! implements them on a ratatui [`Buffer`]; tests implement them on a
//! recorder.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use super::text::{display_width, layout_lines, line_offset, measure_rows};
use crate::console::{Color, FontId, ResolvedStyle};

/// A surface the console renderer can measure and paint on.
pub trait Canvas {
    /// Rows `text` needs at `width` columns in `style`.
    fn measure(&self, text: &str, style: &ResolvedStyle, width: u16) -> u16;

    /// Paint `rect` with a solid colour.
    fn fill(&mut self, rect: Rect, color: Color);

    /// Draw `text` inside `rect`, skipping its first `skip_rows` rows.
    ///
    /// `skip_rows` is non-zero when the top of a line is scrolled off.
    fn draw_text(&mut self, text: &str, style: &ResolvedStyle, rect: Rect, skip_rows: u16);
}

/// Maps [`FontId`]s onto terminal text modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontBook {
    faces: Vec<Modifier>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self {
            faces: vec![
                Modifier::empty(),
                Modifier::BOLD,
                Modifier::ITALIC,
                Modifier::BOLD | Modifier::ITALIC,
                Modifier::DIM,
                Modifier::UNDERLINED,
            ],
        }
    }
}

impl FontBook {
    /// Add a face and return the id that selects it.
    pub fn register(&mut self, modifier: Modifier) -> FontId {
        let id = u32::try_from(self.faces.len()).unwrap_or(u32::MAX);
        self.faces.push(modifier);
        FontId(id)
    }

    /// Modifier for `font`. Missing and unknown ids draw in the regular face.
    pub fn modifier(&self, font: Option<FontId>) -> Modifier {
        font.and_then(|id| usize::try_from(id.0).ok())
            .and_then(|index| self.faces.get(index).copied())
            .unwrap_or_else(Modifier::empty)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// [`Canvas`] over a ratatui buffer.
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    fonts: &'a FontBook,
}

impl<'a> BufferCanvas<'a> {
    pub const fn new(buf: &'a mut Buffer, fonts: &'a FontBook) -> Self {
        Self { buf, fonts }
    }
}

impl Canvas for BufferCanvas<'_> {
    fn measure(&self, text: &str, style: &ResolvedStyle, width: u16) -> u16 {
        measure_rows(text, width, style.word_wrap)
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let rect = rect.intersection(self.buf.area);
        let bg = ratatui::style::Color::from(color);
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(bg);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, style: &ResolvedStyle, rect: Rect, skip_rows: u16) {
        let text_style = Style::default()
            .fg(ratatui::style::Color::from(style.text_color))
            .add_modifier(self.fonts.modifier(style.font));
        let lines = layout_lines(text, rect.width, style.word_wrap);

        for (row, line) in lines
            .iter()
            .skip(usize::from(skip_rows))
            .take(usize::from(rect.height))
            .enumerate()
        {
            let Ok(row) = u16::try_from(row) else {
                break;
            };
            let x = rect.x + line_offset(display_width(line), rect.width, style.alignment);
            let y = rect.y + row;
            if !self.buf.area.contains(Position { x, y }) {
                continue;
            }
            let room = usize::from(rect.right().saturating_sub(x));
            self.buf.set_stringn(x, y, line, room, text_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Alignment;

    fn style() -> ResolvedStyle {
        ResolvedStyle {
            text_color: Color::BLACK,
            background_color: Color::CLEAR,
            font: None,
            alignment: Alignment::Left,
            word_wrap: true,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_font_book_defaults() {
        let fonts = FontBook::default();
        assert_eq!(fonts.modifier(None), Modifier::empty());
        assert_eq!(fonts.modifier(Some(FontId::BOLD)), Modifier::BOLD);
        assert_eq!(fonts.modifier(Some(FontId::UNDERLINED)), Modifier::UNDERLINED);
        assert_eq!(fonts.modifier(Some(FontId(999))), Modifier::empty());
    }

    #[test]
    fn test_font_book_register_returns_next_id() {
        let mut fonts = FontBook::default();
        let id = fonts.register(Modifier::CROSSED_OUT);
        assert_eq!(id, FontId(6));
        assert_eq!(fonts.modifier(Some(id)), Modifier::CROSSED_OUT);
    }

    #[test]
    fn test_fill_clips_to_buffer() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        let fonts = FontBook::default();
        let mut canvas = BufferCanvas::new(&mut buf, &fonts);
        canvas.fill(Rect::new(2, 1, 10, 10), Color::RED);

        assert_eq!(buf[(3, 1)].bg, ratatui::style::Color::from(Color::RED));
        assert_eq!(buf[(1, 1)].bg, ratatui::style::Color::Reset);
    }

    #[test]
    fn test_draw_text_aligns_right() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        let fonts = FontBook::default();
        let mut canvas = BufferCanvas::new(&mut buf, &fonts);
        let style = ResolvedStyle {
            alignment: Alignment::Right,
            ..style()
        };
        canvas.draw_text("abc", &style, Rect::new(0, 0, 8, 1), 0);

        assert_eq!(row_text(&buf, 0), "     abc");
    }

    #[test]
    fn test_draw_text_skips_rows_scrolled_off() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let fonts = FontBook::default();
        let mut canvas = BufferCanvas::new(&mut buf, &fonts);
        canvas.draw_text("one two", &style(), Rect::new(0, 0, 5, 1), 1);

        assert_eq!(row_text(&buf, 0), "two  ");
    }

    #[test]
    fn test_draw_text_applies_font_modifier() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let fonts = FontBook::default();
        let mut canvas = BufferCanvas::new(&mut buf, &fonts);
        let style = ResolvedStyle {
            font: Some(FontId::BOLD),
            ..style()
        };
        canvas.draw_text("hi", &style, Rect::new(0, 0, 4, 1), 0);

        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
    }
}
