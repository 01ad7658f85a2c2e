//! Bottom-up console rendering.
//!
//! The newest line sits at the bottom of the area. Each older line is
//! measured and stacked above it until the area is full, the history ends,
//! or a torn line is reached. Nothing is cached between passes.

pub mod canvas;
pub mod text;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

pub use canvas::{BufferCanvas, Canvas, FontBook};

use crate::console::{Color, Console, Replay, StopReason};
use crate::perf;

/// What one render pass drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Lines drawn, including a partially visible top line.
    pub records: usize,
    /// Rows covered by those lines.
    pub rows: u16,
    pub stop: StopReason,
}

/// Paint `console` into `area` of `canvas`.
///
/// The console background (if not clear) covers the whole area first. Each
/// line then paints its own background (if not clear) over the rows it
/// occupies and its text (if the text colour is not clear) on top. A line
/// taller than the space left is clipped at the top of the area.
pub fn render_console<C: Canvas + ?Sized>(
    console: &Console,
    canvas: &mut C,
    area: Rect,
) -> RenderStats {
    if area.is_empty() {
        return RenderStats {
            records: 0,
            rows: 0,
            stop: StopReason::Exhausted,
        };
    }
    render_replay(console.background_color(), console.replay(), canvas, area)
}

fn render_replay<C: Canvas + ?Sized>(
    background: Color,
    mut replay: Replay<'_>,
    canvas: &mut C,
    area: Rect,
) -> RenderStats {
    let scope = perf::scope("render.console");
    let mut stats = RenderStats {
        records: 0,
        rows: 0,
        stop: StopReason::Exhausted,
    };

    if let Some(stop) = replay.stop_reason() {
        // No scratch buffer: leave the area untouched this pass.
        stats.stop = stop;
        perf::log_render_pass(&stats, area, scope.elapsed_ms());
        return stats;
    }
    if let Some(bg) = background.opaque() {
        canvas.fill(area, bg);
    }

    let top = area.top();
    let mut bottom = area.bottom();
    while bottom > top {
        let Some((style, text)) = replay.next_record() else {
            break;
        };
        let height = canvas.measure(&text, &style, area.width);
        let visible_top = bottom.saturating_sub(height).max(top);
        let skip_rows = height - (bottom - visible_top).min(height);
        let rect = Rect::new(area.x, visible_top, area.width, bottom - visible_top);

        if !rect.is_empty() {
            if let Some(bg) = style.background_color.opaque() {
                canvas.fill(rect, bg);
            }
            if !style.text_color.is_clear() {
                canvas.draw_text(&text, &style, rect, skip_rows);
            }
        }

        stats.records += 1;
        stats.rows += rect.height;
        bottom = visible_top;
    }
    if let Some(stop) = replay.stop_reason() {
        stats.stop = stop;
    }

    perf::log_render_pass(&stats, area, scope.elapsed_ms());
    stats
}

/// Widget drawing a [`Console`] into a ratatui buffer.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleView<'a> {
    console: &'a Console,
    fonts: &'a FontBook,
}

impl<'a> ConsoleView<'a> {
    pub const fn new(console: &'a Console, fonts: &'a FontBook) -> Self {
        Self { console, fonts }
    }
}

impl Widget for ConsoleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(buf, self.fonts);
        render_console(self.console, &mut canvas, area);
    }
}
