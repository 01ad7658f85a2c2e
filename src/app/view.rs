use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear};

use crate::app::Model;
use crate::console::Color;
use crate::render::ConsoleView;

const MINI_WIDTH: u16 = 30;
const MINI_HEIGHT: u16 = 5;

/// Main console area: the frame inset by one cell.
pub fn main_console_area(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

/// Event log area: a small box centred near the top of the frame.
pub fn mini_console_area(area: Rect) -> Rect {
    let width = MINI_WIDTH.min(area.width);
    let height = MINI_HEIGHT.min(area.height.saturating_sub(1));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + 1.min(area.height),
        width,
        height,
    )
}

pub fn view(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let backdrop = Style::default().bg(ratatui::style::Color::from(Color::DARK_GRAY));
    frame.render_widget(Block::default().style(backdrop), area);
    frame.render_widget(
        ConsoleView::new(&model.main, &model.fonts),
        main_console_area(area),
    );

    if model.mini_visible {
        let mini = mini_console_area(area);
        frame.render_widget(Clear, mini);
        frame.render_widget(ConsoleView::new(&model.mini, &model.fonts), mini);
    }
}
