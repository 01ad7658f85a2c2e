use crate::app::Model;
use crate::console::{Alignment, Color, FontId, RecordStyle};

/// All possible events and actions in the application.
///
/// The button messages mirror a three-button device: each button has a
/// short press and a held press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Write a plain greeting
    Up,
    /// Write a line on a grey background
    UpHeld,
    /// Write a fully styled error line
    Select,
    /// Show or hide the event log
    SelectHeld,
    /// Cycle the main console's alignment, font and text colour
    Down,
    /// Clear the main console
    DownHeld,
    /// Request a redraw of both consoles
    Redraw,
    /// Terminal resized
    Resize(u16, u16),
    /// Lines read from the followed file
    AppendLines(Vec<String>),
    Quit,
}

const ALIGNMENTS: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];
const FONTS: [FontId; 4] = [
    FontId::DIM,
    FontId::REGULAR,
    FontId::BOLD,
    FontId::BOLD_ITALIC,
];
const TEXT_COLORS: [Color; 4] = [Color::BLACK, Color::GREEN, Color::ORANGE, Color::PURPLE];

/// Overrides for a line read from a log file: errors in red, warnings in
/// orange, everything else inherits.
pub fn line_style(line: &str) -> RecordStyle {
    if line.starts_with("ERROR") {
        RecordStyle::inherit().text_color(Color::RED)
    } else if line.starts_with("WARN") {
        RecordStyle::inherit().text_color(Color::ORANGE)
    } else {
        RecordStyle::inherit()
    }
}

/// Apply `msg` and return the next state.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Up => {
            write_main(&mut model, "Hello World!", &RecordStyle::inherit());
            model.log("Up Pressed");
        }
        Message::UpHeld => {
            let style = RecordStyle::inherit().background_color(Color::LIGHT_GRAY);
            write_main(&mut model, "Gray area!", &style);
            model.log("Up Held");
        }
        Message::Select => {
            let style = RecordStyle::inherit()
                .text_color(Color::RED)
                .background_color(Color::BLACK)
                .font(FontId::BOLD)
                .alignment(Alignment::Center)
                .word_wrap(true);
            write_main(&mut model, "ERROR: \u{1F4A9} Detected", &style);
            model.log_styled("ERROR!", &RecordStyle::inherit().text_color(Color::RED));
        }
        Message::SelectHeld => {
            model.mini_visible = !model.mini_visible;
            model.layout_changed = true;
        }
        Message::Down => {
            model.style_step += 1;
            let step = model.style_step;
            model.main.set_alignment(ALIGNMENTS[step % ALIGNMENTS.len()]);
            model.main.set_font(Some(FONTS[step % FONTS.len()]));
            model.main.set_text_color(TEXT_COLORS[step % TEXT_COLORS.len()]);
            model.log("Changed Style");
        }
        Message::DownHeld => {
            model.main.clear();
            model.log("Layer Cleared");
        }
        Message::Redraw => {
            model.main.mark_dirty();
            model.mini.mark_dirty();
        }
        Message::Resize(..) => model.layout_changed = true,
        Message::AppendLines(lines) => {
            for line in &lines {
                write_main(&mut model, line, &line_style(line));
            }
        }
        Message::Quit => model.should_quit = true,
    }
    model
}

fn write_main(model: &mut Model, text: &str, style: &RecordStyle) {
    if let Err(err) = model.main.write_styled(text, style) {
        tracing::warn!(%err, "main console rejected line");
    }
}
