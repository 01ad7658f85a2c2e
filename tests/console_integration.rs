use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use ringcon::console::{
    Alignment, Color, Console, ConsoleError, ConsoleStyle, FontId, RecordStyle, ResolvedStyle,
    StopReason,
};
use ringcon::render::{BufferCanvas, ConsoleView, FontBook, render_console};

fn rows(buf: &Buffer) -> Vec<String> {
    (buf.area.top()..buf.area.bottom())
        .map(|y| {
            (buf.area.left()..buf.area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[test]
fn test_small_ring_inherit_line_resolves_to_current_style() {
    let mut console = Console::new(10).unwrap();
    console.write("AB").unwrap();
    let style = ConsoleStyle {
        text_color: Color::PURPLE,
        background_color: Color::YELLOW,
        font: Some(FontId::ITALIC),
        alignment: Alignment::Right,
        word_wrap: false,
    };
    console.set_style(style);

    let records: Vec<_> = console.records().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "AB");
    assert_eq!(records[0].style, ResolvedStyle::from(style));
}

#[test]
fn test_explicit_wrap_with_embedded_newline() {
    let mut console = Console::with_default_capacity().unwrap();
    console
        .write_styled("Hello\nWorld!", &RecordStyle::inherit().word_wrap(true))
        .unwrap();
    console.set_word_wrap(false);
    console.set_alignment(Alignment::Center);

    let record = console.records().next().unwrap();
    assert_eq!(record.text, "Hello\nWorld!");
    assert!(record.style.word_wrap);
    assert_eq!(record.style.alignment, Alignment::Center);

    let area = Rect::new(0, 0, 10, 3);
    let mut buf = Buffer::empty(area);
    ConsoleView::new(&console, &FontBook::default()).render(area, &mut buf);
    assert_eq!(rows(&buf), vec!["", "  Hello", "  World!"]);
}

#[test]
fn test_line_larger_than_ring_is_refused() {
    let mut console = Console::new(10).unwrap();
    let err = console.write("AAAAAAAA").unwrap_err();
    assert!(matches!(err, ConsoleError::RecordTooLarge { capacity: 10, .. }));

    let mut records = console.records();
    assert_eq!(records.by_ref().count(), 0);
    assert_eq!(records.stop_reason(), Some(StopReason::Boundary));
}

#[test]
fn test_restyling_console_restyles_inheriting_lines_only() {
    let mut console = Console::new(128).unwrap();
    console.write("follows").unwrap();
    console
        .write_styled(
            "pinned",
            &RecordStyle::inherit()
                .text_color(Color::BLUE)
                .alignment(Alignment::Left),
        )
        .unwrap();

    console.set_text_color(Color::GREEN);
    console.set_alignment(Alignment::Right);

    let records: Vec<_> = console.records().collect();
    assert_eq!(records[0].style.text_color, Color::BLUE);
    assert_eq!(records[0].style.alignment, Alignment::Left);
    assert_eq!(records[1].style.text_color, Color::GREEN);
    assert_eq!(records[1].style.alignment, Alignment::Right);
}

#[test]
fn test_history_ages_out_and_render_stops_at_torn_line() {
    let mut console = Console::new(40).unwrap();
    for i in 0..20 {
        console.write(&format!("line {i:02}")).unwrap();
    }

    let area = Rect::new(0, 0, 10, 10);
    let mut buf = Buffer::empty(area);
    let fonts = FontBook::default();
    let stats = render_console(&console, &mut BufferCanvas::new(&mut buf, &fonts), area);

    // Each line adds nine bytes, so four fit whole in forty.
    assert_eq!(stats.records, 4);
    assert_eq!(stats.stop, StopReason::Torn);
    let shown = rows(&buf);
    assert_eq!(&shown[6..], &["line 16", "line 17", "line 18", "line 19"]);
}

#[test]
fn test_clear_then_render_shows_only_background() {
    let mut console = Console::new(64).unwrap();
    console.set_background_color(Color::WHITE);
    console.write("gone").unwrap();
    console.clear();

    let area = Rect::new(0, 0, 6, 2);
    let mut buf = Buffer::empty(area);
    let fonts = FontBook::default();
    let stats = render_console(&console, &mut BufferCanvas::new(&mut buf, &fonts), area);

    assert_eq!(stats.records, 0);
    assert_eq!(stats.stop, StopReason::Boundary);
    assert_eq!(rows(&buf), vec!["", ""]);
    assert_eq!(buf[(5, 1)].bg, ratatui::style::Color::from(Color::WHITE));
}

#[test]
fn test_consoles_are_independent() {
    let mut first = Console::new(32).unwrap();
    let mut second = Console::new(32).unwrap();
    first.write("one").unwrap();
    second.set_text_color(Color::RED);

    assert_eq!(second.records().count(), 0);
    assert_eq!(first.records().next().unwrap().style.text_color, Color::BLACK);
}
