use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => message_for_key(*key),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }
}

/// Map a key press to a button message.
///
/// Lower-case letters and plain arrows are short presses; upper-case
/// letters and shifted arrows are held presses.
pub(super) fn message_for_key(key: KeyEvent) -> Option<Message> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('u') => Some(Message::Up),
        KeyCode::Char('U') => Some(Message::UpHeld),
        KeyCode::Up if shift => Some(Message::UpHeld),
        KeyCode::Up => Some(Message::Up),
        KeyCode::Char('s') | KeyCode::Enter => Some(Message::Select),
        KeyCode::Char('S') => Some(Message::SelectHeld),
        KeyCode::Char('d') => Some(Message::Down),
        KeyCode::Char('D') => Some(Message::DownHeld),
        KeyCode::Down if shift => Some(Message::DownHeld),
        KeyCode::Down => Some(Message::Down),
        KeyCode::Char('r') => Some(Message::Redraw),
        _ => None,
    }
}
