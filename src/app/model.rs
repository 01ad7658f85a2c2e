use crate::console::{
    Alignment, Color, Console, ConsoleError, ConsoleStyle, FontId, RecordStyle,
};
use crate::render::FontBook;

/// Ring size of the event-log console.
pub const MINI_CAPACITY: usize = 100;

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Console the buttons write into
    pub main: Console,
    /// Small event log drawn over the top of the main console
    pub mini: Console,
    pub fonts: FontBook,
    pub mini_visible: bool,
    /// How many times the main console style has been cycled
    pub style_step: usize,
    /// Bytes of the source file already shown
    pub follow_offset: u64,
    /// Something other than console contents changed on screen
    pub layout_changed: bool,
    pub should_quit: bool,
}

impl Model {
    /// Create both consoles: the main one with a white background and the
    /// mini one in white-on-black, centred, hidden.
    ///
    /// # Errors
    ///
    /// Fails when either console cannot be created.
    pub fn new(
        capacity: usize,
        mini_capacity: usize,
        auto_redraw: bool,
    ) -> Result<Self, ConsoleError> {
        let mut main = Console::new(capacity)?.with_auto_redraw(auto_redraw);
        main.set_background_color(Color::WHITE);
        main.set_word_wrap(true);

        let mini = Console::new(mini_capacity)?
            .with_auto_redraw(auto_redraw)
            .with_style(ConsoleStyle {
                text_color: Color::WHITE,
                background_color: Color::BLACK,
                font: Some(FontId::DIM),
                alignment: Alignment::Center,
                word_wrap: true,
            });

        Ok(Self {
            main,
            mini,
            fonts: FontBook::default(),
            mini_visible: false,
            style_step: 0,
            follow_offset: 0,
            layout_changed: true,
            should_quit: false,
        })
    }

    /// Append a line to the event log.
    pub fn log(&mut self, text: &str) {
        self.log_styled(text, &RecordStyle::inherit());
    }

    pub fn log_styled(&mut self, text: &str, style: &RecordStyle) {
        if let Err(err) = self.mini.write_styled(text, style) {
            tracing::warn!(%err, text, "event log rejected line");
        }
    }

    /// Whether the next loop iteration has to draw.
    pub const fn needs_draw(&self) -> bool {
        self.layout_changed || self.main.is_dirty() || (self.mini_visible && self.mini.is_dirty())
    }

    /// Reset every redraw request after a frame was drawn.
    pub const fn mark_drawn(&mut self) {
        self.layout_changed = false;
        self.main.take_dirty();
        self.mini.take_dirty();
    }
}
