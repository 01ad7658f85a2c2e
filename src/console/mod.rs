//! The ring-buffer console.
//!
//! A [`Console`] pairs one fixed-size [`RingBuffer`] with one
//! [`ConsoleStyle`]. Lines are appended with [`Console::write`] or
//! [`Console::write_styled`]; once the ring is full, the oldest lines are
//! silently overwritten. Nothing is ever allocated per line.
//!
//! # Example
//!
//! ```
//! use ringcon::console::{Color, Console, RecordStyle};
//!
//! let mut console = Console::new(64).unwrap();
//! console.write("plain").unwrap();
//! console
//!     .write_styled("alert", &RecordStyle::inherit().text_color(Color::RED))
//!     .unwrap();
//!
//! let texts: Vec<_> = console.records().map(|r| r.text).collect();
//! assert_eq!(texts, ["alert", "plain"]);
//! ```

mod codec;
mod error;
mod ring;
mod style;

pub use codec::{
    Decoded, Replay, Settings, StopReason, decode_record, encode_record, encoded_len,
};
pub use error::ConsoleError;
pub use ring::{ReadCursor, RingBuffer, WriteHead};
pub use style::{
    Alignment, Color, ConsoleStyle, FontId, RecordStyle, ResolvedStyle, UnknownColor,
};

use serde::Serialize;

/// Ring size used by [`Console::with_default_capacity`].
pub const DEFAULT_CAPACITY: usize = 500;

/// Append-only log of styled lines in a fixed byte ring.
#[derive(Debug, Clone)]
pub struct Console {
    ring: RingBuffer,
    style: ConsoleStyle,
    auto_redraw: bool,
    dirty: bool,
}

impl Console {
    /// Create a console with a `capacity`-byte ring and the default style.
    ///
    /// # Errors
    ///
    /// Fails when `capacity` is below two bytes or the ring cannot be
    /// allocated. No partial console is returned.
    pub fn new(capacity: usize) -> Result<Self, ConsoleError> {
        let mut ring = RingBuffer::new(capacity)?;
        ring.reset();
        tracing::debug!(capacity, "created console");
        Ok(Self {
            ring,
            style: ConsoleStyle::default(),
            auto_redraw: true,
            dirty: true,
        })
    }

    /// Create a console with [`DEFAULT_CAPACITY`] bytes.
    ///
    /// # Errors
    ///
    /// Fails when the ring cannot be allocated.
    pub fn with_default_capacity() -> Result<Self, ConsoleError> {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Choose whether mutations mark the console dirty on their own.
    ///
    /// With auto redraw off, callers request redraws with
    /// [`Console::mark_dirty`].
    #[must_use]
    pub const fn with_auto_redraw(mut self, enabled: bool) -> Self {
        self.auto_redraw = enabled;
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: ConsoleStyle) -> Self {
        self.style = style;
        self
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub const fn auto_redraw(&self) -> bool {
        self.auto_redraw
    }

    /// The underlying ring, read-only.
    pub const fn ring(&self) -> &RingBuffer {
        &self.ring
    }

    /// Index of the zero byte in front of the newest line.
    pub const fn boundary_index(&self) -> usize {
        self.ring.boundary_index()
    }

    /// Raw ring contents in storage order.
    pub fn raw_bytes(&self) -> &[u8] {
        self.ring.as_bytes()
    }

    // Redraw scheduling

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Return the dirty flag and reset it.
    pub const fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    const fn touched(&mut self) {
        if self.auto_redraw {
            self.dirty = true;
        }
    }

    // Style

    pub const fn style(&self) -> &ConsoleStyle {
        &self.style
    }

    pub const fn set_style(&mut self, style: ConsoleStyle) {
        self.style = style;
        self.touched();
    }

    pub const fn text_color(&self) -> Color {
        self.style.text_color
    }

    pub const fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
        self.touched();
    }

    pub const fn background_color(&self) -> Color {
        self.style.background_color
    }

    pub const fn set_background_color(&mut self, color: Color) {
        self.style.background_color = color;
        self.touched();
    }

    pub const fn font(&self) -> Option<FontId> {
        self.style.font
    }

    pub const fn set_font(&mut self, font: Option<FontId>) {
        self.style.font = font;
        self.touched();
    }

    pub const fn alignment(&self) -> Alignment {
        self.style.alignment
    }

    pub const fn set_alignment(&mut self, alignment: Alignment) {
        self.style.alignment = alignment;
        self.touched();
    }

    pub const fn word_wrap(&self) -> bool {
        self.style.word_wrap
    }

    pub const fn set_word_wrap(&mut self, word_wrap: bool) {
        self.style.word_wrap = word_wrap;
        self.touched();
    }

    // History

    /// Drop all history. The style is kept.
    pub fn clear(&mut self) {
        self.ring.reset();
        tracing::debug!(capacity = self.capacity(), "cleared console");
        self.touched();
    }

    /// Append a line that inherits every style field from the console.
    ///
    /// # Errors
    ///
    /// See [`Console::write_styled`].
    pub fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.write_styled(text, &RecordStyle::inherit())
    }

    /// Append a line with per-line style overrides.
    ///
    /// Embedded `\n` is kept verbatim and shown as a line break when the
    /// line wraps.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InteriorNul`] if `text` contains a NUL byte and
    /// [`ConsoleError::RecordTooLarge`] if the encoded line would not fit in
    /// the ring. The history is untouched in both cases.
    pub fn write_styled(&mut self, text: &str, style: &RecordStyle) -> Result<(), ConsoleError> {
        if let Some(position) = text.bytes().position(|b| b == 0) {
            return Err(ConsoleError::InteriorNul { position });
        }
        let needed = encoded_len(text.len(), style);
        let capacity = self.capacity();
        if needed > capacity {
            tracing::warn!(needed, capacity, "rejected console line larger than the ring");
            return Err(ConsoleError::RecordTooLarge { needed, capacity });
        }

        encode_record(&mut self.ring, text.as_bytes(), style);
        tracing::debug!(
            bytes = needed,
            boundary = self.ring.boundary_index(),
            "appended console line"
        );
        self.touched();
        Ok(())
    }

    /// Surviving lines, newest first, resolved against the current style.
    pub fn records(&self) -> Records<'_> {
        Records {
            replay: self.replay(),
        }
    }

    /// Start a raw walk over the history.
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(&self.ring, &self.style)
    }

    #[cfg(test)]
    pub(crate) fn replay_with_scratch(&self, scratch_bytes: usize) -> Replay<'_> {
        Replay::with_scratch_capacity(&self.ring, &self.style, scratch_bytes)
    }
}

/// An owned snapshot of one decoded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub text: String,
    pub style: ResolvedStyle,
}

/// Iterator over [`Console::records`].
#[derive(Debug)]
pub struct Records<'a> {
    replay: Replay<'a>,
}

impl Records<'_> {
    /// Why iteration ended, once it has.
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.replay.stop_reason()
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.replay.next_record().map(|(style, text)| Record {
            text: text.into_owned(),
            style,
        })
    }
}
