//! Record encoding and decoding.
//!
//! A record is laid out forward from its settings byte:
//!
//! ```text
//! [settings][background?][text color?][font x4?][text ...][0x00]
//! ```
//!
//! New records are written *backwards* from the boundary byte, so the old
//! boundary becomes the new record's terminator and a fresh zero lands in
//! front of the settings byte. Reading forward from the boundary therefore
//! visits records newest first, each terminator doubling as the marker
//! before the next (older) settings byte.
//!
//! Settings byte, most significant bit first:
//!
//! ```text
//! 0bABCDEFGH
//!   A   always 1, so a settings byte is never 0x00
//!   B   background colour stored
//!   C   text colour stored
//!   D   font stored
//!   EF  alignment: 00 left, 01 center, 10 right, 11 inherit
//!   GH  word wrap: G=1 inherit, else H is the wrap flag
//! ```

use std::borrow::Cow;

use bitflags::bitflags;

use super::ring::{ReadCursor, RingBuffer, WriteHead};
use super::style::{Alignment, Color, ConsoleStyle, FontId, RecordStyle, ResolvedStyle};

bitflags! {
    /// The per-record settings byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Settings: u8 {
        const MARKER = 0b1000_0000;
        const BACKGROUND = 0b0100_0000;
        const TEXT_COLOR = 0b0010_0000;
        const FONT = 0b0001_0000;
        const ALIGN_CENTER = 0b0000_0100;
        const ALIGN_RIGHT = 0b0000_1000;
        const ALIGN_INHERIT = 0b0000_1100;
        const WRAP_INHERIT = 0b0000_0010;
        const WRAP_ON = 0b0000_0001;
    }
}

const ALIGNMENT_BITS: u8 = 0b0000_1100;

impl Settings {
    fn alignment_bits(alignment: Option<Alignment>) -> Self {
        match alignment {
            Some(Alignment::Left) => Self::empty(),
            Some(Alignment::Center) => Self::ALIGN_CENTER,
            Some(Alignment::Right) => Self::ALIGN_RIGHT,
            None => Self::ALIGN_INHERIT,
        }
    }

    fn wrap_bits(word_wrap: Option<bool>) -> Self {
        match word_wrap {
            Some(false) => Self::empty(),
            Some(true) => Self::WRAP_ON,
            None => Self::WRAP_INHERIT,
        }
    }

    /// Stored alignment, `None` for inherit.
    pub fn alignment(self) -> Option<Alignment> {
        match self.bits() & ALIGNMENT_BITS {
            0b0000 => Some(Alignment::Left),
            0b0100 => Some(Alignment::Center),
            0b1000 => Some(Alignment::Right),
            _ => None,
        }
    }

    /// Stored wrap flag, `None` for inherit.
    pub const fn word_wrap(self) -> Option<bool> {
        if self.contains(Self::WRAP_INHERIT) {
            None
        } else {
            Some(self.contains(Self::WRAP_ON))
        }
    }
}

/// Bytes a record occupies once written, counting the terminator (which
/// reuses the old boundary byte) and the new boundary byte.
///
/// A record can be read back only if this does not exceed the capacity.
pub fn encoded_len(text_len: usize, style: &RecordStyle) -> usize {
    let (text_color, background) = style.stored_colors();
    let mut overhead = 1;
    if style.font.is_some() {
        overhead += FontId::WIDTH;
    }
    if text_color.is_some() {
        overhead += 1;
    }
    if background.is_some() {
        overhead += 1;
    }
    text_len + overhead + 2
}

/// Append one record in front of the boundary and move the boundary.
///
/// Never fails: bytes past the capacity overwrite the oldest history. The
/// caller decides whether an oversized record is acceptable and must not
/// pass text containing zero bytes.
pub fn encode_record(ring: &mut RingBuffer, text: &[u8], style: &RecordStyle) {
    debug_assert!(!text.contains(&0), "record text must not contain NUL");
    let (text_color, background) = style.stored_colors();
    let mut head = WriteHead::at_boundary(ring);
    let mut settings = Settings::MARKER;

    head.put(ring, 0);
    for &byte in text.iter().rev() {
        head.put(ring, byte);
    }
    if let Some(font) = style.font {
        // Lowest byte lands furthest along, so a forward read sees big-endian.
        for byte in font.0.to_le_bytes() {
            head.put(ring, byte);
        }
        settings |= Settings::FONT;
    }
    if let Some(color) = text_color {
        head.put(ring, color.0);
        settings |= Settings::TEXT_COLOR;
    }
    if let Some(color) = background {
        head.put(ring, color.0);
        settings |= Settings::BACKGROUND;
    }
    settings |= Settings::alignment_bits(style.alignment) | Settings::wrap_bits(style.word_wrap);
    head.put(ring, settings.bits());

    ring.write_byte_at(head.index(), 0);
    ring.set_boundary(head.index());
}

/// Outcome of decoding at one cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A whole record; its text is in the scratch buffer.
    Record(ResolvedStyle),
    /// Back at the boundary byte: no older history.
    Boundary,
    /// The record runs into bytes overwritten by newer records.
    Torn,
}

/// Decode the record whose settings byte is under `cursor`.
///
/// The text is copied into `scratch` (cleared first) because it may straddle
/// the physical end of the ring. On [`Decoded::Record`] the cursor is left on
/// the next record's settings byte.
pub fn decode_record(
    ring: &RingBuffer,
    cursor: &mut ReadCursor,
    defaults: &ConsoleStyle,
    scratch: &mut Vec<u8>,
) -> Decoded {
    let capacity = ring.capacity();
    let raw = cursor.read(ring);
    if raw == 0 {
        return Decoded::Boundary;
    }
    let settings = Settings::from_bits_retain(raw);

    let word_wrap = settings.word_wrap().unwrap_or(defaults.word_wrap);
    let alignment = settings.alignment().unwrap_or(defaults.alignment);

    let mut next_byte = || {
        cursor.advance();
        (cursor.travelled() < capacity).then(|| cursor.read(ring))
    };

    let background_color = if settings.contains(Settings::BACKGROUND) {
        let Some(byte) = next_byte() else {
            return Decoded::Torn;
        };
        Color(byte)
    } else {
        defaults.background_color
    };
    let text_color = if settings.contains(Settings::TEXT_COLOR) {
        let Some(byte) = next_byte() else {
            return Decoded::Torn;
        };
        Color(byte)
    } else {
        defaults.text_color
    };
    let font = if settings.contains(Settings::FONT) {
        let mut bytes = [0u8; FontId::WIDTH];
        for slot in &mut bytes {
            let Some(byte) = next_byte() else {
                return Decoded::Torn;
            };
            *slot = byte;
        }
        Some(FontId(u32::from_be_bytes(bytes)))
    } else {
        defaults.font
    };

    scratch.clear();
    loop {
        let Some(byte) = next_byte() else {
            return Decoded::Torn;
        };
        if byte == 0 {
            break;
        }
        scratch.push(byte);
    }
    cursor.advance();

    Decoded::Record(ResolvedStyle {
        text_color,
        background_color,
        font,
        alignment,
        word_wrap,
    })
}

/// Why a replay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Reached the boundary byte; every record was visited.
    Boundary,
    /// Hit a partly overwritten record.
    Torn,
    /// A renderer ran out of rows before history ran out.
    Exhausted,
    /// The scratch buffer could not be allocated; nothing was decoded.
    ScratchUnavailable,
}

/// Forward walk over the records of one ring, newest first.
///
/// Each call to [`Replay::next_record`] decodes one more record into a
/// scratch buffer owned by the replay. Records are never stored anywhere
/// else; walking again means starting a new replay.
#[derive(Debug)]
pub struct Replay<'a> {
    ring: &'a RingBuffer,
    defaults: &'a ConsoleStyle,
    cursor: ReadCursor,
    scratch: Vec<u8>,
    stop: Option<StopReason>,
}

impl<'a> Replay<'a> {
    pub fn new(ring: &'a RingBuffer, defaults: &'a ConsoleStyle) -> Self {
        Self::with_scratch_capacity(ring, defaults, ring.capacity() + 1)
    }

    /// Like [`Replay::new`] but reserving `needed` scratch bytes up front.
    /// A failed reservation leaves the replay stopped with
    /// [`StopReason::ScratchUnavailable`].
    pub(crate) fn with_scratch_capacity(
        ring: &'a RingBuffer,
        defaults: &'a ConsoleStyle,
        needed: usize,
    ) -> Self {
        let mut scratch = Vec::new();
        let stop = if scratch.try_reserve_exact(needed).is_err() {
            tracing::warn!(bytes = needed, "unable to allocate console scratch buffer");
            Some(StopReason::ScratchUnavailable)
        } else {
            None
        };
        Self {
            ring,
            defaults,
            cursor: ReadCursor::after_boundary(ring),
            scratch,
            stop,
        }
    }

    /// Decode the next record, or `None` once the walk has stopped.
    pub fn next_record(&mut self) -> Option<(ResolvedStyle, Cow<'_, str>)> {
        if self.stop.is_some() {
            return None;
        }
        match decode_record(self.ring, &mut self.cursor, self.defaults, &mut self.scratch) {
            Decoded::Record(style) => {
                tracing::trace!(
                    travelled = self.cursor.travelled(),
                    len = self.scratch.len(),
                    "decoded console record"
                );
                Some((style, String::from_utf8_lossy(&self.scratch)))
            }
            Decoded::Boundary => {
                self.stop = Some(StopReason::Boundary);
                None
            }
            Decoded::Torn => {
                tracing::trace!(travelled = self.cursor.travelled(), "torn console record");
                self.stop = Some(StopReason::Torn);
                None
            }
        }
    }

    /// Set once [`Replay::next_record`] has returned `None`.
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }
}

#[cfg(test)]
mod tests;
