//! Console styles and per-record overrides.
//!
//! A [`ConsoleStyle`] holds the concrete defaults of one console. Each record
//! carries a [`RecordStyle`] whose `None` fields inherit from whatever the
//! console style is *when the record is drawn*, not when it was written.
//! Decoding a record yields a [`ResolvedStyle`] with every field concrete.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One-byte colour: two bits each of alpha, red, green and blue (`0bAARRGGBB`).
///
/// A colour with zero alpha is *clear*: it paints nothing, and as a record
/// override it means "inherit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(pub u8);

impl Color {
    pub const CLEAR: Self = Self(0x00);
    pub const BLACK: Self = Self(0xC0);
    pub const WHITE: Self = Self(0xFF);
    pub const RED: Self = Self(0xF0);
    pub const GREEN: Self = Self(0xCC);
    pub const BLUE: Self = Self(0xC3);
    pub const YELLOW: Self = Self(0xFC);
    pub const ORANGE: Self = Self(0xF4);
    pub const PURPLE: Self = Self(0xE2);
    pub const CYAN: Self = Self(0xCF);
    pub const MAGENTA: Self = Self(0xF3);
    pub const LIGHT_GRAY: Self = Self(0xEA);
    pub const DARK_GRAY: Self = Self(0xD5);

    /// Quantize an opaque 24-bit colour to two bits per channel.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xC0 | ((r >> 6) << 4) | ((g >> 6) << 2) | (b >> 6))
    }

    pub const fn is_clear(self) -> bool {
        self.0 & 0xC0 == 0
    }

    /// Expand to 8 bits per channel (`0..=3` scaled by 85).
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 4) & 0b11) * 85,
            ((self.0 >> 2) & 0b11) * 85,
            (self.0 & 0b11) * 85,
        )
    }

    /// `None` for clear colours, so callers can treat "clear" and "inherit" alike.
    pub const fn opaque(self) -> Option<Self> {
        if self.is_clear() { None } else { Some(self) }
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        let (r, g, b) = color.rgb();
        Self::Rgb(r, g, b)
    }
}

const COLOR_NAMES: &[(&str, Color)] = &[
    ("clear", Color::CLEAR),
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("yellow", Color::YELLOW),
    ("orange", Color::ORANGE),
    ("purple", Color::PURPLE),
    ("cyan", Color::CYAN),
    ("magenta", Color::MAGENTA),
    ("lightgray", Color::LIGHT_GRAY),
    ("darkgray", Color::DARK_GRAY),
];

/// Error returned when a colour name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown colour {0:?}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        COLOR_NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, color)| *color)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLOR_NAMES.iter().find(|(_, color)| color == self) {
            Some((name, _)) => f.write_str(name),
            None => write!(f, "#{:02x}", self.0),
        }
    }
}

/// Opaque font handle, stored as exactly four bytes in a record.
///
/// The drawing side decides what a handle means; see
/// [`FontBook`](crate::render::FontBook).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FontId(pub u32);

impl FontId {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 4;

    pub const REGULAR: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(2);
    pub const BOLD_ITALIC: Self = Self(3);
    pub const DIM: Self = Self(4);
    pub const UNDERLINED: Self = Self(5);
}

/// Horizontal alignment of a record's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Console-wide default style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    pub text_color: Color,
    /// [`Color::CLEAR`] leaves the area unfilled.
    pub background_color: Color,
    /// `None` lets the drawing side pick its default face.
    pub font: Option<FontId>,
    pub alignment: Alignment,
    /// `true` wraps long text and honours `\n`; `false` shows a single
    /// line ending in an ellipsis when anything is cut off.
    pub word_wrap: bool,
}

impl Default for ConsoleStyle {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            background_color: Color::CLEAR,
            font: None,
            alignment: Alignment::Left,
            word_wrap: true,
        }
    }
}

/// Style overrides stored with one record. `None` means inherit.
///
/// A clear colour is indistinguishable from inherit once written.
///
/// # Example
///
/// ```
/// use ringcon::console::{Alignment, Color, RecordStyle};
///
/// let style = RecordStyle::inherit()
///     .text_color(Color::RED)
///     .alignment(Alignment::Center);
/// assert_eq!(style.word_wrap, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordStyle {
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub font: Option<FontId>,
    pub alignment: Option<Alignment>,
    pub word_wrap: Option<bool>,
}

impl RecordStyle {
    /// Every field inherits from the console.
    pub const fn inherit() -> Self {
        Self {
            text_color: None,
            background_color: None,
            font: None,
            alignment: None,
            word_wrap: None,
        }
    }

    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    #[must_use]
    pub const fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    #[must_use]
    pub const fn font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub const fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = Some(wrap);
        self
    }

    /// Colour overrides that will actually be stored (clear ones dropped).
    pub(crate) const fn stored_colors(&self) -> (Option<Color>, Option<Color>) {
        let text = match self.text_color {
            Some(color) => color.opaque(),
            None => None,
        };
        let background = match self.background_color {
            Some(color) => color.opaque(),
            None => None,
        };
        (text, background)
    }
}

/// Style of a decoded record with inheritance already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    pub text_color: Color,
    pub background_color: Color,
    pub font: Option<FontId>,
    pub alignment: Alignment,
    pub word_wrap: bool,
}

impl From<ConsoleStyle> for ResolvedStyle {
    fn from(style: ConsoleStyle) -> Self {
        Self {
            text_color: style.text_color,
            background_color: style.background_color,
            font: style.font,
            alignment: style.alignment,
            word_wrap: style.word_wrap,
        }
    }
}
