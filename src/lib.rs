// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. console::ConsoleError)
    clippy::module_name_repetitions
)]

//! # ringcon
//!
//! A console of styled text lines kept in one fixed-size byte ring.
//!
//! Lines are appended at the front of the ring and the oldest ones are
//! overwritten once it is full. Each line carries only the style fields it
//! overrides; everything else is looked up on the console when the line is
//! drawn, so restyling the console restyles every line that inherits.
//!
//! ## Architecture
//!
//! - **Storage**: [`console`] owns the ring and the byte format.
//! - **Rendering**: [`render`] walks the ring newest first and stacks lines
//!   bottom-up into a ratatui area.
//! - **Demo**: [`app`] is a small Elm-style terminal app driving two consoles.
//!
//! ## Modules
//!
//! - [`console`]: Ring buffer, record codec and the [`console::Console`] API
//! - [`render`]: Bottom-up renderer and the ratatui widget
//! - [`app`]: Demo application loop and state
//! - [`watcher`]: Following an appended-to log file
//! - [`config`]: Saved command-line defaults
//! - [`perf`]: Timing scopes and the render debug log

pub mod app;
pub mod config;
pub mod console;
pub mod perf;
pub mod render;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::console::{Alignment, Color, Console, ConsoleStyle, FontId, RecordStyle};
    pub use crate::render::{ConsoleView, FontBook, render_console};
}
