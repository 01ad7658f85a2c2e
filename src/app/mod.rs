//! Demo application and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Keys stand in for three hardware buttons, each with a short and a held
//! action. See [`Message`].

mod event_loop;
mod input;
mod model;
mod update;
mod view;

pub use model::{MINI_CAPACITY, Model};
pub use update::{Message, line_style, update};
pub use view::{main_console_area, mini_console_area, view};

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::console::{Alignment, DEFAULT_CAPACITY};
use crate::watcher::{complete_len, decode_lines};

const WELCOME: &str = "Welcome!\nTry pressing and holding some buttons!";

/// Main application struct that owns the configuration and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    file_path: Option<PathBuf>,
    watch_enabled: bool,
    capacity: usize,
    mini_capacity: usize,
    auto_redraw: bool,
    word_wrap: bool,
    alignment: Alignment,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub const fn new() -> Self {
        Self {
            file_path: None,
            watch_enabled: false,
            capacity: DEFAULT_CAPACITY,
            mini_capacity: MINI_CAPACITY,
            auto_redraw: true,
            word_wrap: true,
            alignment: Alignment::Left,
        }
    }

    /// Load the lines of `path` into the main console at start-up.
    #[must_use]
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Follow the file for appended lines.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_mini_capacity(mut self, capacity: usize) -> Self {
        self.mini_capacity = capacity;
        self
    }

    /// With auto redraw off, changes only show after an explicit redraw.
    #[must_use]
    pub const fn with_auto_redraw(mut self, enabled: bool) -> Self {
        self.auto_redraw = enabled;
        self
    }

    #[must_use]
    pub const fn with_word_wrap(mut self, enabled: bool) -> Self {
        self.word_wrap = enabled;
        self
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Build the start-up state: both consoles, the greeting, and the
    /// file's lines when a file was given.
    ///
    /// # Errors
    ///
    /// Fails when a console cannot be created or the file cannot be read.
    pub fn build_model(&self) -> Result<Model> {
        let mut model = Model::new(self.capacity, self.mini_capacity, self.auto_redraw)
            .context("Failed to create consoles")?;
        model.main.set_word_wrap(self.word_wrap);
        model.main.set_alignment(self.alignment);
        model.log("Program Started");

        if let Some(path) = &self.file_path {
            let (lines, offset) = read_lines(path, self.watch_enabled)?;
            tracing::debug!(path = %path.display(), lines = lines.len(), "loaded log file");
            model = update(model, Message::AppendLines(lines));
            model.follow_offset = offset;
        } else if let Err(err) = model.main.write(WELCOME) {
            tracing::warn!(%err, "welcome line does not fit");
        }
        Ok(model)
    }

    /// Write the surviving main-console history, oldest first, as JSON lines.
    ///
    /// # Errors
    ///
    /// Fails when the model cannot be built or `out` cannot be written.
    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        let model = self.build_model()?;
        let mut records: Vec<_> = model.main.records().collect();
        records.reverse();
        for record in &records {
            serde_json::to_writer(&mut *out, record).context("Failed to encode record")?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Lines of `path` and the byte offset following picks up from.
///
/// When `hold_partial` is set an unterminated last line is left for the
/// follower, so it is written once whole rather than in two pieces.
fn read_lines(path: &Path, hold_partial: bool) -> Result<(Vec<String>, u64)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let end = if hold_partial {
        complete_len(&bytes)
    } else {
        bytes.len()
    };
    Ok((decode_lines(&bytes[..end]), end as u64))
}
