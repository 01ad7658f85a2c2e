//! Following a growing log file.
//!
//! Uses the notify crate for change events and reads whatever was appended
//! since the last read, one line at a time.
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Tails a single file and yields complete lines as they are appended.
pub struct LogFollower {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
    offset: u64,
    // Bytes after the last newline; may end inside a UTF-8 sequence.
    partial: Vec<u8>,
}

impl LogFollower {
    /// Follow `path` from its first byte.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        Self::from_offset(path, debounce, 0)
    }

    /// Follow `path`, treating the first `offset` bytes as already read.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn from_offset(
        path: impl AsRef<Path>,
        debounce: Duration,
        offset: u64,
    ) -> notify::Result<Self> {
        // Event paths from the OS are canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target_path.display(), offset, "following log file");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
            offset,
            partial: Vec::new(),
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Bytes consumed so far.
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns true once a debounced file change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut saw_relevant_event = false;
        let mut total_events = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total_events += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => saw_relevant_event = true,
                Ok(ev) => {
                    crate::perf::log_event(
                        "watcher.irrelevant",
                        format!("kind={:?} paths={:?}", ev.kind, ev.paths),
                    );
                }
                Err(err) => {
                    tracing::warn!(%err, "log watcher error");
                }
            }
        }

        if total_events > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "total={total_events} relevant={saw_relevant_event} target={}",
                    self.target_path.display(),
                ),
            );
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    /// Complete lines appended since the last read.
    ///
    /// A trailing fragment without a newline is held back until its newline
    /// arrives. If the file shrank it is read again from the start.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn read_new_lines(&mut self) -> io::Result<Vec<String>> {
        let mut file = File::open(&self.target_path)?;
        let len = file.metadata()?.len();
        if len < self.offset {
            tracing::debug!(len, offset = self.offset, "log file truncated; rereading");
            self.offset = 0;
            self.partial.clear();
        }
        file.seek(SeekFrom::Start(self.offset))?;
        let mut bytes = Vec::new();
        let read = file.read_to_end(&mut bytes)?;
        self.offset += read as u64;

        self.partial.extend_from_slice(&bytes);
        let end = complete_len(&self.partial);
        if end == 0 {
            return Ok(Vec::new());
        }
        let rest = self.partial.split_off(end);
        let complete = std::mem::replace(&mut self.partial, rest);
        Ok(decode_lines(&complete))
    }

    /// New lines once a debounced change is ready, otherwise nothing.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn poll(&mut self) -> io::Result<Vec<String>> {
        if self.take_change_ready() {
            self.read_new_lines()
        } else {
            Ok(Vec::new())
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

/// Length of the prefix of `bytes` that ends in a newline, or 0.
pub fn complete_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |last| last + 1)
}

/// Decode `bytes` into lines, dropping `\r\n` and `\n` endings.
/// Invalid UTF-8 becomes U+FFFD.
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
