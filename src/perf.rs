//! Opt-in timing and the render debug log.
//!
//! Timing scopes report through `tracing` under the `ringcon::perf` target
//! once enabled. The debug log is a plain file: every line is stamped with
//! the milliseconds since the log was opened, and render passes are numbered.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use ratatui::layout::Rect;

use crate::render::RenderStats;

static TIMING: AtomicBool = AtomicBool::new(false);
static RENDER_LOG: LazyLock<Mutex<Option<RenderLog>>> = LazyLock::new(|| Mutex::new(None));

/// Times a block; reports on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if is_enabled() {
            tracing::info!(
                target: "ringcon::perf",
                scope = self.name,
                elapsed_ms = self.elapsed_ms(),
                "timing"
            );
        }
    }
}

#[derive(Debug)]
struct RenderLog {
    opened: Instant,
    passes: u64,
    writer: BufWriter<File>,
}

impl RenderLog {
    fn create(path: &Path) -> io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "ringcon render debug log start")?;
        writer.flush()?;
        Ok(Self {
            opened: Instant::now(),
            passes: 0,
            writer,
        })
    }

    fn write_line(&mut self, name: &str, detail: &str) -> io::Result<()> {
        let stamp = self.opened.elapsed().as_secs_f64() * 1000.0;
        writeln!(self.writer, "[{stamp:>10.3} ms] {name}: {detail}")?;
        self.writer.flush()
    }
}

// A panic while holding the lock leaves the log usable.
fn render_log() -> MutexGuard<'static, Option<RenderLog>> {
    RENDER_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    TIMING.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    TIMING.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Open the debug log at `path`, or close it with `None`.
///
/// # Errors
/// Returns an error if the file cannot be created. The previous log, if any,
/// stays open in that case.
pub fn set_debug_log_path(path: Option<&Path>) -> io::Result<()> {
    let log = path.map(RenderLog::create).transpose()?;
    *render_log() = log;
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    render_log().is_some()
}

/// Append a free-form event to the debug log, if one is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut guard = render_log();
    let Some(log) = guard.as_mut() else {
        return;
    };
    if let Err(err) = log.write_line(name, detail.as_ref()) {
        tracing::debug!(%err, event = name, "render debug log write failed");
    }
}

/// Record one finished render pass.
pub fn log_render_pass(stats: &RenderStats, area: Rect, elapsed_ms: f64) {
    tracing::trace!(
        target: "ringcon::render",
        records = stats.records,
        rows = stats.rows,
        stop = ?stats.stop,
        width = area.width,
        height = area.height,
        elapsed_ms,
        "render pass"
    );

    let mut guard = render_log();
    let Some(log) = guard.as_mut() else {
        return;
    };
    log.passes += 1;
    let detail = format!(
        "#{} records={} rows={} stop={:?} area={}x{} took={elapsed_ms:.3}ms",
        log.passes, stats.records, stats.rows, stats.stop, area.width, area.height
    );
    if let Err(err) = log.write_line("render.pass", &detail) {
        tracing::debug!(%err, "render debug log write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::StopReason;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_debug_log_records_events_and_numbered_passes() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());

        log_event("test.event", "hello world");
        let stats = RenderStats {
            records: 7,
            rows: 9,
            stop: StopReason::Torn,
        };
        log_render_pass(&stats, Rect::new(0, 0, 33, 11), 0.5);
        set_debug_log_path(None).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("ringcon render debug log start"));
        assert!(content.contains("test.event: hello world"));
        // Other tests may render while the log is open, so only the shape of
        // this pass's line is checked, not its number.
        let pass = content
            .lines()
            .find(|line| line.contains("records=7 rows=9"))
            .unwrap();
        assert!(pass.contains("render.pass: #"));
        assert!(pass.ends_with("stop=Torn area=33x11 took=0.500ms"));
        assert!(!is_debug_log_enabled());
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("render.log");
        assert!(set_debug_log_path(Some(&missing)).is_err());
    }

    #[test]
    fn test_scope_measures_elapsed_time() {
        let timer = scope("test.scope");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.elapsed_ms() >= 1.0);
    }
}
