use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update, view};
use crate::watcher::LogFollower;

const FOLLOW_DEBOUNCE: Duration = Duration::from_millis(200);

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the consoles cannot be created, the file cannot
    /// be read, or the terminal fails.
    pub fn run(&self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");
        let model = self.build_model()?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; ringcon requires an interactive terminal")?;
        let result = self.event_loop(&mut terminal, model);
        ratatui::restore();

        result
    }

    fn make_follower(&self, model: &mut Model) -> Option<LogFollower> {
        if !self.watch_enabled {
            return None;
        }
        let path = self.file_path.as_ref()?;
        match LogFollower::from_offset(path, FOLLOW_DEBOUNCE, model.follow_offset) {
            Ok(follower) => Some(follower),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "watch unavailable");
                model.log("Watch unavailable");
                None
            }
        }
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut follower = self.make_follower(&mut model);
        let mut frame_idx: u64 = 0;

        loop {
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                model = update(model, Message::Resize(width, height));
            }

            if let Some(follower) = follower.as_mut() {
                match follower.poll() {
                    Ok(lines) if !lines.is_empty() => {
                        model = update(model, Message::AppendLines(lines));
                        model.follow_offset = follower.offset();
                    }
                    Ok(_) => {}
                    Err(err) => tracing::warn!(%err, "failed to read followed file"),
                }
            }

            // Only draw when a console asked for it or the layout moved.
            if model.needs_draw() {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| view(&model, frame))?;
                model.mark_drawn();
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
            }

            if model.should_quit {
                break;
            }

            let poll_ms = if resize_debouncer.is_pending() { 10 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single draw.
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, event_ms, &mut resize_debouncer)
                    {
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        model = update(model, msg);
                    }
                    if model.should_quit || !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
