//! ringcon - a ring-buffer console demo for the terminal.
//!
//! # Usage
//!
//! ```bash
//! ringcon
//! ringcon --capacity 100 --align center
//! ringcon --watch app.log
//! ringcon --dump app.log
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ringcon::app::{App, MINI_CAPACITY};
use ringcon::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use ringcon::console::{Alignment, DEFAULT_CAPACITY};
use ringcon::perf;

/// A fixed-size console of styled lines, newest at the bottom
#[derive(Parser, Debug)]
#[command(name = "ringcon", version, about, long_about = None)]
struct Cli {
    /// Log file whose lines fill the console
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Follow FILE and show appended lines as they arrive
    #[arg(short, long, requires = "file")]
    watch: bool,

    /// Ring size of the main console in bytes
    #[arg(long, value_name = "BYTES")]
    capacity: Option<usize>,

    /// Ring size of the event-log console in bytes
    #[arg(long, value_name = "BYTES")]
    mini_capacity: Option<usize>,

    /// Only redraw when 'r' is pressed
    #[arg(long)]
    manual_redraw: bool,

    /// Start with word wrap off
    #[arg(long)]
    no_wrap: bool,

    /// Start with this text alignment
    #[arg(long, value_enum)]
    align: Option<Alignment>,

    /// Print the surviving lines as JSON, oldest first, and exit
    #[arg(long)]
    dump: bool,

    /// Enable timing logs
    #[arg(long)]
    perf: bool,

    /// Write render pass events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_tracing(perf_enabled: bool) -> Result<()> {
    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if perf_enabled {
        filter = filter.add_directive("ringcon::perf=info".parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(effective.perf)?;
    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("RINGCON_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            %err,
            path = ?render_debug_log_path,
            "failed to initialize render debug log"
        );
    }

    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    let app = App::new()
        .with_file(cli.file)
        .with_watch(effective.watch)
        .with_capacity(effective.capacity.unwrap_or(DEFAULT_CAPACITY))
        .with_mini_capacity(effective.mini_capacity.unwrap_or(MINI_CAPACITY))
        .with_auto_redraw(!effective.manual_redraw)
        .with_word_wrap(!effective.no_wrap)
        .with_alignment(effective.align.unwrap_or_default());

    if cli.dump {
        return app.dump(&mut std::io::stdout().lock()).context("Dump failed");
    }
    app.run().context("Application error")
}
