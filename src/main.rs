//! Terminal Reaction Room runner (default binary).
//!
//! Drives a [`GameSession`] from crossterm input with a monotonic clock and renders it
//! through the framebuffer renderer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing_subscriber::filter::LevelFilter;

use reaction_room::core::{Clock, GameSession, MonotonicClock, RoomConfig, RoomSnapshot};
use reaction_room::input::{handle_key_event, should_quit, GridCursor};
use reaction_room::term::{FrameBuffer, MissFlash, RoomView, TerminalRenderer, Viewport};
use reaction_room::types::RoomAction;

/// Upper bound on how long input polling blocks while no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed; defaults to one derived from the system time
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,

    /// JSON room configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is in raw mode while playing)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// Write the round history as JSON on exit
    #[arg(long, value_name = "PATH")]
    summary_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RoomConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(seed_from_time);
    let mut session = GameSession::with_config(config, seed).context("invalid room config")?;
    tracing::info!(seed, "session created");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    if let Some(path) = &cli.summary_out {
        write_history(path, &session)?;
    }
    Ok(())
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<RoomConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    RoomConfig::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn write_history(path: &Path, session: &GameSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session.history()).context("serialize history")?;
    std::fs::write(path, json).with_context(|| format!("write summary {}", path.display()))?;
    tracing::info!(rounds = session.history().len(), path = %path.display(), "history written");
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut view = RoomView::default();
    let mut flash = MissFlash::new();
    let mut cursor = GridCursor::new(session.config().rows, session.config().cols);
    let mut snap = RoomSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let now = clock.now_ms();
        session.advance(now);
        for event in session.drain_events() {
            tracing::debug!(?event, "room event");
            flash.observe(&event, now);
        }
        view.set_flash(flash.active(now));

        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&snap, Some((cursor.row(), cursor.col())), viewport, &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until the next timer or the end of a flash.
        let timeout = session
            .next_timer_due()
            .into_iter()
            .chain(flash.due(now))
            .min()
            .map(|due| Duration::from_millis(due.saturating_sub(clock.now_ms())))
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key, &mut cursor) {
                    session.apply_action(action, clock.now_ms());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = view.hit_test(&snap, viewport, mouse.column, mouse.row) {
                    cursor.select(index);
                    session.apply_action(RoomAction::Click(index), clock.now_ms());
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
