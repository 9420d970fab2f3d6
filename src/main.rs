use std::cell::Cell;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;
use scopeguard::defer;

use arena_brawl::compute::{new_session, on_key_down, tick};
use arena_brawl::config::GameConfig;
use arena_brawl::display::{self, Viewport};
use arena_brawl::entities::Session;
use arena_brawl::input::{is_quit, key_for, KeyTracker};

const LOG_FILE: &str = "arena_brawl.log";

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Logging goes to a file: stderr would draw over the alternate screen.
/// Nothing is written unless `RUST_LOG` is set.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

/// Config path from the first argument, else `ARENA_CONFIG`, else defaults.
fn load_config() -> Result<GameConfig> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("ARENA_CONFIG"))
        .map(PathBuf::from);
    match path {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame drains pending key events,
/// applies one-shot key presses, ticks the session with the elapsed time and
/// redraws.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_secs_f64(1.0 / session.config.fps as f64);
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            keys.record(code, kind, frame);
            if kind != KeyEventKind::Press {
                continue;
            }
            if is_quit(code)
                || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
            {
                return Ok(());
            }
            let prev_status = session.status;
            *session = on_key_down(session, key_for(code), &mut rng);
            if session.status != prev_status {
                keys.clear();
            }
        }

        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        *session = tick(session, &keys.input_state(frame), dt, &mut rng);
        display::play_cues(out, &session.cues)?;

        let (cols, rows) = terminal::size()?;
        display::render(out, session, Viewport { cols, rows })?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    info!("starting with {:?}", config);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    // Runs on every exit from here on, including `?` returns and panics.
    // Declared before `out` so the buffer drains before the screen is left.
    let keyboard_enhanced = Cell::new(false);
    defer! {
        let _ = display::restore_terminal(&mut stdout(), keyboard_enhanced.get());
        let _ = terminal::disable_raw_mode();
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    keyboard_enhanced.set(
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok(),
    );

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                warn!("input thread stopped: {err}");
                break;
            }
        }
    });

    let mut session = new_session(config);
    let result = game_loop(&mut out, &mut session, &rx);
    let _ = out.flush();

    info!("exiting with score {}", session.score);
    result.context("game loop failed")
}
