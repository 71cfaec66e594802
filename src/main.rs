use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use space_shooter::compute::{fire, init_state, reset_game, start_game, tick};
use space_shooter::config::{Args, GameConfig};
use space_shooter::display;
use space_shooter::input::{Control, HeldKeys};

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file only; the terminal belongs to the game.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: key events are drained at the start of every frame.  One-shot
/// controls (fire, start, restart) act immediately on press; direction keys
/// are sampled as held/not-held when the tick runs.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(config.width, config.height);
    let mut held = HeldKeys::default();
    let clock = Instant::now();
    let frame_time = config.frame_duration();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else {
                continue;
            };
            match held.observe(&key, frame) {
                Some(Control::Quit) => return Ok(()),
                Some(Control::Fire) => state = fire(&state),
                Some(Control::Start) => state = start_game(&state),
                Some(Control::Restart) => {
                    state = reset_game(&state);
                    held.clear();
                }
                Some(Control::MoveLeft) | Some(Control::MoveRight) | None => {}
            }
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        state = tick(&state, held.steering(frame), now_ms, &mut rng);

        display::render(out, &state, now_ms).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (columns, rows) = terminal::size().context("failed to read terminal size")?;
    let config = GameConfig::resolve(args, columns, rows)?;
    init_logging(&config)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        fps = config.fps,
        seed = ?config.seed,
        "starting space shooter"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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
                tracing::warn!(%err, "input reader stopped");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}
