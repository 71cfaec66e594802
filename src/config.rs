//! Command-line configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Canvas pixels per terminal column.
pub const PIXELS_PER_COLUMN: f32 = 10.0;
/// Canvas pixels per terminal row (cells are about twice as tall as wide).
pub const PIXELS_PER_ROW: f32 = 20.0;

pub const MIN_CANVAS_WIDTH: f32 = 100.0;
pub const MIN_CANVAS_HEIGHT: f32 = 120.0;
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

#[derive(Parser, Debug, Clone)]
#[command(name = "space_shooter", about = "Arcade space shooter for the terminal")]
pub struct Args {
    /// Canvas width in pixels (defaults to the terminal width × 10).
    #[arg(long)]
    pub width: Option<f32>,

    /// Canvas height in pixels (defaults to the terminal height × 20).
    #[arg(long)]
    pub height: Option<f32>,

    /// Frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for a reproducible session.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (honours RUST_LOG, default level `info`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    CanvasTooSmall { width: f32, height: f32 },
    FpsOutOfRange { fps: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasTooSmall { width, height } => write!(
                f,
                "canvas {width}x{height} is too small (need at least {MIN_CANVAS_WIDTH}x{MIN_CANVAS_HEIGHT})"
            ),
            Self::FpsOutOfRange { fps } => {
                write!(f, "fps {fps} must be between 1 and {MAX_FPS}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl GameConfig {
    /// Resolve `args` against the terminal size (`columns`, `rows`).
    pub fn resolve(args: Args, columns: u16, rows: u16) -> Result<Self, ConfigError> {
        let width = args
            .width
            .unwrap_or(f32::from(columns) * PIXELS_PER_COLUMN);
        let height = args.height.unwrap_or(f32::from(rows) * PIXELS_PER_ROW);

        if !(width >= MIN_CANVAS_WIDTH && height >= MIN_CANVAS_HEIGHT) {
            return Err(ConfigError::CanvasTooSmall { width, height });
        }
        if args.fps == 0 || args.fps > MAX_FPS {
            return Err(ConfigError::FpsOutOfRange { fps: args.fps });
        }

        Ok(GameConfig {
            width,
            height,
            fps: args.fps,
            seed: args.seed,
            log_file: args.log_file,
        })
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}
