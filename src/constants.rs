//! Gameplay tuning.  Distances are canvas pixels, speeds are pixels per tick,
//! times are milliseconds.

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_SIZE: f32 = 50.0;
pub const SHIP_MAX_SPEED: f32 = 10.0;
pub const SHIP_ACCELERATION: f32 = 0.3;
/// Fraction of velocity kept each tick while no direction is held.
pub const SHIP_DAMPING: f32 = 0.9;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_WIDTH: f32 = 5.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const PROJECTILE_SPEED: f32 = 5.0;
/// Horizontal offset of the second double-bullets projectile from ship centre.
pub const DOUBLE_SHOT_OFFSET: f32 = 10.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 50.0;
pub const ENEMY_BASE_SPEED: f32 = 2.0;
pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 1000;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 100;
pub const MIN_SPAWN_INTERVAL_MS: u64 = 500;

// ── Pickups ───────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: f32 = 30.0;
pub const POWER_UP_FALL_SPEED: f32 = 1.0;
pub const POWER_UP_DURATION_MS: u64 = 5000;
/// Chance that a shot-down enemy drops a pickup.
pub const KILL_DROP_CHANCE: f64 = 0.2;
/// Per-tick chance of a pickup appearing on its own.
pub const PERIODIC_DROP_CHANCE: f64 = 0.005;
pub const SPEED_BOOST_AMOUNT: f32 = 5.0;

// ── Progression ───────────────────────────────────────────────────────────────

pub const STARTING_LIVES: u32 = 3;
pub const KILL_SCORE: u32 = 10;
/// Level N ends once the score reaches N × this.
pub const POINTS_PER_LEVEL: u32 = 100;
