/// All game entity types — pure data, plus a few read-only helpers.

use crate::constants::{
    ENEMY_SIZE, POWER_UP_DURATION_MS, POWER_UP_FALL_SPEED, POWER_UP_SIZE, PROJECTILE_HEIGHT,
    PROJECTILE_SPEED, PROJECTILE_WIDTH, SHIP_ACCELERATION, SHIP_MAX_SPEED, SHIP_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Enemies touching the ship are destroyed instead of ending the game.
    Invincibility,
    /// Every shot fires a second projectile to the right of the first.
    DoubleBullets,
    /// Raises the ship's top speed for the effect duration.
    SpeedBoost,
    /// One extra life, kept for good.
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Invincibility,
        PowerUpKind::DoubleBullets,
        PowerUpKind::SpeedBoost,
        PowerUpKind::ExtraLife,
    ];

    pub fn tint(self) -> Tint {
        match self {
            PowerUpKind::Invincibility => Tint::Yellow,
            PowerUpKind::DoubleBullets => Tint::Purple,
            PowerUpKind::SpeedBoost => Tint::Blue,
            PowerUpKind::ExtraLife => Tint::Green,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::DoubleBullets => "Double Bullets",
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::ExtraLife => "Extra Life",
        }
    }

    /// Banner shown while the effect is active.
    pub fn message(self) -> &'static str {
        match self {
            PowerUpKind::Invincibility => "Invincibility Activated!",
            PowerUpKind::DoubleBullets => "Double Bullets Activated!",
            PowerUpKind::SpeedBoost => "Speed Boost Activated!",
            PowerUpKind::ExtraLife => "Extra Life Gained!",
        }
    }
}

/// Display colour of a pickup.  The renderer maps it onto terminal colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Yellow,
    Purple,
    Blue,
    Green,
}

impl Tint {
    pub fn name(self) -> &'static str {
        match self {
            Tint::Yellow => "Yellow",
            Tint::Purple => "Purple",
            Tint::Blue => "Blue",
            Tint::Green => "Green",
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity in canvas pixels per tick.
    pub dx: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub is_invincible: bool,
}

impl Ship {
    /// A ship parked at the bottom centre of a `width` × `height` canvas.
    pub fn spawn(width: f32, height: f32) -> Self {
        Ship {
            x: width / 2.0 - SHIP_SIZE / 2.0,
            y: height - 60.0,
            width: SHIP_SIZE,
            height: SHIP_SIZE,
            dx: 0.0,
            max_speed: SHIP_MAX_SPEED,
            acceleration: SHIP_ACCELERATION,
            is_invincible: false,
        }
    }
}

// ── Projectiles, enemies, pickups ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward distance travelled per tick.
    pub dy: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32) -> Self {
        Projectile {
            x,
            y,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            dy: PROJECTILE_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward distance travelled per tick.
    pub dy: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, dy: f32) -> Self {
        Enemy {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            dy,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub dy: f32,
    pub kind: PowerUpKind,
    pub tint: Tint,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        PowerUp {
            x,
            y,
            width: POWER_UP_SIZE,
            height: POWER_UP_SIZE,
            dy: POWER_UP_FALL_SPEED,
            kind,
            tint: kind.tint(),
        }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// A collected pickup whose effect is still on the clock.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub message: &'static str,
    pub started_ms: u64,
}

impl ActiveEffect {
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        POWER_UP_DURATION_MS.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= POWER_UP_DURATION_MS
    }
}

/// How many timed effects of each variant are currently stacked.
///
/// The base effect is applied when a count leaves zero and reverted when it
/// returns to zero, so overlapping pickups never double-apply or
/// double-revert.  `ExtraLife` is permanent and has no stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectStacks {
    pub invincibility: u32,
    pub double_bullets: u32,
    pub speed_boost: u32,
}

impl EffectStacks {
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Invincibility => self.invincibility,
            PowerUpKind::DoubleBullets => self.double_bullets,
            PowerUpKind::SpeedBoost => self.speed_boost,
            PowerUpKind::ExtraLife => 0,
        }
    }

    pub fn slot_mut(&mut self, kind: PowerUpKind) -> Option<&mut u32> {
        match kind {
            PowerUpKind::Invincibility => Some(&mut self.invincibility),
            PowerUpKind::DoubleBullets => Some(&mut self.double_bullets),
            PowerUpKind::SpeedBoost => Some(&mut self.speed_boost),
            PowerUpKind::ExtraLife => None,
        }
    }
}

// ── Progression ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub spawn_interval_ms: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Pickups currently falling through the playfield.
    pub power_ups: Vec<PowerUp>,
    /// Collected effects in activation order.
    pub active_effects: Vec<ActiveEffect>,
    pub stacks: EffectStacks,
    pub progress: Progression,
    pub phase: GamePhase,
    /// Timestamp of the most recent automatic enemy spawn.
    pub last_enemy_spawn_ms: u64,
    /// Canvas size in pixels.
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn double_bullets_active(&self) -> bool {
        self.stacks.double_bullets > 0
    }
}
