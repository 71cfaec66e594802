/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, a timestamp or an RNG handle) and returns a
/// brand-new `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::collision::resolve_collisions;
use crate::constants::{
    DOUBLE_SHOT_OFFSET, ENEMY_BASE_SPEED, ENEMY_SIZE, INITIAL_SPAWN_INTERVAL_MS,
    MIN_SPAWN_INTERVAL_MS, PERIODIC_DROP_CHANCE, POINTS_PER_LEVEL, PROJECTILE_WIDTH,
    SHIP_DAMPING, SPAWN_INTERVAL_STEP_MS, STARTING_LIVES,
};
use crate::entities::{
    EffectStacks, Enemy, GamePhase, GameState, PowerUp, Progression, Projectile, Ship,
};
use crate::input::Steering;
use crate::power_ups::{self, expire_effects};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a `width` × `height` canvas.  The session
/// waits on the start screen until `start_game`.
pub fn init_state(width: f32, height: f32) -> GameState {
    GameState {
        ship: Ship::spawn(width, height),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        active_effects: Vec::new(),
        stacks: EffectStacks::default(),
        progress: Progression {
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
        },
        phase: GamePhase::NotStarted,
        last_enemy_spawn_ms: 0,
        width,
        height,
    }
}

// ── Phase transitions ────────────────────────────────────────────────────────

/// Leave the start screen.  Ignored in any other phase.
pub fn start_game(state: &GameState) -> GameState {
    if state.phase != GamePhase::NotStarted {
        return state.clone();
    }
    tracing::info!("game started");
    GameState {
        phase: GamePhase::Playing,
        ..state.clone()
    }
}

/// Restart after a game over with a completely fresh session.  Ignored in any
/// other phase.
pub fn reset_game(state: &GameState) -> GameState {
    if state.phase != GamePhase::GameOver {
        return state.clone();
    }
    tracing::info!(final_score = state.progress.score, "game restarted");
    GameState {
        phase: GamePhase::Playing,
        ..init_state(state.width, state.height)
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire from the ship's nose.  Double bullets add a second projectile
/// to the right of the first.
pub fn fire(state: &GameState) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    let centre = state.ship.x + state.ship.width / 2.0;
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile::new(centre - PROJECTILE_WIDTH / 2.0, state.ship.y));
    if state.double_bullets_active() {
        projectiles.push(Projectile::new(centre + DOUBLE_SHOT_OFFSET, state.ship.y));
    }
    GameState {
        projectiles,
        ..state.clone()
    }
}

/// Accelerate toward the held direction (left wins when both are held),
/// otherwise coast down, then clamp the ship to the playfield.
pub fn steer_ship(state: &GameState, steering: Steering) -> GameState {
    let ship = &state.ship;
    let dx = if steering.left {
        (ship.dx - ship.acceleration).max(-ship.max_speed)
    } else if steering.right {
        (ship.dx + ship.acceleration).min(ship.max_speed)
    } else {
        ship.dx * SHIP_DAMPING
    };
    let x = (ship.x + dx).clamp(0.0, (state.width - ship.width).max(0.0));
    GameState {
        ship: Ship {
            x,
            dx,
            ..ship.clone()
        },
        ..state.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Add an enemy once the spawn interval has passed, and occasionally a
/// pickup while double bullets are off.
pub fn spawn(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    let mut next = state.clone();

    if now_ms.saturating_sub(next.last_enemy_spawn_ms) > next.progress.spawn_interval_ms {
        let x = rng.gen::<f32>() * (next.width - ENEMY_SIZE).max(0.0);
        let dy = ENEMY_BASE_SPEED + rng.gen::<f32>() * next.progress.level as f32;
        next.enemies.push(Enemy::new(x, 0.0, dy));
        next.last_enemy_spawn_ms = now_ms;
    }

    if !next.double_bullets_active() && rng.gen::<f64>() < PERIODIC_DROP_CHANCE {
        let pickup = power_ups::roll_power_up(rng, next.width, None);
        next.power_ups.push(pickup);
    }

    next
}

// ── Mover ────────────────────────────────────────────────────────────────────

/// Advance projectiles, enemies and pickups by one tick and cull whatever
/// left the playfield.  Each enemy escaping past the bottom costs a life.
pub fn move_entities(state: &GameState) -> GameState {
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile { y: p.y - p.dy, ..p.clone() })
        .filter(|p| p.y >= 0.0)
        .collect();

    let (escaped, enemies): (Vec<Enemy>, Vec<Enemy>) = state
        .enemies
        .iter()
        .map(|e| Enemy { y: e.y + e.dy, ..e.clone() })
        .partition(|e| e.y > state.height);

    let power_ups = state
        .power_ups
        .iter()
        .map(|p| PowerUp { y: p.y + p.dy, ..p.clone() })
        .filter(|p| p.y <= state.height)
        .collect();

    let mut next = GameState {
        projectiles,
        enemies,
        power_ups,
        ..state.clone()
    };

    if !escaped.is_empty() {
        let lost = escaped.len() as u32;
        next.progress.lives = next.progress.lives.saturating_sub(lost);
        tracing::debug!(lost, lives = next.progress.lives, "enemies escaped");
        if next.progress.lives == 0 && next.phase == GamePhase::Playing {
            tracing::info!(score = next.progress.score, "out of lives, game over");
            next.phase = GamePhase::GameOver;
            power_ups::clear_all(&mut next);
        }
    }

    next
}

// ── Progression ──────────────────────────────────────────────────────────────

/// Spawn interval at a given level: 100 ms shorter per level, never below
/// 500 ms.
pub fn spawn_interval_for(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    INITIAL_SPAWN_INTERVAL_MS
        .saturating_sub(steps * SPAWN_INTERVAL_STEP_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// Raise the level for as long as the score has reached `level × 100`.
pub fn apply_level_up(state: &GameState) -> GameState {
    let mut progress = state.progress.clone();
    while progress.score >= progress.level * POINTS_PER_LEVEL {
        progress.level += 1;
        progress.spawn_interval_ms = spawn_interval_for(progress.level);
        tracing::info!(
            level = progress.level,
            spawn_interval_ms = progress.spawn_interval_ms,
            "level up"
        );
    }
    GameState {
        progress,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame at time `now_ms`.  All randomness
/// comes through `rng` so callers control determinism (useful for tests
/// with a seeded RNG).  Outside of `Playing` this returns the state as is.
pub fn tick(
    state: &GameState,
    steering: Steering,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    let next = spawn(state, now_ms, rng);

    // ── 2. Move ──────────────────────────────────────────────────────────────
    let next = steer_ship(&next, steering);
    let next = move_entities(&next);
    if next.phase != GamePhase::Playing {
        return next;
    }

    // ── 3. Collide ───────────────────────────────────────────────────────────
    let next = resolve_collisions(&next, now_ms, rng);
    if next.phase != GamePhase::Playing {
        return next;
    }

    // ── 4. Expire effects & level up ─────────────────────────────────────────
    let next = expire_effects(&next, now_ms);
    apply_level_up(&next)
}
