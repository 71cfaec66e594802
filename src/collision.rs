/// Axis-aligned bounding-box collisions between the ship, projectiles,
/// enemies and pickups.

use rand::Rng;

use crate::constants::{KILL_DROP_CHANCE, KILL_SCORE};
use crate::entities::{Enemy, GamePhase, GameState, PowerUp, Projectile, Ship};
use crate::power_ups;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

pub trait Hitbox {
    fn hitbox(&self) -> Rect;

    fn hits(&self, other: &impl Hitbox) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

macro_rules! impl_hitbox {
    ($($ty:ty),*) => {$(
        impl Hitbox for $ty {
            fn hitbox(&self) -> Rect {
                Rect { x: self.x, y: self.y, width: self.width, height: self.height }
            }
        }
    )*};
}

impl_hitbox!(Ship, Projectile, Enemy, PowerUp);

/// Resolve every collision for this tick.
///
/// Stores are filtered through keep-masks and compacted once, so a removal
/// never shifts an element out from under the loop.
pub fn resolve_collisions(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    // ── 1. Projectiles ↔ enemies ─────────────────────────────────────────────
    let mut projectile_alive = vec![true; next.projectiles.len()];
    let mut enemy_alive = vec![true; next.enemies.len()];
    let mut drops: Vec<PowerUp> = Vec::new();

    for (pi, projectile) in next.projectiles.iter().enumerate() {
        let target = next
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| enemy_alive[*ei] && projectile.hits(*enemy));
        if let Some((ei, enemy)) = target {
            projectile_alive[pi] = false;
            enemy_alive[ei] = false;
            next.progress.score += KILL_SCORE;
            if rng.gen::<f64>() < KILL_DROP_CHANCE {
                drops.push(power_ups::roll_power_up(
                    rng,
                    next.width,
                    Some((enemy.x, enemy.y)),
                ));
            }
        }
    }

    next.projectiles = compact(next.projectiles, &projectile_alive);
    next.enemies = compact(next.enemies, &enemy_alive);
    next.power_ups.extend(drops);

    // ── 2. Ship ↔ enemies ────────────────────────────────────────────────────
    let mut enemy_alive = vec![true; next.enemies.len()];
    let mut rammed = false;
    for (ei, enemy) in next.enemies.iter().enumerate() {
        if !next.ship.hits(enemy) {
            continue;
        }
        if next.ship.is_invincible {
            enemy_alive[ei] = false;
            next.progress.score += KILL_SCORE;
        } else {
            rammed = true;
            break;
        }
    }
    if rammed {
        tracing::info!(score = next.progress.score, "ship destroyed, game over");
        next.phase = GamePhase::GameOver;
        power_ups::clear_all(&mut next);
        return next;
    }
    next.enemies = compact(next.enemies, &enemy_alive);

    // ── 3. Ship ↔ pickups ────────────────────────────────────────────────────
    let ship = next.ship.clone();
    let (collected, falling): (Vec<PowerUp>, Vec<PowerUp>) =
        next.power_ups.drain(..).partition(|p| ship.hits(p));
    next.power_ups = falling;
    for pickup in collected {
        power_ups::activate(&mut next, pickup.kind, now_ms);
    }

    next
}

fn compact<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &alive)| alive.then_some(item))
        .collect()
}
