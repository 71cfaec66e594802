/// Power-up lifecycle: activation, stacking, expiry and clearing.
///
/// Timed variants are reference counted in `GameState::stacks`.  Each pickup
/// keeps its own timer, but the ship or global modifier only changes on the
/// first activation and the last expiry of that variant.

use rand::Rng;

use crate::constants::{POWER_UP_SIZE, SPEED_BOOST_AMOUNT};
use crate::entities::{ActiveEffect, GameState, PowerUp, PowerUpKind};

/// Collect a pickup of `kind` at time `now_ms`.
pub fn activate_power_up(state: &GameState, kind: PowerUpKind, now_ms: u64) -> GameState {
    let mut next = state.clone();
    activate(&mut next, kind, now_ms);
    next
}

/// Drop every effect whose timer has run out, reverting base effects whose
/// stack empties.
pub fn expire_effects(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    let (expired, kept): (Vec<ActiveEffect>, Vec<ActiveEffect>) = next
        .active_effects
        .drain(..)
        .partition(|e| e.is_expired(now_ms));
    next.active_effects = kept;
    for effect in expired {
        tracing::debug!(kind = ?effect.kind, "power-up expired");
        release(&mut next, effect.kind);
    }
    next
}

/// Remove all active effects at once, reverting everything they applied.
pub fn clear_effects(state: &GameState) -> GameState {
    let mut next = state.clone();
    clear_all(&mut next);
    next
}

pub(crate) fn activate(state: &mut GameState, kind: PowerUpKind, now_ms: u64) {
    match state.stacks.slot_mut(kind) {
        Some(count) => {
            *count += 1;
            if *count == 1 {
                apply_base(state, kind);
            }
        }
        None => apply_base(state, kind),
    }
    tracing::debug!(?kind, stacked = state.stacks.count(kind), "power-up activated");
    state.active_effects.push(ActiveEffect {
        kind,
        message: kind.message(),
        started_ms: now_ms,
    });
}

pub(crate) fn clear_all(state: &mut GameState) {
    for kind in PowerUpKind::ALL {
        if state.stacks.count(kind) > 0 {
            revert_base(state, kind);
        }
    }
    state.stacks = Default::default();
    state.active_effects.clear();
}

fn release(state: &mut GameState, kind: PowerUpKind) {
    if let Some(count) = state.stacks.slot_mut(kind) {
        // A clear may already have zeroed the stack.
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            revert_base(state, kind);
        }
    }
}

fn apply_base(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Invincibility => state.ship.is_invincible = true,
        // Driven by the stack count itself.
        PowerUpKind::DoubleBullets => {}
        PowerUpKind::SpeedBoost => state.ship.max_speed += SPEED_BOOST_AMOUNT,
        PowerUpKind::ExtraLife => state.progress.lives += 1,
    }
}

fn revert_base(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Invincibility => state.ship.is_invincible = false,
        PowerUpKind::DoubleBullets => {}
        PowerUpKind::SpeedBoost => state.ship.max_speed -= SPEED_BOOST_AMOUNT,
        PowerUpKind::ExtraLife => {}
    }
}

// ── Pickup creation ───────────────────────────────────────────────────────────

/// A pickup of random variant.  Without coordinates it appears at a random
/// column along the top edge.
pub fn roll_power_up(
    rng: &mut impl Rng,
    canvas_width: f32,
    at: Option<(f32, f32)>,
) -> PowerUp {
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    let (x, y) = at.unwrap_or_else(|| {
        let span = (canvas_width - POWER_UP_SIZE).max(0.0);
        (rng.gen::<f32>() * span, 0.0)
    });
    PowerUp::new(kind, x, y)
}
