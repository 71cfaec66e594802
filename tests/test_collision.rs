use space_shooter::collision::*;
use space_shooter::compute::{init_state, start_game};
use space_shooter::entities::*;
use space_shooter::power_ups::activate_power_up;

use rand::rngs::mock::StepRng;

fn make_state() -> GameState {
    start_game(&init_state(800.0, 600.0))
}

fn always_rng() -> StepRng {
    StepRng::new(0, 0)
}

fn never_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect { x, y, width, height }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rects_overlap() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&rect(2.0, 2.0, 2.0, 2.0))); // contained
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(-10.0, 0.0, 10.0, 10.0)));
}

#[test]
fn hitbox_matches_entity_bounds() {
    let e = Enemy::new(3.0, 4.0, 1.0);
    assert_eq!(e.hitbox(), rect(3.0, 4.0, 50.0, 50.0));
    let p = Projectile::new(1.0, 2.0);
    assert_eq!(p.hitbox(), rect(1.0, 2.0, 5.0, 10.0));
}

// ── Projectiles ↔ enemies ─────────────────────────────────────────────────────

#[test]
fn projectile_destroys_enemy_and_scores() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(100.0, 100.0, 0.0));
    s.projectiles.push(Projectile::new(120.0, 120.0));
    let s2 = resolve_collisions(&s, 0, &mut never_rng());
    assert!(s2.enemies.is_empty());
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.progress.score, 10);
    assert!(s2.power_ups.is_empty());
}

#[test]
fn destroyed_enemy_may_drop_pickup_at_its_position() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(100.0, 120.0, 0.0));
    s.projectiles.push(Projectile::new(120.0, 130.0));
    let s2 = resolve_collisions(&s, 0, &mut always_rng());
    assert_eq!(s2.power_ups.len(), 1);
    assert_eq!(s2.power_ups[0].x, 100.0);
    assert_eq!(s2.power_ups[0].y, 120.0);
}

#[test]
fn projectile_destroys_only_first_overlapping_enemy() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(100.0, 100.0, 0.0));
    s.enemies.push(Enemy::new(110.0, 100.0, 0.0));
    s.projectiles.push(Projectile::new(120.0, 120.0));
    let s2 = resolve_collisions(&s, 0, &mut never_rng());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 110.0);
    assert_eq!(s2.progress.score, 10);
}

#[test]
fn enemy_destroyed_only_once_by_two_projectiles() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(100.0, 100.0, 0.0));
    s.projectiles.push(Projectile::new(110.0, 120.0));
    s.projectiles.push(Projectile::new(130.0, 120.0));
    let s2 = resolve_collisions(&s, 0, &mut never_rng());
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.projectiles[0].x, 130.0);
    assert_eq!(s2.progress.score, 10);
}

#[test]
fn adjacent_hits_are_all_resolved() {
    let mut s = make_state();
    for x in [0.0, 60.0, 120.0] {
        s.enemies.push(Enemy::new(x, 100.0, 0.0));
        s.projectiles.push(Projectile::new(x + 10.0, 110.0));
    }
    let s2 = resolve_collisions(&s, 0, &mut never_rng());
    assert!(s2.enemies.is_empty());
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.progress.score, 30);
}

#[test]
fn missed_projectiles_and_enemies_survive() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(100.0, 100.0, 0.0));
    s.projectiles.push(Projectile::new(300.0, 120.0));
    let s2 = resolve_collisions(&s, 0, &mut never_rng());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.progress.score, 0);
}

// ── Ship ↔ enemies ────────────────────────────────────────────────────────────

#[test]
fn ship_hit_ends_game_and_clears_effects() {
    let mut s = activate_power_up(&make_state(), PowerUpKind::DoubleBullets, 0);
    s = activate_power_up(&s, PowerUpKind::SpeedBoost, 0);
    s.enemies.push(Enemy::new(380.0, 530.0, 0.0));
    let s2 = resolve_collisions(&s, 10, &mut never_rng());
    assert_eq!(s2.phase, GamePhase::GameOver);
    assert!(s2.active_effects.is_empty());
    assert!(!s2.double_bullets_active());
    assert_eq!(s2.ship.max_speed, 10.0);
    assert_eq!(s2.stacks, EffectStacks::default());
}

#[test]
fn invincible_ship_destroys_enemy() {
    let mut s = activate_power_up(&make_state(), PowerUpKind::Invincibility, 0);
    s.enemies.push(Enemy::new(380.0, 530.0, 0.0));
    s.enemies.push(Enemy::new(0.0, 0.0, 0.0));
    let s2 = resolve_collisions(&s, 10, &mut never_rng());
    assert_eq!(s2.phase, GamePhase::Playing);
    assert_eq!(s2.progress.score, 10);
    assert_eq!(s2.enemies.len(), 1);
    assert!(s2.ship.is_invincible);
}

#[test]
fn game_over_skips_pickup_collection() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(380.0, 530.0, 0.0));
    s.power_ups
        .push(PowerUp::new(PowerUpKind::ExtraLife, 380.0, 540.0));
    let s2 = resolve_collisions(&s, 10, &mut never_rng());
    assert_eq!(s2.phase, GamePhase::GameOver);
    assert_eq!(s2.progress.lives, 3);
}

// ── Ship ↔ pickups ────────────────────────────────────────────────────────────

#[test]
fn ship_collects_pickup() {
    let mut s = make_state();
    s.power_ups
        .push(PowerUp::new(PowerUpKind::SpeedBoost, 390.0, 545.0));
    s.power_ups
        .push(PowerUp::new(PowerUpKind::ExtraLife, 10.0, 10.0));
    let s2 = resolve_collisions(&s, 250, &mut never_rng());
    assert_eq!(s2.power_ups.len(), 1);
    assert_eq!(s2.power_ups[0].kind, PowerUpKind::ExtraLife);
    assert_eq!(s2.ship.max_speed, 15.0);
    assert_eq!(s2.active_effects.len(), 1);
    assert_eq!(s2.active_effects[0].started_ms, 250);
    assert_eq!(s2.active_effects[0].message, "Speed Boost Activated!");
}
