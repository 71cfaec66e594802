/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// canvas-space state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::constants::POWER_UP_DURATION_MS;
use crate::entities::{GamePhase, GameState, PowerUpKind, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_SHIP: Color = Color::White;
const C_SHIP_INVINCIBLE: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Red;
const C_EFFECT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites (half-block renditions of the 10 px pixel patterns) ──────────────

const SHIP_SPRITE: &[&str] = &["▄██▄", "▄▀▀▄"];
const ENEMY_SPRITE: &[&str] = &["▀▄▄▀", "▀██▀"];
const POWER_UP_SPRITE: &[&str] = &["▄█▄", " ▀ "];
const PROJECTILE_SPRITE: &[&str] = &["║"];

const EFFECT_BAR_CELLS: usize = 20;

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Yellow => Color::Yellow,
        Tint::Purple => Color::Magenta,
        Tint::Blue => Color::Blue,
        Tint::Green => Color::Green,
    }
}

/// Maps canvas pixels onto terminal cells.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    columns: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(state: &GameState, columns: u16, rows: u16) -> Self {
        Viewport {
            columns,
            rows,
            scale_x: f32::from(columns) / state.width,
            scale_y: f32::from(rows) / state.height,
        }
    }

    fn cell(&self, x: f32, y: f32) -> (i32, i32) {
        ((x * self.scale_x).floor() as i32, (y * self.scale_y).floor() as i32)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, now_ms: u64) -> std::io::Result<()> {
    let (columns, rows) = terminal::size()?;
    let vp = Viewport::new(state, columns, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.phase {
        GamePhase::NotStarted => draw_start_screen(out, &vp)?,
        GamePhase::Playing => {
            draw_playfield(out, &vp, state)?;
            draw_hud(out, &vp, state)?;
            draw_active_effects(out, &vp, state, now_ms)?;
        }
        GamePhase::GameOver => {
            draw_playfield(out, &vp, state)?;
            draw_hud(out, &vp, state)?;
            draw_game_over(out, &vp, state)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    for enemy in &state.enemies {
        draw_sprite(out, vp, enemy.x, enemy.y, ENEMY_SPRITE, C_ENEMY)?;
    }
    for pickup in &state.power_ups {
        draw_sprite(out, vp, pickup.x, pickup.y, POWER_UP_SPRITE, tint_color(pickup.tint))?;
    }
    for projectile in &state.projectiles {
        draw_sprite(out, vp, projectile.x, projectile.y, PROJECTILE_SPRITE, C_PROJECTILE)?;
    }

    let ship_color = if state.ship.is_invincible {
        C_SHIP_INVINCIBLE
    } else {
        C_SHIP
    };
    draw_sprite(out, vp, state.ship.x, state.ship.y, SHIP_SPRITE, ship_color)
}

/// Draw a sprite whose top-left corner sits at canvas point (`x`, `y`),
/// clipping whatever falls outside the terminal.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    y: f32,
    sprite: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = vp.cell(x, y);
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.iter().enumerate() {
        let r = row + i as i32;
        if r < 0 || r >= i32::from(vp.rows) {
            continue;
        }
        let visible: String = line
            .chars()
            .enumerate()
            .filter(|(j, _)| {
                let c = col + *j as i32;
                c >= 0 && c < i32::from(vp.columns)
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            continue;
        }
        out.queue(cursor::MoveTo(col.max(0) as u16, r as u16))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── HUD (top right) ───────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    let p = &state.progress;
    let lines = [
        format!("Score: {}", p.score),
        format!("Level: {}", p.level),
        format!("Lives: {}", p.lives),
    ];
    out.queue(style::SetForegroundColor(C_TEXT))?;
    for (i, line) in lines.iter().enumerate() {
        let col = vp.columns.saturating_sub(line.chars().count() as u16 + 2);
        out.queue(cursor::MoveTo(col, 1 + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

/// One message and a shrinking bar per active effect, stacked from the top.
fn draw_active_effects<W: Write>(
    out: &mut W,
    vp: &Viewport,
    state: &GameState,
    now_ms: u64,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_EFFECT))?;
    for (i, effect) in state.active_effects.iter().enumerate() {
        let row = 1 + i as u16 * 2;
        let remaining = effect.remaining_ms(now_ms);
        let filled = (remaining as usize * EFFECT_BAR_CELLS) / POWER_UP_DURATION_MS as usize;
        let bar = format!(
            "[{}{}]",
            "█".repeat(filled),
            "░".repeat(EFFECT_BAR_CELLS - filled)
        );
        print_centered(out, vp, row, effect.message)?;
        print_centered(out, vp, row + 1, &bar)?;
    }
    Ok(())
}

// ── Start screen ──────────────────────────────────────────────────────────────

fn draw_start_screen<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let top = (vp.rows / 2).saturating_sub(8);

    out.queue(style::SetForegroundColor(Color::Cyan))?;
    print_centered(out, vp, top, "★  SPACE  SHOOTER  ★")?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    print_centered(out, vp, top + 2, "Press S to Start")?;
    print_centered(out, vp, top + 4, "Power-ups:")?;

    for (i, kind) in PowerUpKind::ALL.iter().enumerate() {
        let tint = kind.tint();
        out.queue(style::SetForegroundColor(tint_color(tint)))?;
        let line = format!("{}: {}", tint.name(), kind.label());
        print_centered(out, vp, top + 5 + i as u16, &line)?;
    }

    out.queue(style::SetForegroundColor(C_TEXT))?;
    print_centered(out, vp, top + 10, "Game Rules:")?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    print_centered(out, vp, top + 11, "← → / A D : Move   SPACE : Shoot   Q : Quit")?;
    print_centered(out, vp, top + 12, "Avoid Enemies and Collect Power-ups")?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Your Score: {}", state.progress.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Restart  Q - Quit", Color::White),
    ];

    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(style::SetForegroundColor(*color))?;
        print_centered(out, vp, start_row + i as u16, msg)?;
    }
    Ok(())
}

fn print_centered<W: Write>(out: &mut W, vp: &Viewport, row: u16, text: &str) -> std::io::Result<()> {
    if row >= vp.rows {
        return Ok(());
    }
    let col = (vp.columns / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(text))?;
    Ok(())
}
