/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into terminal commands.  Arena coordinates are scaled onto whatever
/// terminal size the caller reports.

use std::io::Write;

use crossterm::{
    cursor,
    event::PopKeyboardEnhancementFlags,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{ActorKind, Character, Enemy, GameStatus, Hero, Session, SoundCue};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_HEALTH: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HERO: Color = Color::White;
const C_HERO_ATTACK: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

const HERO_IDLE: [&str; 2] = ["☺", "☻"];
const HERO_WALK: [&str; 3] = ["☻", "☺", "◉"];
const ENEMY_IDLE: [&str; 2] = ["ö", "o"];
const ENEMY_WALK: [&str; 2] = ["Ö", "ö"];
const HERO_SWING: &str = "※";

const CONTROLS: &str = "Arrows / WASD : Move   SPACE : Attack   M : Sound   Q : Quit";

/// Terminal area the arena is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Map an arena position to a cell inside the border, or `None` when the
    /// position lies outside the arena.
    pub fn to_cell(&self, x: f32, y: f32, session: &Session) -> Option<(u16, u16)> {
        let (w, h) = (session.config.width as f32, session.config.height as f32);
        if !(0.0..w).contains(&x) || !(0.0..h).contains(&y) {
            return None;
        }
        // Play area: columns 1 .. cols-1, rows 2 .. rows-2
        let inner_cols = self.cols.saturating_sub(2) as f32;
        let inner_rows = self.rows.saturating_sub(4) as f32;
        if inner_cols < 1.0 || inner_rows < 1.0 {
            return None;
        }
        let col = 1 + (x / w * inner_cols) as u16;
        let row = 2 + (y / h * inner_rows) as u16;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.status {
        GameStatus::Title => draw_title(out, view)?,
        GameStatus::GameOver => draw_game_over(out, session, view)?,
        GameStatus::Playing => {
            draw_border(out, view)?;
            draw_hud(out, session, view)?;
            for enemy in &session.enemies {
                draw_enemy(out, enemy, session, view)?;
            }
            draw_hero(out, &session.hero, session, view)?;
            draw_controls_hint(out, view)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health: {}", session.hero.health)))?;

    let sound = if session.sound_on { "[ SOUND ON ]" } else { "[ MUTED ]" };
    let sx = (view.cols / 2).saturating_sub(sound.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(sound))?;

    let score = format!("Score: {}", session.score);
    let rx = view.cols.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Glyph for the animation frame an actor is on.  The frame index can run
/// past a shorter set right after switching between idle and walk.
fn sprite(body: &Character) -> &'static str {
    let set: &[&'static str] = match (body.kind, body.moving) {
        (ActorKind::Hero, false) => &HERO_IDLE,
        (ActorKind::Hero, true) => &HERO_WALK,
        (ActorKind::Enemy, false) => &ENEMY_IDLE,
        (ActorKind::Enemy, true) => &ENEMY_WALK,
    };
    set[body.frame % set.len()]
}

fn draw_hero<W: Write>(
    out: &mut W,
    hero: &Hero,
    session: &Session,
    view: Viewport,
) -> std::io::Result<()> {
    // Blink while invulnerable
    if hero.invulnerable > 0.0 && (session.frame / 4) % 2 == 1 {
        return Ok(());
    }
    let Some((col, row)) = view.to_cell(hero.body.pos.x, hero.body.pos.y, session) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    if hero.is_attacking {
        out.queue(style::SetForegroundColor(C_HERO_ATTACK))?;
        out.queue(Print(HERO_SWING))?;
    } else {
        out.queue(style::SetForegroundColor(C_HERO))?;
        out.queue(Print(sprite(&hero.body)))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    session: &Session,
    view: Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(enemy.body.pos.x, enemy.body.pos.y, session) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        out.queue(Print(sprite(&enemy.body)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS))?;
    Ok(())
}

// ── Full-screen messages ──────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        view,
        &[
            ("A R E N A   B R A W L", Color::Cyan),
            ("", Color::White),
            ("Press ENTER to start", Color::White),
        ],
    )?;
    draw_controls_hint(out, view)
}

fn draw_game_over<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", session.score);
    draw_centered(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (&score_line, Color::Yellow),
            ("ENTER - Play Again  Q - Quit", Color::White),
        ],
    )
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// The terminal bell stands in for the attack and hit samples: one ring per
/// cue, so an attack that also lands a kill rings twice.
pub fn play_cues<W: Write>(out: &mut W, cues: &[SoundCue]) -> std::io::Result<()> {
    for _ in cues {
        out.queue(Print("\x07"))?;
    }
    Ok(())
}

// ── Teardown ──────────────────────────────────────────────────────────────────

/// Undo the screen setup: keyboard flags (when they were pushed), cursor,
/// alternate screen.  Raw mode is left to the caller.
pub fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) -> std::io::Result<()> {
    if keyboard_enhanced {
        out.queue(PopKeyboardEnhancementFlags)?;
    }
    out.queue(style::ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}
