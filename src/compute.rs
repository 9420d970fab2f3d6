/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state
/// (and, where needed, an RNG handle) and returns a brand-new value.  Side
/// effects are limited to the injected RNG and log records.

use log::{debug, info, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    ActorKind, Character, Enemy, GameStatus, Hero, InputState, Key, Session, SoundCue,
};
use crate::geometry::{Rect, Size, Vec2};

/// Enemies closer than this to their target stop moving.
const ARRIVE_DISTANCE: f32 = 1.0;

// ── Animation & sprite tables ────────────────────────────────────────────────

/// Number of frames in the animation set an actor is currently playing.
pub fn anim_frame_count(kind: ActorKind, moving: bool) -> usize {
    match (kind, moving) {
        (ActorKind::Hero, false) => 2,
        (ActorKind::Hero, true) => 3,
        (ActorKind::Enemy, false) => 2,
        (ActorKind::Enemy, true) => 2,
    }
}

pub fn sprite_size(kind: ActorKind, config: &GameConfig) -> Size {
    match kind {
        ActorKind::Hero => config.hero_size,
        ActorKind::Enemy => config.enemy_size,
    }
}

/// Bounding box of an actor at its current position.
pub fn bounds(body: &Character, config: &GameConfig) -> Rect {
    Rect::centered_on(body.pos, sprite_size(body.kind, config))
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn character(kind: ActorKind, pos: Vec2, speed: f32) -> Character {
    Character {
        kind,
        pos,
        speed,
        frame: 0,
        frame_time: 0.0,
        moving: false,
    }
}

/// A fresh hero standing in the middle of the arena.
pub fn new_hero(config: &GameConfig) -> Hero {
    Hero {
        body: character(ActorKind::Hero, config.center(), config.hero_speed),
        health: config.start_health,
        invulnerable: 0.0,
        is_attacking: false,
        attack_timer: 0.0,
    }
}

pub fn new_enemy(pos: Vec2, config: &GameConfig) -> Enemy {
    Enemy {
        body: character(ActorKind::Enemy, pos, config.enemy_speed),
        health: 1,
    }
}

/// A session parked on the title screen.  Nothing moves until `Key::Start`.
pub fn new_session(config: GameConfig) -> Session {
    Session {
        hero: new_hero(&config),
        enemies: Vec::new(),
        score: 0,
        // A full interval, not zero: the first spawn lands one interval in.
        spawn_timer: config.spawn_interval,
        status: GameStatus::Title,
        sound_on: config.sound_on,
        cues: Vec::new(),
        frame: 0,
        config,
    }
}

/// Build a running session: centred hero and the initial enemy wave.
pub fn start_session(config: GameConfig, rng: &mut impl Rng) -> Session {
    let enemies = (0..config.initial_enemies)
        .map(|_| new_enemy(random_spawn_pos(&config, rng), &config))
        .collect();
    info!(
        "session started: {}x{} arena, {} enemies",
        config.width, config.height, config.initial_enemies
    );
    Session {
        enemies,
        status: GameStatus::Playing,
        ..new_session(config)
    }
}

/// Uniform integer position inside the arena, inset by the spawn margin.
/// A margin wider than half the arena collapses to the centre line.
pub fn random_spawn_pos(config: &GameConfig, rng: &mut impl Rng) -> Vec2 {
    let mx = config.spawn_margin.min(config.width / 2);
    let my = config.spawn_margin.min(config.height / 2);
    let x = rng.gen_range(mx..=config.width - mx);
    let y = rng.gen_range(my..=config.height - my);
    Vec2::new(x as f32, y as f32)
}

pub fn spawn_enemy(session: &Session, rng: &mut impl Rng) -> Session {
    let pos = random_spawn_pos(&session.config, rng);
    debug!("enemy spawned at ({}, {})", pos.x, pos.y);
    let mut enemies = session.enemies.clone();
    enemies.push(new_enemy(pos, &session.config));
    Session {
        enemies,
        ..session.clone()
    }
}

// ── Key presses ──────────────────────────────────────────────────────────────

/// React to a single key press.  `Start` begins a session from the title
/// screen or restarts one after game over; it is ignored mid-game.
pub fn on_key_down(session: &Session, key: Key, rng: &mut impl Rng) -> Session {
    match key {
        Key::Start if session.status != GameStatus::Playing => Session {
            sound_on: session.sound_on,
            ..start_session(session.config.clone(), rng)
        },
        Key::ToggleSound => {
            debug!("sound {}", if session.sound_on { "off" } else { "on" });
            Session {
                sound_on: !session.sound_on,
                ..session.clone()
            }
        }
        _ => session.clone(),
    }
}

// ── Per-actor updates ────────────────────────────────────────────────────────

/// Advance the animation clock.  Cosmetic only.
pub fn update_character(body: &Character, dt: f32, config: &GameConfig) -> Character {
    let mut frame_time = body.frame_time + dt.max(0.0);
    let mut frame = body.frame;
    if frame_time >= config.anim_delay {
        frame_time = 0.0;
        frame = (frame + 1) % anim_frame_count(body.kind, body.moving);
    }
    Character {
        frame,
        frame_time,
        ..body.clone()
    }
}

/// True when this frame's input fires an attack.
pub fn wants_attack(hero: &Hero, input: &InputState) -> bool {
    input.attack && hero.attack_timer <= 0.0
}

/// Apply held keys.  Each axis moves by the full speed, so diagonals are
/// `speed * sqrt(2)` long.
pub fn handle_input(hero: &Hero, input: &InputState, config: &GameConfig) -> Hero {
    let speed = hero.body.speed;
    let mut pos = hero.body.pos;
    if input.left {
        pos.x -= speed;
    }
    if input.right {
        pos.x += speed;
    }
    if input.up {
        pos.y -= speed;
    }
    if input.down {
        pos.y += speed;
    }
    let moving = input.left || input.right || input.up || input.down;

    let moved = Hero {
        body: Character {
            pos,
            moving,
            ..hero.body.clone()
        },
        ..hero.clone()
    };
    if wants_attack(hero, input) {
        attack(&moved, config)
    } else {
        moved
    }
}

/// Open the attack window and start the cooldown.
pub fn attack(hero: &Hero, config: &GameConfig) -> Hero {
    Hero {
        is_attacking: true,
        attack_timer: config.attack_cooldown,
        ..hero.clone()
    }
}

/// Lose one health point unless still invulnerable from the last hit.
pub fn take_damage(hero: &Hero, config: &GameConfig) -> Hero {
    if hero.invulnerable > 0.0 {
        return hero.clone();
    }
    Hero {
        health: hero.health.saturating_sub(1),
        invulnerable: config.invulnerability,
        ..hero.clone()
    }
}

/// Tick the hero's timers.  The attack stays active until the cooldown has
/// run out, then clears on the following update.
pub fn update_hero(hero: &Hero, dt: f32, config: &GameConfig) -> Hero {
    let dt = dt.max(0.0);
    let body = update_character(&hero.body, dt, config);

    let invulnerable = if hero.invulnerable > 0.0 {
        (hero.invulnerable - dt).max(0.0)
    } else {
        hero.invulnerable
    };

    let (attack_timer, is_attacking) = if hero.attack_timer > 0.0 {
        ((hero.attack_timer - dt).max(0.0), hero.is_attacking)
    } else {
        (hero.attack_timer, false)
    };

    Hero {
        body,
        invulnerable,
        is_attacking,
        attack_timer,
        ..hero.clone()
    }
}

/// Step straight toward `target` by `speed`, or stop once within one unit.
pub fn move_towards(body: &Character, target: Vec2) -> Character {
    let delta = target - body.pos;
    let dist = delta.length();
    if dist > ARRIVE_DISTANCE {
        Character {
            pos: body.pos + delta * (body.speed / dist),
            moving: true,
            ..body.clone()
        }
    } else {
        Character {
            moving: false,
            ..body.clone()
        }
    }
}

pub fn update_enemy(enemy: &Enemy, dt: f32, hero_pos: Vec2, config: &GameConfig) -> Enemy {
    let body = update_character(&enemy.body, dt, config);
    Enemy {
        body: move_towards(&body, hero_pos),
        ..enemy.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  Outside of `Playing` nothing
/// moves; only the previous frame's cues are dropped.
pub fn tick(session: &Session, input: &InputState, dt: f32, rng: &mut impl Rng) -> Session {
    if session.status != GameStatus::Playing {
        return Session {
            cues: Vec::new(),
            ..session.clone()
        };
    }

    let dt = dt.max(0.0);
    let config = &session.config;
    let mut cues = Vec::new();

    // ── 1. Hero input & timers ───────────────────────────────────────────────
    if wants_attack(&session.hero, input) && session.sound_on {
        cues.push(SoundCue::Attack);
    }
    let hero = handle_input(&session.hero, input, config);
    let mut hero = update_hero(&hero, dt, config);

    // ── 2. Enemies chase, then resolve contact ───────────────────────────────
    // Single pass building the survivors, so a kill never shifts the others.
    let mut score = session.score;
    let mut enemies = Vec::with_capacity(session.enemies.len());
    for enemy in &session.enemies {
        let enemy = update_enemy(enemy, dt, hero.body.pos, config);
        let touching = bounds(&hero.body, config).overlaps(&bounds(&enemy.body, config));

        if hero.is_attacking && touching {
            score += 1;
            debug!("enemy killed, score {}", score);
            if session.sound_on {
                cues.push(SoundCue::Hit);
            }
            continue;
        }
        if touching && hero.invulnerable <= 0.0 {
            hero = take_damage(&hero, config);
            debug!("hero hit, health {}", hero.health);
        }
        enemies.push(enemy);
    }

    let mut next = Session {
        hero,
        enemies,
        score,
        spawn_timer: session.spawn_timer - dt,
        cues,
        frame: session.frame + 1,
        ..session.clone()
    };

    // ── 3. Timed spawn ───────────────────────────────────────────────────────
    if next.spawn_timer <= 0.0 {
        next = spawn_enemy(&next, rng);
        next.spawn_timer = config.spawn_interval;
    }

    // ── 4. Game over ─────────────────────────────────────────────────────────
    if next.hero.health == 0 {
        info!("game over after {} frames, score {}", next.frame, next.score);
        next.status = GameStatus::GameOver;
    }

    trace!(
        "tick {}: dt={:.4} enemies={} health={}",
        next.frame,
        dt,
        next.enemies.len(),
        next.hero.health
    );
    next
}
