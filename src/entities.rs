/// All game entity types — pure data, no logic.

use crate::config::GameConfig;
use crate::geometry::Vec2;

// ── Tags & per-frame signals ──────────────────────────────────────────────────

/// Which kind of actor a `Character` is.  Selects animation sets and sprite size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Hero,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting on the title screen for the first start.
    Title,
    Playing,
    /// Gameplay frozen until the player restarts.
    GameOver,
}

/// Keys the session reacts to on press (as opposed to held movement keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Start,
    ToggleSound,
    Other,
}

/// Audio cues raised during a tick.  The front end drains and plays them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Attack,
    Hit,
}

/// Held state of the gameplay keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub attack: bool,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// State shared by every actor in the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub kind: ActorKind,
    /// Sprite centre, in arena units.
    pub pos: Vec2,
    pub speed: f32,
    /// Index into the active animation set (walk or idle).
    pub frame: usize,
    /// Seconds accumulated toward the next animation frame.
    pub frame_time: f32,
    pub moving: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub body: Character,
    pub health: u32,
    /// Seconds of invulnerability left.
    pub invulnerable: f32,
    pub is_attacking: bool,
    /// Seconds until the next attack is allowed.
    pub attack_timer: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Character,
    pub health: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One playthrough and everything the frame loop needs to drive it.
/// Cloneable so pure update functions can return a new copy without
/// mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Seconds until the next automatic spawn.
    pub spawn_timer: f32,
    pub status: GameStatus,
    pub sound_on: bool,
    /// Cues raised by the most recent tick or key press.
    pub cues: Vec<SoundCue>,
    /// Gameplay ticks since the session started.
    pub frame: u64,
    pub config: GameConfig,
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.status != GameStatus::Title
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
