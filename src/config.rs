/// Tunable arena and gameplay constants.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.  Loaded and validated from JSON by the binary.  Gameplay code
/// still tolerates an unvalidated config: spawning clamps the margin.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Size, Vec2};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in arena units (pixels in the original layout).
    pub width: u32,
    pub height: u32,
    /// Inset from every arena edge inside which enemies spawn.
    pub spawn_margin: u32,
    /// Hero displacement per frame along each held axis.
    pub hero_speed: f32,
    /// Enemy displacement per frame toward the hero.
    pub enemy_speed: f32,
    pub hero_size: Size,
    pub enemy_size: Size,
    pub start_health: u32,
    pub initial_enemies: usize,
    /// Seconds between automatic spawns.
    pub spawn_interval: f32,
    /// Seconds the attack stays active; also the cooldown before the next one.
    pub attack_cooldown: f32,
    /// Seconds of invulnerability after taking a hit.
    pub invulnerability: f32,
    /// Seconds per animation frame.
    pub anim_delay: f32,
    pub sound_on: bool,
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 600,
            spawn_margin: 50,
            hero_speed: 3.0,
            enemy_speed: 1.5,
            hero_size: Size { w: 64.0, h: 64.0 },
            enemy_size: Size { w: 64.0, h: 64.0 },
            start_health: 3,
            initial_enemies: 5,
            spawn_interval: 0.25,
            attack_cooldown: 0.5,
            invulnerability: 1.0,
            anim_delay: 0.15,
            sound_on: true,
            fps: 60,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let margin = self.spawn_margin.saturating_mul(2);
        if self.width <= margin || self.height <= margin {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} leaves no room inside a spawn margin of {}",
                self.width, self.height, self.spawn_margin
            )));
        }

        let non_negative = [
            ("hero_speed", self.hero_speed),
            ("enemy_speed", self.enemy_speed),
            ("hero_size.w", self.hero_size.w),
            ("hero_size.h", self.hero_size.h),
            ("enemy_size.w", self.enemy_size.w),
            ("enemy_size.h", self.enemy_size.h),
            ("attack_cooldown", self.attack_cooldown),
            ("invulnerability", self.invulnerability),
            ("anim_delay", self.anim_delay),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn_interval must be positive, got {}",
                self.spawn_interval
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }
        Ok(())
    }

    /// Centre of the arena, where the hero starts.
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}
