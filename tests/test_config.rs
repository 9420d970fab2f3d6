use std::io::Write;

use arena_brawl::config::{ConfigError, GameConfig};
use arena_brawl::geometry::Size;

use pretty_assertions::assert_eq;

#[test]
fn defaults_match_classic_layout() {
    let c = GameConfig::default();
    assert_eq!((c.width, c.height), (800, 600));
    assert_eq!(c.spawn_margin, 50);
    assert_eq!(c.initial_enemies, 5);
    assert_eq!(c.spawn_interval, 0.25);
    assert_eq!(c.attack_cooldown, 0.5);
    assert_eq!(c.invulnerability, 1.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json(r#"{ "hero_speed": 5.0, "enemy_size": { "w": 32, "h": 40 } }"#)
        .unwrap();
    assert_eq!(c.hero_speed, 5.0);
    assert_eq!(c.enemy_size, Size { w: 32.0, h: 40.0 });
    assert_eq!(c.width, 800);
    assert_eq!(c.start_health, 3);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
}

#[test]
fn malformed_json_is_parse_error() {
    let err = GameConfig::from_json("{ width: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn arena_smaller_than_margin_is_rejected() {
    let err = GameConfig::from_json(r#"{ "width": 100, "spawn_margin": 50 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn negative_speed_is_rejected() {
    let c = GameConfig {
        enemy_speed: -1.0,
        ..GameConfig::default()
    };
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("enemy_speed"));
}

#[test]
fn zero_spawn_interval_is_rejected() {
    let c = GameConfig {
        spawn_interval: 0.0,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_fps_is_rejected() {
    let c = GameConfig {
        fps: 0,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "sound_on": false, "initial_enemies": 2 }}"#).unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert!(!c.sound_on);
    assert_eq!(c.initial_enemies, 2);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn center_is_half_the_arena() {
    let c = GameConfig {
        width: 301,
        height: 200,
        ..GameConfig::default()
    };
    assert_eq!(c.center().x, 150.0);
    assert_eq!(c.center().y, 100.0);
}
