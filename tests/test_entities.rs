use arena_brawl::compute::{new_enemy, new_hero, new_session};
use arena_brawl::config::GameConfig;
use arena_brawl::entities::*;
use arena_brawl::geometry::Vec2;

#[test]
fn status_views_match_two_flag_model() {
    let mut s = new_session(GameConfig::default());
    assert!(!s.is_running());
    assert!(!s.is_game_over());

    s.status = GameStatus::Playing;
    assert!(s.is_running());
    assert!(!s.is_game_over());

    s.status = GameStatus::GameOver;
    assert!(s.is_running());
    assert!(s.is_game_over());
}

#[test]
fn fresh_hero_starts_ready() {
    let config = GameConfig::default();
    let hero = new_hero(&config);
    assert_eq!(hero.body.kind, ActorKind::Hero);
    assert_eq!(hero.health, 3);
    assert_eq!(hero.invulnerable, 0.0);
    assert_eq!(hero.attack_timer, 0.0);
    assert!(!hero.is_attacking);
    assert!(!hero.body.moving);
    assert_eq!(hero.body.speed, 3.0);
}

#[test]
fn fresh_enemy_dies_in_one_hit() {
    let config = GameConfig::default();
    let enemy = new_enemy(Vec2::new(60.0, 70.0), &config);
    assert_eq!(enemy.body.kind, ActorKind::Enemy);
    assert_eq!(enemy.health, 1);
    assert_eq!(enemy.body.speed, 1.5);
    assert_eq!(enemy.body.pos, Vec2::new(60.0, 70.0));
}

#[test]
fn session_clone_is_independent() {
    let original = new_session(GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.hero.body.pos.x = 99.0;
    cloned.score = 999;
    cloned.cues.push(SoundCue::Hit);
    cloned
        .enemies
        .push(new_enemy(Vec2::new(5.0, 5.0), &cloned.config));

    assert_eq!(original.hero.body.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert!(original.cues.is_empty());
}

#[test]
fn input_state_defaults_to_nothing_held() {
    let input = InputState::default();
    assert!(!(input.left || input.right || input.up || input.down || input.attack));
}
