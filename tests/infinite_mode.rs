use std::time::Duration;

use rustvaders::{BossKind, GameEvent, Mode, Tunables, World};

fn infinite() -> World {
    let mut world = World::new(Tunables::default().without_enemy_fire(), 21);
    world.start_infinite_mode();
    world
}

#[test]
fn starts_on_the_first_wave_with_sturdy_shields() {
    let mut world = infinite();
    let events = world.drain_events();
    let snap = world.snapshot();
    assert_eq!(snap.mode, Mode::Infinite);
    assert_eq!(snap.level, 5);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.enemies.len(), 10);
    assert!(snap.enemies.iter().all(|e| e.level == 3));
    assert_eq!(snap.shields.len(), 5);
    assert!(snap.shields.iter().all(|s| s.health == 30));
    assert!(events.contains(&GameEvent::LevelChanged(5)));
    assert!(events.contains(&GameEvent::WaveStarted(1)));
}

#[test]
fn boss_visits_during_the_opening_window() {
    let mut world = infinite();
    world.drain_events();

    world.tick();
    let snap = world.snapshot();
    assert!(snap.boss_fight());
    assert_eq!(snap.boss.map(|b| b.kind), Some(BossKind::Infinite));
    let events = world.drain_events();
    assert!(events.contains(&GameEvent::BossSpawned { infinite: true }));
    assert!(!events.contains(&GameEvent::BossBarShown));

    world.elapse(Duration::from_secs(30));
    world.tick();
    assert!(world.snapshot().boss.is_none());
    assert!(world.drain_events().contains(&GameEvent::BossRemoved));
}

#[test]
fn level_never_advances() {
    let mut world = infinite();
    for _ in 0..600 {
        world.elapse(Duration::from_millis(500));
        world.tick();
    }
    assert_eq!(world.state().level(), 5);
    assert!(world.state().is_playing());
    assert_eq!(world.state().infinite_elapsed(), Duration::from_secs(300));
}

#[test]
fn reset_clears_the_timer() {
    let mut world = infinite();
    world.elapse(Duration::from_secs(12));
    world.reset_game();
    assert_eq!(world.state().infinite_elapsed(), Duration::ZERO);
    assert!(!world.state().is_infinite_mode());
}
