//! The orchestrator: owns every manager and advances them in a fixed order
//! once per `tick()`.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::bullets::{Bullet, BulletManager, Owner};
use crate::collision::CollisionResolver;
use crate::config::{Tunables, BOSS_LEVEL, INFINITE_LEVEL};
use crate::enemies::{Boss, Enemy, EnemyManager};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::player::Player;
use crate::shields::{Shield, ShieldManager};
use crate::state::{GameState, Mode, Phase, StateNotice};


/// Read-only view of everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub mode: Mode,
    pub paused: bool,
    pub score: u32,
    pub level: u32,
    /// Infinite wave on the field; 0 in the campaign.
    pub wave: u32,
    pub lives: u32,
    pub infinite_elapsed: Duration,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player: Rect,
    pub enemies: &'a [Enemy],
    pub boss: Option<&'a Boss>,
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub shields: &'a [Shield],
}

impl Snapshot<'_> {
    pub fn boss_fight(&self) -> bool {
        self.boss.is_some()
    }
}

pub struct World {
    tunables: Tunables,
    state: GameState,
    player: Player,
    enemies: EnemyManager,
    bullets: BulletManager,
    shields: ShieldManager,
    events: EventQueue,
    rng: StdRng,
    /// Elapsed infinite-mode time of the last infinite boss spawn.
    last_infinite_boss_at: Option<Duration>,
    last_mode: Mode,
}

impl World {
    pub fn new(tunables: Tunables, seed: u64) -> Self {
        Self::with_rng(tunables, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(tunables: Tunables, rng: StdRng) -> Self {
        World {
            state: GameState::new(),
            player: Player::new(&tunables),
            enemies: EnemyManager::default(),
            bullets: BulletManager::new(&tunables),
            shields: ShieldManager::default(),
            events: EventQueue::default(),
            rng,
            last_infinite_boss_at: None,
            last_mode: Mode::Campaign,
            tunables,
        }
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn bullets(&self) -> &BulletManager {
        &self.bullets
    }

    pub fn shields(&self) -> &ShieldManager {
        &self.shields
    }

    /// Mode of the current run, or of the last one once back in the menu.
    pub fn last_mode(&self) -> Mode {
        self.last_mode
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let wave = if self.state.is_infinite_mode() {
            self.enemies.wave().saturating_sub(1)
        } else {
            0
        };
        Snapshot {
            phase: self.state.phase(),
            mode: self.state.mode(),
            paused: self.state.is_paused(),
            score: self.state.score(),
            level: self.state.level(),
            wave,
            lives: self.player.lives,
            infinite_elapsed: self.state.infinite_elapsed(),
            canvas_width: self.tunables.canvas_width,
            canvas_height: self.tunables.canvas_height,
            player: self.player.rect,
            enemies: self.enemies.enemies(),
            boss: self.enemies.boss(),
            player_bullets: self.bullets.player_bullets(),
            enemy_bullets: self.bullets.enemy_bullets(),
            shields: self.shields.shields(),
        }
    }

    pub fn set_move_left(&mut self, on: bool) {
        self.player.set_move_left(on);
    }

    pub fn set_move_right(&mut self, on: bool) {
        self.player.set_move_right(on);
    }

    pub fn set_shooting(&mut self, on: bool) {
        self.player.set_shooting(on);
    }

    pub fn start_campaign(&mut self) {
        self.clear_run();
        self.last_mode = Mode::Campaign;
        self.shields.create_shields(Mode::Campaign, &self.tunables);
        self.spawn_level(self.state.level());
        self.state.start_game();
    }

    pub fn start_infinite_mode(&mut self) {
        self.clear_run();
        self.last_mode = Mode::Infinite;
        self.state.start_infinite_mode();
        self.state.enter_level(INFINITE_LEVEL);
        self.events.push(GameEvent::LevelChanged(INFINITE_LEVEL));
        self.shields.create_shields(Mode::Infinite, &self.tunables);
        self.spawn_level(INFINITE_LEVEL);
        self.state.start_game();
    }

    /// Abandons the run and returns to the main menu.
    pub fn reset_game(&mut self) {
        self.clear_run();
        info!("back to menu");
    }

    /// New run in the same mode as the last one.
    pub fn restart(&mut self) {
        match self.last_mode {
            Mode::Campaign => self.start_campaign(),
            Mode::Infinite => self.start_infinite_mode(),
        }
    }

    pub fn toggle_pause(&mut self) {
        let before = self.state.is_paused();
        let paused = self.state.toggle_pause();
        if paused != before {
            self.events.push(GameEvent::Paused(paused));
        }
    }

    /// Feeds real time to the infinite-mode timer. Call once per host tick,
    /// paused or not.
    pub fn elapse(&mut self, dt: Duration) {
        self.state.advance_infinite_timer(dt);
    }

    /// One fixed simulation step. Does nothing unless a run is in progress
    /// and unpaused.
    pub fn tick(&mut self) {
        if !self.state.begin_tick() {
            return;
        }

        self.player.update_position(self.tunables.canvas_width);
        if self.player.take_shot() && self.bullets.shoot_player_bullet(&self.player.rect) {
            self.events.push(GameEvent::Shot {
                owner: Owner::Player,
            });
        }

        self.bullets.advance(
            self.tunables.player_bullet_speed,
            self.tunables.enemy_bullet_speed,
            self.tunables.canvas_height,
            self.tunables.offscreen_margin,
        );

        let speed = self.tunables.enemy_speed(self.state.level());
        let infinite = self.state.is_infinite_mode();
        if self.enemies.update_enemies(speed, infinite, &self.tunables) {
            let wave = self.enemies.wave().saturating_sub(1);
            self.events.push(GameEvent::WaveStarted(wave));
        }

        self.enemy_fire();
        self.update_infinite_boss();

        let mut resolver = self.resolver();
        resolver.resolve_all();
        let advance = resolver.should_advance_level();
        self.process_notices();

        if advance && self.state.is_playing() && !self.state.is_infinite_mode() {
            self.advance_level();
        }
    }

    fn resolver(&mut self) -> CollisionResolver<'_> {
        CollisionResolver {
            player: &mut self.player,
            enemies: &mut self.enemies,
            bullets: &mut self.bullets,
            shields: &mut self.shields,
            state: &mut self.state,
            events: &mut self.events,
            tunables: &self.tunables,
        }
    }

    /// The boss fires on its own odds; otherwise one random front-row
    /// invader may fire.
    fn enemy_fire(&mut self) {
        let shooter = match self.enemies.boss() {
            Some(boss) => {
                let rect = boss.rect;
                (self.rng.gen::<f64>() < self.tunables.boss_fire_chance).then_some(rect)
            }
            None => {
                let chance = if self.state.is_infinite_mode() {
                    self.tunables.infinite_fire_chance(self.enemies.wave())
                } else {
                    self.tunables.campaign_fire_chance(self.state.level())
                };
                if self.rng.gen::<f64>() < chance {
                    self.enemies
                        .random_shooter(self.tunables.front_row_epsilon, &mut self.rng)
                } else {
                    None
                }
            }
        };
        if let Some(rect) = shooter {
            self.bullets.shoot_enemy_bullet(&rect);
            self.events.push(GameEvent::Shot {
                owner: Owner::Enemy,
            });
        }
    }

    /// Keeps the infinite boss on the field exactly while its window is
    /// open, at most once per respawn gap.
    fn update_infinite_boss(&mut self) {
        if !self.state.is_infinite_mode() {
            return;
        }
        let t = &self.tunables;
        let now = self.state.infinite_elapsed();

        if self
            .state
            .should_spawn_infinite_boss(t.boss_window_period, t.boss_window_open)
        {
            let gap_passed = self
                .last_infinite_boss_at
                .map_or(true, |at| now.saturating_sub(at) >= t.boss_respawn_gap);
            if !self.enemies.boss_fight() && gap_passed {
                self.enemies.spawn_infinite_boss(t);
                self.last_infinite_boss_at = Some(now);
                info!(elapsed = now.as_secs(), "infinite boss spawned");
                self.events.push(GameEvent::BossSpawned { infinite: true });
            }
        } else if self.enemies.boss().is_some_and(Boss::is_infinite) {
            self.enemies.remove_boss();
            info!(elapsed = now.as_secs(), "infinite boss left");
            self.events.push(GameEvent::BossRemoved);
        }
    }

    fn advance_level(&mut self) {
        self.state.next_level();
        let level = self.state.level();
        info!(level, "level cleared");
        self.events.push(GameEvent::LevelChanged(level));
        if level > BOSS_LEVEL {
            self.state.trigger_win_game();
            self.process_notices();
        } else {
            self.spawn_level(level);
        }
    }

    fn spawn_level(&mut self, level: u32) {
        self.enemies.spawn_wave(level, &self.tunables);
        if self.enemies.boss_fight() {
            info!(level, "boss fight");
            self.events.push(GameEvent::BossSpawned { infinite: false });
            self.events.push(GameEvent::BossBarShown);
            self.events.push(GameEvent::BossHealthChanged(1.0));
        } else {
            self.events.push(GameEvent::BossBarHidden);
            if self.state.is_infinite_mode() {
                let wave = self.enemies.wave().saturating_sub(1);
                self.events.push(GameEvent::WaveStarted(wave));
            }
        }
    }

    /// Wipes the field and the state back to the menu defaults.
    fn clear_run(&mut self) {
        self.state.reset_game();
        self.bullets.clear();
        self.enemies.clear();
        self.shields.clear();
        self.last_infinite_boss_at = None;
        self.process_notices();
        self.events.push(GameEvent::BossBarHidden);
        self.events.push(GameEvent::ScoreChanged(self.state.score()));
        self.events.push(GameEvent::LevelChanged(self.state.level()));
    }

    /// Reacts to whatever the state machine queued since the last call.
    fn process_notices(&mut self) {
        for notice in self.state.drain_notices() {
            match notice {
                StateNotice::GameOver => self.events.push(GameEvent::GameOver),
                StateNotice::GameWon => self.events.push(GameEvent::GameWon),
                StateNotice::ResetLives => {
                    self.player.reset(&self.tunables);
                    self.events.push(GameEvent::LivesChanged(self.player.lives));
                }
            }
        }
    }
}
