use tracing::{debug, info};

use crate::bullets::BulletManager;
use crate::config::{Tunables, BOSS_LEVEL};
use crate::enemies::EnemyManager;
use crate::events::{EventQueue, GameEvent};
use crate::player::Player;
use crate::shields::ShieldManager;
use crate::state::GameState;

const ENEMY_EXPLOSION: f32 = 30.0;
const PLAYER_EXPLOSION: f32 = 25.0;
const BOSS_EXPLOSION: f32 = 80.0;
const INFINITE_BOSS_EXPLOSION: f32 = 60.0;

/// Turns overlaps between bullets and everything else into score, damage and
/// state transitions. Borrows the whole world for one resolution pass.
pub struct CollisionResolver<'a> {
    pub player: &'a mut Player,
    pub enemies: &'a mut EnemyManager,
    pub bullets: &'a mut BulletManager,
    pub shields: &'a mut ShieldManager,
    pub state: &'a mut GameState,
    pub events: &'a mut EventQueue,
    pub tunables: &'a Tunables,
}

impl CollisionResolver<'_> {
    /// Runs every pass in order. Each pass walks its bullets back to front
    /// and applies at most one consequence per bullet.
    pub fn resolve_all(&mut self) {
        self.enemy_bullets_vs_shields();
        self.player_bullets_vs_shields();
        self.player_bullets_vs_targets();
        self.enemy_bullets_vs_player();
        self.enemies_vs_player_row();
    }

    /// Field cleared with no boss around: time for the next level.
    pub fn should_advance_level(&self) -> bool {
        !self.enemies.boss_fight() && self.enemies.enemies().is_empty()
    }

    fn enemy_bullets_vs_shields(&mut self) {
        for i in (0..self.bullets.enemy_bullets().len()).rev() {
            let rect = self.bullets.enemy_bullets()[i].rect;
            if let Some(shield) = self.shields.first_intersecting(&rect) {
                self.bullets.remove_enemy_bullet(i);
                self.shields.damage(shield, self.events);
            }
        }
    }

    /// Shields stop the player's shots too, without taking damage.
    fn player_bullets_vs_shields(&mut self) {
        for i in (0..self.bullets.player_bullets().len()).rev() {
            let rect = self.bullets.player_bullets()[i].rect;
            if self.shields.first_intersecting(&rect).is_some() {
                self.bullets.remove_player_bullet(i);
            }
        }
    }

    fn player_bullets_vs_targets(&mut self) {
        for i in (0..self.bullets.player_bullets().len()).rev() {
            if self.enemies.boss_fight() {
                self.player_bullet_vs_boss(i);
            } else {
                self.player_bullet_vs_enemies(i);
            }
        }
    }

    fn player_bullet_vs_boss(&mut self, bullet: usize) {
        let rect = self.bullets.player_bullets()[bullet].rect;
        let Some(boss) = self.enemies.boss_mut() else {
            return;
        };
        if !boss.is_alive() || !boss.rect.intersects(&rect) {
            return;
        }

        self.events.push(GameEvent::BossHit { area: boss.rect });
        boss.health -= 1;
        let boss = *boss;
        self.bullets.remove_player_bullet(bullet);

        if boss.is_infinite() {
            self.award(self.tunables.infinite_boss_hit_points);
        } else {
            self.events
                .push(GameEvent::BossHealthChanged(boss.health_fraction()));
        }

        if boss.is_alive() {
            return;
        }

        let (x, y) = boss.rect.center();
        let size = if boss.is_infinite() {
            INFINITE_BOSS_EXPLOSION
        } else {
            BOSS_EXPLOSION
        };
        self.events.push(GameEvent::Explosion { x, y, size });

        if !boss.is_infinite() {
            self.award(self.tunables.boss_defeat_points);
            self.state.next_level();
            let level = self.state.level();
            info!(level, "boss defeated");
            self.events.push(GameEvent::LevelChanged(level));
            self.events.push(GameEvent::BossBarHidden);
            if level > BOSS_LEVEL {
                self.state.trigger_win_game();
            }
        } else {
            info!("infinite boss destroyed");
        }

        self.enemies.remove_boss();
        self.events.push(GameEvent::BossRemoved);
    }

    fn player_bullet_vs_enemies(&mut self, bullet: usize) {
        let rect = self.bullets.player_bullets()[bullet].rect;
        let hit = self
            .enemies
            .enemies()
            .iter()
            .rposition(|e| e.rect.intersects(&rect));
        let Some(index) = hit else {
            return;
        };
        if let Some(enemy) = self.enemies.remove_enemy(index) {
            let (x, y) = enemy.rect.center();
            self.events.push(GameEvent::Explosion {
                x,
                y,
                size: ENEMY_EXPLOSION,
            });
            self.bullets.remove_player_bullet(bullet);
            self.award(self.tunables.points_per_enemy_level * self.state.level());
        }
    }

    /// At most one player hit per pass.
    fn enemy_bullets_vs_player(&mut self) {
        for i in (0..self.bullets.enemy_bullets().len()).rev() {
            let rect = self.bullets.enemy_bullets()[i].rect;
            if !rect.intersects(&self.player.rect) {
                continue;
            }
            let (x, y) = rect.center();
            self.events.push(GameEvent::Explosion {
                x,
                y,
                size: PLAYER_EXPLOSION,
            });
            self.bullets.remove_enemy_bullet(i);
            self.hit_player();
            break;
        }
    }

    fn hit_player(&mut self) {
        let dead = self.player.hit();
        let lives = self.player.lives;
        debug!(lives, "player hit");
        self.events.push(GameEvent::LivesChanged(lives));
        if dead {
            self.state.trigger_game_over();
        } else {
            self.player.respawn(self.tunables);
            self.events.push(GameEvent::PlayerRespawned {
                x: self.player.rect.x,
                y: self.player.rect.y,
            });
        }
    }

    /// Invaders reaching the player's row end the run outright.
    fn enemies_vs_player_row(&mut self) {
        if self.enemies.boss_fight() {
            return;
        }
        if self
            .enemies
            .any_enemy_near_player(self.player.rect.y, self.tunables.landing_threshold)
        {
            info!("invaders landed");
            self.state.trigger_game_over();
        }
    }

    fn award(&mut self, points: u32) {
        self.state.increase_score(points);
        self.events.push(GameEvent::ScoreChanged(self.state.score()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::state::{Mode, StateNotice};

    struct Fixture {
        t: Tunables,
        player: Player,
        enemies: EnemyManager,
        bullets: BulletManager,
        shields: ShieldManager,
        state: GameState,
        events: EventQueue,
    }

    impl Fixture {
        fn new() -> Self {
            let t = Tunables::default();
            let mut state = GameState::new();
            state.start_game();
            Fixture {
                player: Player::new(&t),
                enemies: EnemyManager::default(),
                bullets: BulletManager::new(&t),
                shields: ShieldManager::default(),
                state,
                events: EventQueue::default(),
                t,
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
                tunables: &self.t,
            }
        }

        fn resolve(&mut self) {
            self.resolver().resolve_all();
        }

        /// Fires a player bullet whose top-left lands on (x, y).
        fn player_bullet_at(&mut self, x: f32, y: f32) {
            let firer = Rect::new(x - 15.0, y + 22.0, 40.0, 40.0);
            assert!(self.bullets.shoot_player_bullet(&firer));
        }

        fn enemy_bullet_at(&mut self, x: f32, y: f32) {
            let firer = Rect::new(x - 15.0, y - 34.0, 40.0, 30.0);
            self.bullets.shoot_enemy_bullet(&firer);
        }
    }

    #[test]
    fn shield_absorbs_enemy_bullet_and_loses_health() {
        let mut f = Fixture::new();
        f.shields.create_shields(Mode::Campaign, &f.t);
        let shield = f.shields.shields()[0].rect;
        f.enemy_bullet_at(shield.x + 5.0, shield.y - 5.0);

        f.resolve();
        assert!(f.bullets.enemy_bullets().is_empty());
        assert_eq!(f.shields.shields()[0].health, 4);
    }

    #[test]
    fn shield_blocks_player_bullet_without_damage() {
        let mut f = Fixture::new();
        f.shields.create_shields(Mode::Campaign, &f.t);
        let shield = f.shields.shields()[1].rect;
        f.player_bullet_at(shield.x + 5.0, shield.y + 5.0);

        f.resolve();
        assert!(f.bullets.player_bullets().is_empty());
        assert_eq!(f.shields.shields()[1].health, 5);
        assert_eq!(f.state.score(), 0);
    }

    #[test]
    fn enemy_hit_scores_ten_per_level() {
        let mut f = Fixture::new();
        f.state.next_level();
        f.enemies.spawn_wave(2, &f.t);
        let target = f.enemies.enemies()[0].rect;
        f.player_bullet_at(target.x + 5.0, target.y + 5.0);

        f.resolve();
        assert_eq!(f.state.score(), 20);
        assert_eq!(f.enemies.enemies().len(), 39);
        assert!(f.bullets.player_bullets().is_empty());
        assert!(f.events.iter().any(
            |e| matches!(e, GameEvent::Explosion { size, .. } if *size == ENEMY_EXPLOSION)
        ));
    }

    #[test]
    fn one_bullet_destroys_at_most_one_enemy() {
        let mut f = Fixture::new();
        f.enemies.spawn_wave(1, &f.t);
        // Straddles the gap between the first two rows.
        let a = f.enemies.enemies()[0].rect;
        f.player_bullet_at(a.x + 5.0, a.bottom() - 5.0);
        let before = f.enemies.enemies().len();

        f.resolve();
        assert_eq!(f.enemies.enemies().len(), before - 1);
        assert_eq!(f.state.score(), 10);
    }

    #[test]
    fn campaign_boss_loses_one_health_per_hit() {
        let mut f = Fixture::new();
        f.enemies.spawn_wave(BOSS_LEVEL, &f.t);
        let boss = f.enemies.boss().map(|b| b.rect).expect("boss spawned");
        f.player_bullet_at(boss.x + 10.0, boss.y + 10.0);
        f.player_bullet_at(boss.x + 50.0, boss.y + 10.0);

        f.resolve();
        assert_eq!(f.enemies.boss().map(|b| b.health), Some(18));
        assert_eq!(f.state.score(), 0);
        let fractions: Vec<f32> = f
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BossHealthChanged(fr) => Some(*fr),
                _ => None,
            })
            .collect();
        assert_eq!(fractions, vec![0.95, 0.9]);
    }

    #[test]
    fn last_hit_on_campaign_boss_wins_the_game() {
        let mut f = Fixture::new();
        f.state.enter_level(BOSS_LEVEL);
        f.enemies.spawn_wave(BOSS_LEVEL, &f.t);
        if let Some(boss) = f.enemies.boss_mut() {
            boss.health = 1;
        }
        let boss = f.enemies.boss().map(|b| b.rect).expect("boss spawned");
        f.player_bullet_at(boss.x + 10.0, boss.y + 10.0);

        f.resolve();
        assert!(!f.enemies.boss_fight());
        assert_eq!(f.state.score(), 500);
        assert_eq!(f.state.level(), 5);
        assert!(f.state.is_game_won());
        assert_eq!(f.state.drain_notices(), vec![StateNotice::GameWon]);
        assert!(f.events.iter().any(
            |e| matches!(e, GameEvent::Explosion { size, .. } if *size == BOSS_EXPLOSION)
        ));
    }

    #[test]
    fn infinite_boss_dies_in_one_hit_without_level_change() {
        let mut f = Fixture::new();
        f.state.enter_level(5);
        f.enemies.spawn_wave(5, &f.t);
        f.enemies.spawn_infinite_boss(&f.t);
        let boss = f.enemies.boss().map(|b| b.rect).expect("boss spawned");
        f.player_bullet_at(boss.x + 10.0, boss.y + 10.0);

        f.resolve();
        assert!(!f.enemies.boss_fight());
        assert_eq!(f.state.score(), 200);
        assert_eq!(f.state.level(), 5);
        assert!(f.state.is_playing());
        assert!(!f
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BossHealthChanged(_))));
    }

    #[test]
    fn boss_fight_shields_the_formation() {
        let mut f = Fixture::new();
        f.enemies.spawn_wave(5, &f.t);
        f.enemies.spawn_infinite_boss(&f.t);
        let enemy = f.enemies.enemies()[9].rect;
        f.player_bullet_at(enemy.x + 5.0, enemy.y + 5.0);

        f.resolve();
        assert_eq!(f.enemies.enemies().len(), 10);
        assert_eq!(f.bullets.player_bullets().len(), 1);
    }

    #[test]
    fn player_hit_respawns_at_start() {
        let mut f = Fixture::new();
        f.player.rect.x = 100.0;
        f.enemy_bullet_at(110.0, 545.0);

        f.resolve();
        assert_eq!(f.player.lives, 2);
        assert_eq!(f.player.rect.x, 380.0);
        assert!(f.bullets.enemy_bullets().is_empty());
        assert!(f
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerRespawned { x, .. } if *x == 380.0)));
    }

    #[test]
    fn only_one_player_hit_per_pass() {
        let mut f = Fixture::new();
        f.enemy_bullet_at(385.0, 545.0);
        f.enemy_bullet_at(395.0, 545.0);

        f.resolve();
        assert_eq!(f.player.lives, 2);
        assert_eq!(f.bullets.enemy_bullets().len(), 1);
    }

    #[test]
    fn last_life_ends_the_run() {
        let mut f = Fixture::new();
        f.player.lives = 1;
        f.enemy_bullet_at(390.0, 545.0);

        f.resolve();
        assert_eq!(f.player.lives, 0);
        assert!(f.state.is_game_over());
        assert_eq!(f.state.drain_notices(), vec![StateNotice::GameOver]);
    }

    #[test]
    fn landing_invaders_end_the_run() {
        let mut f = Fixture::new();
        f.enemies.spawn_wave(1, &f.t);
        assert!(!f.resolver().should_advance_level());
        f.player.rect.y = 175.0;

        f.resolve();
        assert!(f.state.is_game_over());
    }

    #[test]
    fn cleared_field_asks_for_next_level() {
        let mut f = Fixture::new();
        assert!(f.resolver().should_advance_level());
        f.enemies.spawn_wave(BOSS_LEVEL, &f.t);
        assert!(!f.resolver().should_advance_level());
    }
}
