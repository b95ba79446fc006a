use rand::Rng;
use tracing::debug;

use crate::config::{
    Tunables, BOSS_LEVEL, CAMPAIGN_BOSS_HEALTH, CAMPAIGN_BOSS_HEIGHT, CAMPAIGN_BOSS_WIDTH,
    CAMPAIGN_BOSS_Y, CAMPAIGN_ROW_SPACING, EDGE_MARGIN, FORMATION_MARGIN_X, FORMATION_MARGIN_Y,
    INFINITE_BOSS_HEALTH, INFINITE_BOSS_HEIGHT, INFINITE_BOSS_WIDTH, INFINITE_BOSS_Y,
    INFINITE_LEVEL, INFINITE_ROW_SPACING,
};
use crate::geometry::Rect;

/// Every infinite-mode invader is drawn as a top-tier one.
const INFINITE_ENEMY_TIER: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Difficulty tier; only picks the sprite.
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    Campaign,
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boss {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub direction: f32,
    pub kind: BossKind,
}

impl Boss {
    /// Centred horizontally near the top of the canvas.
    pub fn new(kind: BossKind, canvas_width: f32) -> Self {
        let (width, height, y, health) = match kind {
            BossKind::Campaign => (
                CAMPAIGN_BOSS_WIDTH,
                CAMPAIGN_BOSS_HEIGHT,
                CAMPAIGN_BOSS_Y,
                CAMPAIGN_BOSS_HEALTH,
            ),
            BossKind::Infinite => (
                INFINITE_BOSS_WIDTH,
                INFINITE_BOSS_HEIGHT,
                INFINITE_BOSS_Y,
                INFINITE_BOSS_HEALTH,
            ),
        };
        Boss {
            rect: Rect::new((canvas_width - width) / 2.0, y, width, height),
            health,
            max_health: health,
            direction: 1.0,
            kind,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.kind == BossKind::Infinite
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.max(0) as f32 / self.max_health as f32
    }

    /// Slides sideways and turns around at the canvas margins.
    pub fn update(&mut self, speed: f32, canvas_width: f32) {
        self.rect.x += self.direction * speed;
        if self.rect.x <= EDGE_MARGIN || self.rect.right() >= canvas_width - EDGE_MARGIN {
            self.direction = -self.direction;
        }
    }
}

/// The invader formation plus the optional boss. A boss fight is in
/// progress exactly when `boss` is `Some`.
#[derive(Clone, Debug)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    boss: Option<Boss>,
    direction: f32,
    wave: u32,
    speed_multiplier: f32,
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self {
            enemies: Vec::new(),
            boss: None,
            direction: 1.0,
            wave: 1,
            speed_multiplier: 1.0,
        }
    }
}

impl EnemyManager {
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut()
    }

    pub fn boss_fight(&self) -> bool {
        self.boss.is_some()
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Number of the next infinite wave to be spawned.
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Clears the field and fills it for `level`: a grid for 1..=3, the boss
    /// for 4, the first endless wave for 5.
    pub fn spawn_wave(&mut self, level: u32, t: &Tunables) {
        self.clear();
        self.wave = 1;
        self.speed_multiplier = 1.0;

        match level {
            1..=3 => self.spawn_regular(level, t),
            BOSS_LEVEL => self.spawn_boss(BossKind::Campaign, t),
            INFINITE_LEVEL => self.spawn_infinite_wave(t),
            _ => {}
        }
    }

    fn spawn_regular(&mut self, level: u32, t: &Tunables) {
        let rows = 3 + level;
        let cols = 6 + level;
        self.spawn_grid(rows, cols, FORMATION_MARGIN_Y, CAMPAIGN_ROW_SPACING, level, t);
        debug!(level, rows, cols, "formation spawned");
    }

    /// Next endless wave: bigger, lower and faster than the previous one.
    pub fn spawn_infinite_wave(&mut self, t: &Tunables) {
        self.clear();
        let wave = self.wave;
        let rows = 2 + wave / 2;
        let cols = 4 + wave;
        let start_y = (FORMATION_MARGIN_Y + t.infinite_spawn_step * wave as f32)
            .min(t.canvas_height * t.infinite_spawn_cap);
        self.spawn_grid(rows, cols, start_y, INFINITE_ROW_SPACING, INFINITE_ENEMY_TIER, t);
        self.speed_multiplier = 1.0 + t.infinite_speed_step * wave as f32;
        self.wave += 1;
        debug!(wave, rows, cols, start_y, "infinite wave spawned");
    }

    fn spawn_grid(&mut self, rows: u32, cols: u32, start_y: f32, row_spacing: f32, tier: u32, t: &Tunables) {
        let spacing_x = (t.canvas_width - FORMATION_MARGIN_X * 2.0) / cols as f32;
        for r in 0..rows {
            for c in 0..cols {
                self.enemies.push(Enemy {
                    rect: Rect::new(
                        FORMATION_MARGIN_X + c as f32 * spacing_x,
                        start_y + r as f32 * row_spacing,
                        t.enemy_width,
                        t.enemy_height,
                    ),
                    level: tier,
                });
            }
        }
    }

    fn spawn_boss(&mut self, kind: BossKind, t: &Tunables) {
        self.boss = Some(Boss::new(kind, t.canvas_width));
    }

    /// Brings in the one-hit endless-mode boss. The formation stays where it
    /// is and freezes until the boss leaves.
    pub fn spawn_infinite_boss(&mut self, t: &Tunables) {
        self.spawn_boss(BossKind::Infinite, t);
    }

    pub fn remove_boss(&mut self) -> Option<Boss> {
        self.boss.take()
    }

    /// One movement step. Returns true when an empty field in endless mode
    /// was refilled with a new wave instead.
    pub fn update_enemies(&mut self, base_speed: f32, infinite: bool, t: &Tunables) -> bool {
        if let Some(boss) = self.boss.as_mut() {
            boss.update(t.boss_speed, t.canvas_width);
            return false;
        }

        if self.enemies.is_empty() {
            if infinite {
                self.spawn_infinite_wave(t);
                return true;
            }
            return false;
        }

        let left = self.enemies.iter().map(|e| e.rect.x).fold(f32::INFINITY, f32::min);
        let right = self
            .enemies
            .iter()
            .map(|e| e.rect.right())
            .fold(f32::NEG_INFINITY, f32::max);

        if right >= t.canvas_width - EDGE_MARGIN && self.direction > 0.0 {
            self.direction = -1.0;
        }
        if left <= EDGE_MARGIN && self.direction < 0.0 {
            self.direction = 1.0;
        }

        let speed = if infinite {
            base_speed * self.speed_multiplier
        } else {
            base_speed
        };
        for enemy in &mut self.enemies {
            enemy.rect.x += self.direction * speed;
        }
        false
    }

    /// The row with the smallest Y: only it may open fire.
    pub fn shooting_enemies(&self, epsilon: f32) -> Vec<&Enemy> {
        let min_y = self.enemies.iter().map(|e| e.rect.y).fold(f32::INFINITY, f32::min);
        self.enemies
            .iter()
            .filter(|e| (e.rect.y - min_y).abs() < epsilon)
            .collect()
    }

    pub fn random_shooter<R: Rng + ?Sized>(&self, epsilon: f32, rng: &mut R) -> Option<Rect> {
        let shooters = self.shooting_enemies(epsilon);
        if shooters.is_empty() {
            return None;
        }
        Some(shooters[rng.gen_range(0..shooters.len())].rect)
    }

    pub fn remove_enemy(&mut self, index: usize) -> Option<Enemy> {
        (index < self.enemies.len()).then(|| self.enemies.remove(index))
    }

    /// Drops the formation and the boss.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.boss = None;
    }

    /// Whether any invader's bottom edge is within `threshold` of `player_y`.
    pub fn any_enemy_near_player(&self, player_y: f32, threshold: f32) -> bool {
        self.enemies
            .iter()
            .any(|e| e.rect.bottom() >= player_y - threshold)
    }
}
