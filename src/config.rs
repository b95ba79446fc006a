//! Tunable gameplay constants.

use std::fmt;
use std::time::Duration;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 20.0;
pub const PLAYER_BULLET_SPEED: f32 = 10.0;
pub const ENEMY_BULLET_SPEED: f32 = 6.0;
pub const MAX_PLAYER_BULLETS: usize = 4;

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 30.0;
pub const FORMATION_MARGIN_X: f32 = 20.0;
pub const FORMATION_MARGIN_Y: f32 = 20.0;
pub const CAMPAIGN_ROW_SPACING: f32 = 40.0;
pub const INFINITE_ROW_SPACING: f32 = 35.0;
pub const EDGE_MARGIN: f32 = 10.0;

pub const CAMPAIGN_BOSS_WIDTH: f32 = 150.0;
pub const CAMPAIGN_BOSS_HEIGHT: f32 = 80.0;
pub const CAMPAIGN_BOSS_Y: f32 = 60.0;
pub const CAMPAIGN_BOSS_HEALTH: i32 = 20;
pub const INFINITE_BOSS_WIDTH: f32 = 120.0;
pub const INFINITE_BOSS_HEIGHT: f32 = 50.0;
pub const INFINITE_BOSS_Y: f32 = 40.0;
pub const INFINITE_BOSS_HEALTH: i32 = 1;
pub const BOSS_SPEED: f32 = 2.0;

pub const SHIELD_WIDTH: f32 = 60.0;
pub const SHIELD_HEIGHT: f32 = 20.0;
pub const SHIELD_OFFSET_FROM_BOTTOM: f32 = 120.0;

/// Regular waves are levels 1..=3, the boss is level 4.
pub const BOSS_LEVEL: u32 = 4;
pub const INFINITE_LEVEL: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Tunables {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_lives: u32,
    pub player_bottom_margin: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub max_player_bullets: usize,
    /// How far past the canvas edge a bullet may travel before it is dropped.
    pub offscreen_margin: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_level: f32,
    pub front_row_epsilon: f32,
    pub landing_threshold: f32,
    pub infinite_spawn_step: f32,
    pub infinite_spawn_cap: f32,
    pub infinite_speed_step: f32,

    pub boss_speed: f32,

    pub boss_fire_chance: f64,
    pub campaign_fire_base: f64,
    pub campaign_fire_per_level: f64,
    pub infinite_fire_base: f64,
    pub infinite_fire_per_wave: f64,

    pub campaign_shields: usize,
    pub campaign_shield_health: i32,
    pub infinite_shields: usize,
    pub infinite_shield_health: i32,

    pub points_per_enemy_level: u32,
    pub infinite_boss_hit_points: u32,
    pub boss_defeat_points: u32,

    pub boss_window_period: Duration,
    pub boss_window_open: Duration,
    pub boss_respawn_gap: Duration,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_lives: PLAYER_LIVES,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            max_player_bullets: MAX_PLAYER_BULLETS,
            offscreen_margin: 10.0,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_base_speed: 1.0,
            enemy_speed_per_level: 0.3,
            front_row_epsilon: 5.0,
            landing_threshold: 10.0,
            infinite_spawn_step: 5.0,
            infinite_spawn_cap: 0.4,
            infinite_speed_step: 0.1,
            boss_speed: BOSS_SPEED,
            boss_fire_chance: 0.05,
            campaign_fire_base: 0.02,
            campaign_fire_per_level: 0.02,
            infinite_fire_base: 0.03,
            infinite_fire_per_wave: 0.01,
            campaign_shields: 2,
            campaign_shield_health: 5,
            infinite_shields: 5,
            infinite_shield_health: 30,
            points_per_enemy_level: 10,
            infinite_boss_hit_points: 200,
            boss_defeat_points: 500,
            boss_window_period: Duration::from_secs(180),
            boss_window_open: Duration::from_secs(30),
            boss_respawn_gap: Duration::from_secs(180),
        }
    }
}

impl Tunables {
    /// Same tunables with every enemy and boss shot disabled.
    pub fn without_enemy_fire(mut self) -> Self {
        self.boss_fire_chance = 0.0;
        self.campaign_fire_base = 0.0;
        self.campaign_fire_per_level = 0.0;
        self.infinite_fire_base = 0.0;
        self.infinite_fire_per_wave = 0.0;
        self
    }

    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.enemy_base_speed + self.enemy_speed_per_level * level as f32
    }

    pub fn campaign_fire_chance(&self, level: u32) -> f64 {
        self.campaign_fire_base + self.campaign_fire_per_level * level as f64
    }

    pub fn infinite_fire_chance(&self, wave: u32) -> f64 {
        self.infinite_fire_base + self.infinite_fire_per_wave * wave as f64
    }

    /// Y coordinate of the player's top edge at its start position.
    pub fn player_start_y(&self) -> f32 {
        self.canvas_height - self.player_height - self.player_bottom_margin
    }

    pub fn shield_y(&self) -> f32 {
        self.canvas_height - SHIELD_OFFSET_FROM_BOTTOM
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
        ];
        for (field, value) in sizes {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let chances = [
            ("boss_fire_chance", self.boss_fire_chance),
            ("campaign_fire_base", self.campaign_fire_base),
            ("campaign_fire_per_level", self.campaign_fire_per_level),
            ("infinite_fire_base", self.infinite_fire_base),
            ("infinite_fire_per_wave", self.infinite_fire_per_wave),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { field, value });
            }
        }

        if self.player_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.max_player_bullets == 0 {
            return Err(ConfigError::NoPlayerBullets);
        }
        if self.boss_window_open > self.boss_window_period {
            return Err(ConfigError::BossWindowTooLong {
                open: self.boss_window_open,
                period: self.boss_window_period,
            });
        }

        let min_width = CAMPAIGN_BOSS_WIDTH + 2.0 * EDGE_MARGIN;
        let min_height = SHIELD_OFFSET_FROM_BOTTOM + CAMPAIGN_BOSS_Y + CAMPAIGN_BOSS_HEIGHT;
        if self.canvas_width < min_width
            || self.canvas_height < min_height
            || self.player_start_y() <= self.shield_y() + SHIELD_HEIGHT
        {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    ChanceOutOfRange { field: &'static str, value: f64 },
    NoLives,
    NoPlayerBullets,
    BossWindowTooLong { open: Duration, period: Duration },
    CanvasTooSmall { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::ChanceOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::NoLives => write!(f, "player_lives must be at least 1"),
            Self::NoPlayerBullets => write!(f, "max_player_bullets must be at least 1"),
            Self::BossWindowTooLong { open, period } => write!(
                f,
                "boss window of {}s does not fit in a {}s period",
                open.as_secs(),
                period.as_secs()
            ),
            Self::CanvasTooSmall { width, height } => write!(
                f,
                "canvas {width}x{height} is too small to hold the boss, shields and player"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
