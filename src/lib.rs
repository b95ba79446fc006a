//! Simulation core of a Space Invaders style shooter.
//!
//! Everything lives in one [`World`] advanced synchronously by `tick()`. The
//! world never draws anything; it exposes snapshots for rendering and a queue
//! of [`GameEvent`]s for effects.

pub mod bullets;
pub mod clock;
pub mod collision;
pub mod config;
pub mod enemies;
pub mod events;
pub mod geometry;
pub mod player;
pub mod shields;
pub mod state;
pub mod world;

pub use bullets::{Bullet, BulletManager, Owner};
pub use clock::TICK_INTERVAL;
pub use config::{ConfigError, Tunables};
pub use enemies::{Boss, BossKind, Enemy, EnemyManager};
pub use events::GameEvent;
pub use geometry::Rect;
pub use shields::Shield;
pub use state::{Mode, Phase};
pub use world::{Snapshot, World};
