use crate::bullets::Owner;
use crate::geometry::Rect;

/// Everything the presentation layer may want to draw or play after a tick.
/// None of these feed back into the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Explosion { x: f32, y: f32, size: f32 },
    BossHit { area: Rect },
    ScoreChanged(u32),
    LivesChanged(u32),
    LevelChanged(u32),
    WaveStarted(u32),
    /// Remaining boss health as a fraction of its maximum.
    BossHealthChanged(f32),
    BossBarShown,
    BossBarHidden,
    BossSpawned { infinite: bool },
    BossRemoved,
    ShieldHit { area: Rect, health_fraction: f32 },
    ShieldDestroyed { x: f32, y: f32 },
    PlayerRespawned { x: f32, y: f32 },
    Shot { owner: Owner },
    Paused(bool),
    GameOver,
    GameWon,
}

/// FIFO of effect events, drained by the host once per frame.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
