use tracing::debug;

use crate::config::{Tunables, SHIELD_HEIGHT, SHIELD_WIDTH};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::state::Mode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shield {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
}

impl Shield {
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health.max(0) as f32 / self.max_health as f32
    }
}

/// Destructible barriers between the formation and the player.
#[derive(Clone, Debug, Default)]
pub struct ShieldManager {
    shields: Vec<Shield>,
}

impl ShieldManager {
    pub fn shields(&self) -> &[Shield] {
        &self.shields
    }

    /// Replaces the current barriers with a fresh row for `mode`, spread
    /// evenly across the canvas.
    pub fn create_shields(&mut self, mode: Mode, t: &Tunables) {
        self.shields.clear();
        let (count, health) = match mode {
            Mode::Campaign => (t.campaign_shields, t.campaign_shield_health),
            Mode::Infinite => (t.infinite_shields, t.infinite_shield_health),
        };
        let spacing = t.canvas_width / (count + 1) as f32;
        let y = t.shield_y();
        for i in 0..count {
            let x = spacing * (i + 1) as f32 - SHIELD_WIDTH / 2.0;
            self.shields.push(Shield {
                rect: Rect::new(x, y, SHIELD_WIDTH, SHIELD_HEIGHT),
                health,
                max_health: health,
            });
        }
    }

    /// First standing shield, in list order, overlapping `rect`.
    pub fn first_intersecting(&self, rect: &Rect) -> Option<usize> {
        self.shields
            .iter()
            .position(|s| s.health > 0 && s.rect.intersects(rect))
    }

    /// Takes one point off shield `index`, removing it once it is spent.
    /// Returns false when there is no such shield.
    pub fn damage(&mut self, index: usize, events: &mut EventQueue) -> bool {
        let Some(shield) = self.shields.get_mut(index) else {
            return false;
        };
        shield.health -= 1;
        let shield = *shield;
        if shield.health <= 0 {
            let (x, y) = shield.rect.center();
            self.shields.remove(index);
            debug!(x, y, remaining = self.shields.len(), "shield destroyed");
            events.push(GameEvent::ShieldDestroyed { x, y });
        } else {
            events.push(GameEvent::ShieldHit {
                area: shield.rect,
                health_fraction: shield.health_fraction(),
            });
        }
        true
    }

    pub fn clear(&mut self) {
        self.shields.clear();
    }
}
