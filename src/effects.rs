use std::time::Duration;

use rand::Rng;
use rustvaders::{GameEvent, Rect};

const EXPLOSION_LIFETIME: Duration = Duration::from_millis(300);
const FLASH_LIFETIME: Duration = Duration::from_millis(100);
const RESPAWN_BLINK: Duration = Duration::from_millis(600);
const SHIELD_DEBRIS_SIZE: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    Explosion { x: f32, y: f32, size: f32 },
    BossFlash(Rect),
    ShieldFlash(Rect),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    age: Duration,
    lifetime: Duration,
}

impl Effect {
    fn new(kind: EffectKind, lifetime: Duration) -> Self {
        Effect {
            kind,
            age: Duration::ZERO,
            lifetime,
        }
    }

    /// 0.0 when spawned, 1.0 when about to disappear.
    pub fn progress(&self) -> f32 {
        (self.age.as_secs_f32() / self.lifetime.as_secs_f32()).min(1.0)
    }

    /// Explosions grow from half their size to full size.
    pub fn radius(&self) -> f32 {
        match self.kind {
            EffectKind::Explosion { size, .. } => size * (0.5 + 0.5 * self.progress()) / 2.0,
            _ => 0.0,
        }
    }

    fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Bursts scheduled when a run ends, followed by the result banner.
#[derive(Clone, Debug)]
struct Ending {
    won: bool,
    elapsed: Duration,
    bursts: Vec<Duration>,
    size: f32,
    banner_at: Duration,
}

impl Ending {
    fn new(won: bool) -> Self {
        let (count, gap, size, banner_at) = if won {
            (10, Duration::from_millis(150), 50.0, Duration::from_millis(1500))
        } else {
            (5, Duration::from_millis(200), 40.0, Duration::from_millis(1000))
        };
        Ending {
            won,
            elapsed: Duration::ZERO,
            bursts: (0..count).map(|i| gap * i).collect(),
            size,
            banner_at,
        }
    }
}

/// Cosmetic layer fed by world events. Nothing here touches the world.
#[derive(Clone, Debug, Default)]
pub struct Effects {
    effects: Vec<Effect>,
    ending: Option<Ending>,
    blink: Duration,
}

impl Effects {
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Explosion { x, y, size } => self.explode(x, y, size),
            GameEvent::BossHit { area } => self
                .effects
                .push(Effect::new(EffectKind::BossFlash(area), FLASH_LIFETIME)),
            GameEvent::ShieldHit { area, .. } => self
                .effects
                .push(Effect::new(EffectKind::ShieldFlash(area), FLASH_LIFETIME)),
            GameEvent::ShieldDestroyed { x, y } => self.explode(x, y, SHIELD_DEBRIS_SIZE),
            GameEvent::PlayerRespawned { .. } => self.blink = RESPAWN_BLINK,
            GameEvent::GameOver => self.ending = Some(Ending::new(false)),
            GameEvent::GameWon => self.ending = Some(Ending::new(true)),
            _ => {}
        }
    }

    fn explode(&mut self, x: f32, y: f32, size: f32) {
        self.effects.push(Effect::new(
            EffectKind::Explosion { x, y, size },
            EXPLOSION_LIFETIME,
        ));
    }

    /// Ages every effect by `dt` and fires due ending bursts at random spots
    /// of a `width` x `height` canvas.
    pub fn advance<R: Rng>(&mut self, dt: Duration, rng: &mut R, width: f32, height: f32) {
        for effect in &mut self.effects {
            effect.age += dt;
        }
        self.effects.retain(|e| !e.expired());
        self.blink = self.blink.saturating_sub(dt);

        let Some(ending) = self.ending.as_mut() else {
            return;
        };
        ending.elapsed += dt;
        let now = ending.elapsed;
        let size = ending.size;
        let due = ending.bursts.iter().filter(|at| **at <= now).count();
        ending.bursts.drain(..due);
        for _ in 0..due {
            let x = rng.gen::<f32>() * width;
            let y = rng.gen::<f32>() * height;
            self.explode(x, y, size);
        }
    }

    /// The player sprite flickers for a moment after a respawn.
    pub fn player_visible(&self, frame: u64) -> bool {
        self.blink.is_zero() || (frame / 3) % 2 == 0
    }

    /// Some(won) once the ending bursts have played out.
    pub fn banner(&self) -> Option<bool> {
        self.ending
            .as_ref()
            .filter(|e| e.elapsed >= e.banner_at)
            .map(|e| e.won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const STEP: Duration = Duration::from_millis(20);

    fn explosions(effects: &Effects) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::Explosion { .. }))
            .count()
    }

    #[test]
    fn explosion_grows_then_expires() {
        let mut effects = Effects::default();
        let mut rng = StdRng::seed_from_u64(1);
        effects.apply(&GameEvent::Explosion {
            x: 10.0,
            y: 10.0,
            size: 40.0,
        });
        let start = effects.iter().next().map(Effect::radius);
        assert_eq!(start, Some(10.0));

        for _ in 0..10 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        let later = effects.iter().next().map(Effect::radius).unwrap_or(0.0);
        assert!(later > 10.0);

        for _ in 0..10 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        assert_eq!(explosions(&effects), 0);
    }

    #[test]
    fn game_over_plays_five_bursts_then_banner() {
        let mut effects = Effects::default();
        let mut rng = StdRng::seed_from_u64(1);
        effects.apply(&GameEvent::GameOver);
        assert_eq!(effects.banner(), None);

        let mut fired = 0;
        for _ in 0..50 {
            let before = explosions(&effects);
            effects.advance(STEP, &mut rng, 800.0, 600.0);
            fired += explosions(&effects).saturating_sub(before);
            if fired >= 5 {
                break;
            }
        }
        assert_eq!(fired, 5);

        for _ in 0..50 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        assert_eq!(effects.banner(), Some(false));
    }

    #[test]
    fn win_banner_waits_longer() {
        let mut effects = Effects::default();
        let mut rng = StdRng::seed_from_u64(1);
        effects.apply(&GameEvent::GameWon);
        for _ in 0..60 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        assert_eq!(effects.banner(), None);
        for _ in 0..20 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        assert_eq!(effects.banner(), Some(true));
    }

    #[test]
    fn respawn_blinks_the_player() {
        let mut effects = Effects::default();
        let mut rng = StdRng::seed_from_u64(1);
        effects.apply(&GameEvent::PlayerRespawned { x: 0.0, y: 0.0 });
        assert!(!effects.player_visible(3));
        for _ in 0..40 {
            effects.advance(STEP, &mut rng, 800.0, 600.0);
        }
        assert!(effects.player_visible(3));
    }
}
