use crate::config::Tunables;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub owner: Owner,
}

/// Player and enemy projectiles, each list kept in firing order.
#[derive(Clone, Debug)]
pub struct BulletManager {
    player_bullets: Vec<Bullet>,
    enemy_bullets: Vec<Bullet>,
    width: f32,
    height: f32,
    max_player_bullets: usize,
}

impl BulletManager {
    pub fn new(t: &Tunables) -> Self {
        Self {
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            width: t.bullet_width,
            height: t.bullet_height,
            max_player_bullets: t.max_player_bullets,
        }
    }

    pub fn player_bullets(&self) -> &[Bullet] {
        &self.player_bullets
    }

    pub fn enemy_bullets(&self) -> &[Bullet] {
        &self.enemy_bullets
    }

    /// Fires from the top-centre of `firer`. Refused once the live cap is
    /// reached.
    pub fn shoot_player_bullet(&mut self, firer: &Rect) -> bool {
        if self.player_bullets.len() >= self.max_player_bullets {
            return false;
        }
        let x = firer.x + firer.width / 2.0 - self.width / 2.0;
        let y = firer.y - self.height - 2.0;
        self.player_bullets.push(Bullet {
            rect: Rect::new(x, y, self.width, self.height),
            owner: Owner::Player,
        });
        true
    }

    /// Fires from the bottom-centre of `firer`. Enemy fire is uncapped.
    pub fn shoot_enemy_bullet(&mut self, firer: &Rect) {
        let x = firer.x + firer.width / 2.0 - self.width / 2.0;
        let y = firer.bottom() + 4.0;
        self.enemy_bullets.push(Bullet {
            rect: Rect::new(x, y, self.width, self.height),
            owner: Owner::Enemy,
        });
    }

    /// Moves every bullet one step and drops those that left the canvas by
    /// more than `margin`.
    pub fn advance(&mut self, player_speed: f32, enemy_speed: f32, canvas_height: f32, margin: f32) {
        for b in &mut self.player_bullets {
            b.rect.y -= player_speed;
        }
        self.player_bullets.retain(|b| b.rect.y >= -margin);

        for b in &mut self.enemy_bullets {
            b.rect.y += enemy_speed;
        }
        self.enemy_bullets.retain(|b| b.rect.y <= canvas_height + margin);
    }

    pub fn remove_player_bullet(&mut self, index: usize) -> Option<Bullet> {
        (index < self.player_bullets.len()).then(|| self.player_bullets.remove(index))
    }

    pub fn remove_enemy_bullet(&mut self, index: usize) -> Option<Bullet> {
        (index < self.enemy_bullets.len()).then(|| self.enemy_bullets.remove(index))
    }

    pub fn clear(&mut self) {
        self.player_bullets.clear();
        self.enemy_bullets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firer() -> Rect {
        Rect::new(380.0, 540.0, 40.0, 40.0)
    }

    #[test]
    fn player_bullet_is_centred_above_firer() {
        let mut bullets = BulletManager::new(&Tunables::default());
        assert!(bullets.shoot_player_bullet(&firer()));
        let b = bullets.player_bullets()[0];
        assert_eq!(b.rect, Rect::new(395.0, 518.0, 10.0, 20.0));
        assert_eq!(b.owner, Owner::Player);
    }

    #[test]
    fn enemy_bullet_is_centred_below_firer() {
        let mut bullets = BulletManager::new(&Tunables::default());
        bullets.shoot_enemy_bullet(&Rect::new(100.0, 20.0, 40.0, 30.0));
        let b = bullets.enemy_bullets()[0];
        assert_eq!(b.rect, Rect::new(115.0, 54.0, 10.0, 20.0));
        assert_eq!(b.owner, Owner::Enemy);
    }

    #[test]
    fn player_bullets_are_capped_at_four() {
        let mut bullets = BulletManager::new(&Tunables::default());
        let fired = (0..10).filter(|_| bullets.shoot_player_bullet(&firer())).count();
        assert_eq!(fired, 4);
        assert_eq!(bullets.player_bullets().len(), 4);
    }

    #[test]
    fn enemy_bullets_are_uncapped() {
        let mut bullets = BulletManager::new(&Tunables::default());
        for _ in 0..10 {
            bullets.shoot_enemy_bullet(&firer());
        }
        assert_eq!(bullets.enemy_bullets().len(), 10);
    }

    #[test]
    fn advance_moves_and_expires() {
        let mut bullets = BulletManager::new(&Tunables::default());
        bullets.shoot_player_bullet(&Rect::new(0.0, 25.0, 40.0, 40.0));
        bullets.shoot_enemy_bullet(&Rect::new(0.0, 560.0, 40.0, 10.0));
        assert_eq!(bullets.player_bullets()[0].rect.y, 3.0);
        assert_eq!(bullets.enemy_bullets()[0].rect.y, 574.0);

        bullets.advance(10.0, 6.0, 600.0, 10.0);
        assert_eq!(bullets.player_bullets()[0].rect.y, -7.0);
        assert_eq!(bullets.enemy_bullets()[0].rect.y, 580.0);

        bullets.advance(10.0, 6.0, 600.0, 10.0);
        assert!(bullets.player_bullets().is_empty());
        assert_eq!(bullets.enemy_bullets().len(), 1);

        for _ in 0..5 {
            bullets.advance(10.0, 6.0, 600.0, 10.0);
        }
        assert!(bullets.enemy_bullets().is_empty());
    }

    #[test]
    fn removing_a_missing_bullet_is_a_no_op() {
        let mut bullets = BulletManager::new(&Tunables::default());
        assert_eq!(bullets.remove_player_bullet(0), None);
        assert_eq!(bullets.remove_enemy_bullet(3), None);
    }
}
