use crate::config::Tunables;
use crate::geometry::Rect;

/// The player's cannon. Movement and firing are intents set by input
/// translation and consumed once per tick.
#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
    pub speed: f32,
    move_left: bool,
    move_right: bool,
    shooting: bool,
}

impl Player {
    pub fn new(t: &Tunables) -> Self {
        let (x, y) = Self::start_position(t);
        Player {
            rect: Rect::new(x, y, t.player_width, t.player_height),
            lives: t.player_lives,
            speed: t.player_speed,
            move_left: false,
            move_right: false,
            shooting: false,
        }
    }

    /// Bottom-centre of the play field.
    pub fn start_position(t: &Tunables) -> (f32, f32) {
        ((t.canvas_width - t.player_width) / 2.0, t.player_start_y())
    }

    pub fn set_move_left(&mut self, on: bool) {
        self.move_left = on;
    }

    pub fn set_move_right(&mut self, on: bool) {
        self.move_right = on;
    }

    pub fn set_shooting(&mut self, on: bool) {
        self.shooting = on;
    }

    pub fn is_moving_left(&self) -> bool {
        self.move_left
    }

    pub fn is_moving_right(&self) -> bool {
        self.move_right
    }

    pub fn wants_to_shoot(&self) -> bool {
        self.shooting
    }

    /// Applies the movement intents, clamped to the canvas.
    pub fn update_position(&mut self, canvas_width: f32) {
        let mut x = self.rect.x;
        if self.move_left {
            x -= self.speed;
        }
        if self.move_right {
            x += self.speed;
        }
        let max_x = (canvas_width - self.rect.width).max(0.0);
        self.rect.x = x.clamp(0.0, max_x);
    }

    /// Consumes the fire intent. The flag is cleared whether or not a bullet
    /// actually leaves the cannon.
    pub fn take_shot(&mut self) -> bool {
        std::mem::replace(&mut self.shooting, false)
    }

    /// Removes one life and reports whether that was the last one.
    pub fn hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn respawn(&mut self, t: &Tunables) {
        let (x, y) = Self::start_position(t);
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn reset(&mut self, t: &Tunables) {
        self.lives = t.player_lives;
        self.move_left = false;
        self.move_right = false;
        self.shooting = false;
        self.respawn(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_bottom_centre_with_full_lives() {
        let t = Tunables::default();
        let p = Player::new(&t);
        assert_eq!(p.rect.x, 380.0);
        assert_eq!(p.rect.y, 540.0);
        assert_eq!(p.lives, 3);
    }

    #[test]
    fn movement_is_clamped_to_canvas() {
        let t = Tunables::default();
        let mut p = Player::new(&t);
        p.rect.x = 2.0;
        p.set_move_left(true);
        p.update_position(t.canvas_width);
        assert_eq!(p.rect.x, 0.0);

        p.set_move_left(false);
        p.set_move_right(true);
        p.rect.x = t.canvas_width - t.player_width - 1.0;
        p.update_position(t.canvas_width);
        assert_eq!(p.rect.x, t.canvas_width - t.player_width);
    }

    #[test]
    fn opposite_intents_cancel() {
        let t = Tunables::default();
        let mut p = Player::new(&t);
        p.set_move_left(true);
        p.set_move_right(true);
        p.update_position(t.canvas_width);
        assert_eq!(p.rect.x, 380.0);
    }

    #[test]
    fn shot_intent_is_edge_triggered() {
        let t = Tunables::default();
        let mut p = Player::new(&t);
        assert!(!p.take_shot());
        p.set_shooting(true);
        assert!(p.take_shot());
        assert!(!p.take_shot());
    }

    #[test]
    fn lives_never_go_below_zero() {
        let t = Tunables::default();
        let mut p = Player::new(&t);
        assert!(!p.hit());
        assert!(!p.hit());
        assert!(p.hit());
        assert!(p.hit());
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn reset_restores_lives_position_and_intents() {
        let t = Tunables::default();
        let mut p = Player::new(&t);
        p.hit();
        p.rect.x = 10.0;
        p.set_move_left(true);
        p.set_move_right(true);
        p.set_shooting(true);
        p.reset(&t);
        assert_eq!(p.lives, 3);
        assert_eq!(p.rect.x, 380.0);
        assert!(!p.is_moving_left());
        assert!(!p.is_moving_right());
        assert!(!p.wants_to_shoot());
    }
}
