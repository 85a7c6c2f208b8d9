use std::f32::consts::PI;

use rand::Rng;

use crate::audio::{SoundEvent, SoundSink};
use crate::config::GameConfig;
use crate::game::geometry::Rect;
use crate::game::paddle::Paddle;
use crate::game::Side;

/// Steepest rebound off a paddle edge (75 degrees).
pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * PI / 12.0;

#[derive(Debug, Clone)]
pub struct Ball {
    rect: Rect,
    vx: f32,
    vy: f32,
    speed: f32,
    initial_speed: f32,
    speed_increment: f32,
    max_speed: f32,
    active: bool,
    field_width: f32,
    field_height: f32,
}

impl Ball {
    /// A centred, inactive ball waiting to be served.
    pub fn new(config: &GameConfig) -> Self {
        let b = &config.ball;
        let mut ball = Self {
            rect: Rect::new(0.0, 0.0, b.size, b.size),
            vx: 0.0,
            vy: 0.0,
            speed: b.initial_speed,
            initial_speed: b.initial_speed,
            speed_increment: b.speed_increment,
            max_speed: b.max_speed,
            active: false,
            field_width: config.field.width,
            field_height: config.field.height,
        };
        ball.reset();
        ball
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move the ball so its centre sits at (cx, cy).
    #[cfg(test)]
    pub fn place(&mut self, cx: f32, cy: f32) {
        self.rect.set_center(cx, cy);
    }

    #[cfg(test)]
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vx = vx;
        self.vy = vy;
    }

    /// Serve in a random direction: left or right with equal odds, with a
    /// vertical component small enough to keep the serve playable.
    pub fn launch<R: Rng>(&mut self, rng: &mut R) {
        let dx: f32 = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let dy: f32 = rng.gen_range(-0.5..=0.5);
        let magnitude = (dx * dx + dy * dy).sqrt();

        self.vx = dx / magnitude * self.speed;
        self.vy = dy / magnitude * self.speed;
        self.active = true;
        log::debug!("ball launched vx={:.2} vy={:.2}", self.vx, self.vy);
    }

    /// Serve with an exact velocity.
    #[cfg(test)]
    pub fn launch_with(&mut self, vx: f32, vy: f32) {
        self.set_velocity(vx, vy);
        self.active = true;
    }

    pub fn update(&mut self, sounds: &mut dyn SoundSink) {
        if !self.active {
            return;
        }

        self.rect.x += self.vx;
        self.rect.y += self.vy;

        if self.rect.top() <= 0.0 || self.rect.bottom() >= self.field_height {
            self.vy = -self.vy;
            // Park one pixel inside so the next frame does not flip it back
            if self.rect.top() <= 0.0 {
                self.rect.set_top(1.0);
            } else {
                self.rect.set_bottom(self.field_height - 1.0);
            }
            sounds.play(SoundEvent::WallBounce);
        }
    }

    /// Rebound off whichever paddle the ball overlaps. The left paddle wins
    /// if both somehow do. Returns the side that was hit.
    pub fn check_paddle_collision(
        &mut self,
        left: &Paddle,
        right: &Paddle,
        sounds: &mut dyn SoundSink,
    ) -> Option<Side> {
        let (side, paddle) = if self.rect.overlaps(left.rect()) {
            (Side::Left, left.rect())
        } else if self.rect.overlaps(right.rect()) {
            (Side::Right, right.rect())
        } else {
            return None;
        };

        // +1 at the paddle's top edge, -1 at its bottom edge
        let relative = ((paddle.center_y() - self.rect.center_y()) / (paddle.height / 2.0))
            .clamp(-1.0, 1.0);
        let angle = relative * MAX_BOUNCE_ANGLE;

        self.speed = (self.speed + self.speed_increment).min(self.max_speed);

        let direction = match side {
            Side::Left => 1.0,
            Side::Right => -1.0,
        };
        self.vx = direction * angle.cos() * self.speed;
        self.vy = -angle.sin() * self.speed;

        match side {
            Side::Left => self.rect.set_left(paddle.right() + 1.0),
            Side::Right => self.rect.set_right(paddle.left() - 1.0),
        }

        sounds.play(SoundEvent::PaddleHit);
        Some(side)
    }

    /// Returns the side that won the point, if the ball left the court.
    /// A point resets the ball, so one crossing scores exactly once.
    pub fn check_score(&mut self, sounds: &mut dyn SoundSink) -> Option<Side> {
        let scorer = if self.rect.left() <= 0.0 {
            Some(Side::Right)
        } else if self.rect.right() >= self.field_width {
            Some(Side::Left)
        } else {
            None
        };

        if scorer.is_some() {
            sounds.play(SoundEvent::Score);
            self.reset();
        }
        scorer
    }

    pub fn reset(&mut self) {
        self.rect
            .set_center(self.field_width / 2.0, self.field_height / 2.0);
        self.speed = self.initial_speed;
        self.vx = 0.0;
        self.vy = 0.0;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::keys::Key;
    use crate::game::paddle::Control;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn paddles() -> (Paddle, Paddle) {
        let config = GameConfig::default();
        let left = Paddle::new(
            Side::Left,
            Control::Human {
                up: Key::W,
                down: Key::S,
            },
            &config,
        );
        let right = Paddle::new(Side::Right, Control::Ai, &config);
        (left, right)
    }

    fn assert_centered(ball: &Ball) {
        assert_eq!(ball.rect().center_x(), 400.0);
        assert_eq!(ball.rect().center_y(), 300.0);
    }

    #[test]
    fn test_new_ball_is_reset() {
        let ball = Ball::new(&GameConfig::default());
        assert!(!ball.is_active());
        assert_centered(&ball);
        assert_eq!(ball.velocity(), (0.0, 0.0));
        assert_eq!(ball.speed(), 4.0);
    }

    #[test]
    fn test_launch_speed_matches() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut ball = Ball::new(&GameConfig::default());
            ball.launch(&mut rng);
            let (vx, vy) = ball.velocity();
            assert!(ball.is_active());
            assert!(((vx * vx + vy * vy).sqrt() - ball.speed()).abs() < 1e-4);
            assert!(vx != 0.0);
            // dy is at most half of dx before normalising
            assert!(vy.abs() <= vx.abs() * 0.5 + 1e-4);
        }
    }

    #[test]
    fn test_launch_goes_both_ways() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut left = 0;
        let mut right = 0;
        for _ in 0..100 {
            let mut ball = Ball::new(&GameConfig::default());
            ball.launch(&mut rng);
            if ball.velocity().0 > 0.0 {
                right += 1;
            } else {
                left += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_update_inactive_is_noop() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.set_velocity(5.0, 5.0);
        let before = *ball.rect();
        let mut sounds = Vec::new();
        ball.update(&mut sounds);
        assert_eq!(*ball.rect(), before);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.place(400.0, 7.0);
        ball.launch_with(2.0, -4.0);
        let mut sounds = Vec::new();
        ball.update(&mut sounds);
        assert_eq!(ball.velocity(), (2.0, 4.0));
        assert_eq!(ball.rect().top(), 1.0);
        assert_eq!(sounds, vec![SoundEvent::WallBounce]);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.place(400.0, 593.0);
        ball.launch_with(-2.0, 4.0);
        let mut sounds = Vec::new();
        ball.update(&mut sounds);
        assert_eq!(ball.velocity(), (-2.0, -4.0));
        assert_eq!(ball.rect().bottom(), 599.0);
        assert_eq!(sounds, vec![SoundEvent::WallBounce]);
    }

    #[test]
    fn test_center_hit_on_right_paddle_returns_flat() {
        let (left, right) = paddles();
        let mut ball = Ball::new(&GameConfig::default());
        // Right paddle spans x 740..750, centre y 300
        ball.place(742.0, 300.0);
        ball.launch_with(4.0, 0.0);
        let mut sounds = Vec::new();
        let hit = ball.check_paddle_collision(&left, &right, &mut sounds);
        assert_eq!(hit, Some(Side::Right));
        assert_eq!(ball.speed(), 4.5);
        let (vx, vy) = ball.velocity();
        assert!((vx + 4.5).abs() < 1e-5);
        assert!(vy.abs() < 1e-5);
        assert_eq!(ball.rect().right(), 739.0);
        assert_eq!(sounds, vec![SoundEvent::PaddleHit]);
    }

    #[test]
    fn test_edge_hit_on_left_paddle_angles_away() {
        let (left, right) = paddles();
        let mut ball = Ball::new(&GameConfig::default());
        // Left paddle spans x 50..60, y 250..350; hit near its top edge
        ball.place(58.0, 250.0);
        ball.launch_with(-4.0, 0.0);
        let mut sounds = Vec::new();
        let hit = ball.check_paddle_collision(&left, &right, &mut sounds);
        assert_eq!(hit, Some(Side::Left));
        let (vx, vy) = ball.velocity();
        assert!(vx > 0.0);
        // Above centre sends the ball upward at the full 75 degrees
        assert!((vx - MAX_BOUNCE_ANGLE.cos() * 4.5).abs() < 1e-4);
        assert!((vy + MAX_BOUNCE_ANGLE.sin() * 4.5).abs() < 1e-4);
        assert_eq!(ball.rect().left(), 61.0);
    }

    #[test]
    fn test_no_collision_in_open_court() {
        let (left, right) = paddles();
        let mut ball = Ball::new(&GameConfig::default());
        ball.launch_with(4.0, 0.0);
        let mut sounds = Vec::new();
        assert_eq!(ball.check_paddle_collision(&left, &right, &mut sounds), None);
        assert_eq!(ball.speed(), 4.0);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_speed_caps_at_max() {
        let (left, right) = paddles();
        let mut ball = Ball::new(&GameConfig::default());
        ball.launch_with(-4.0, 0.0);
        let mut sounds = Vec::new();
        for _ in 0..30 {
            ball.place(55.0, 300.0);
            ball.check_paddle_collision(&left, &right, &mut sounds);
        }
        assert_eq!(ball.speed(), 10.0);
    }

    #[test]
    fn test_right_edge_scores_for_left() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.launch_with(5.0, 0.0);
        let mut sounds = Vec::new();
        let mut frames = 0;
        let scorer = loop {
            ball.update(&mut sounds);
            frames += 1;
            let crossed = ball.rect().right() >= 800.0;
            let scorer = ball.check_score(&mut sounds);
            assert_eq!(scorer.is_some(), crossed);
            if let Some(side) = scorer {
                break side;
            }
        };
        assert_eq!(scorer, Side::Left);
        assert_eq!(scorer.code(), 1);
        assert_eq!(frames, 79);
        assert!(!ball.is_active());
        assert_centered(&ball);
        assert_eq!(sounds, vec![SoundEvent::Score]);
    }

    #[test]
    fn test_left_edge_scores_for_right() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.place(4.0, 300.0);
        ball.launch_with(-3.0, 0.0);
        let mut sounds = Vec::new();
        ball.update(&mut sounds);
        let scorer = ball.check_score(&mut sounds);
        assert_eq!(scorer, Some(Side::Right));
        assert_eq!(scorer.map(Side::code), Some(2));
        // Already reset, a second check finds nothing
        assert_eq!(ball.check_score(&mut sounds), None);
    }

    #[test]
    fn test_left_edge_on_goal_line_scores() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.place(5.0, 300.0);
        assert_eq!(ball.rect().left(), 0.0);
        let mut sounds = Vec::new();
        assert_eq!(ball.check_score(&mut sounds), Some(Side::Right));
        assert_eq!(sounds, vec![SoundEvent::Score]);
    }

    #[test]
    fn test_left_edge_just_inside_does_not_score() {
        let mut ball = Ball::new(&GameConfig::default());
        ball.place(5.5, 300.0);
        let mut sounds = Vec::new();
        assert_eq!(ball.check_score(&mut sounds), None);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_reset_restores_initial_speed() {
        let (left, right) = paddles();
        let mut ball = Ball::new(&GameConfig::default());
        ball.launch_with(-4.0, 0.0);
        ball.place(55.0, 300.0);
        ball.check_paddle_collision(&left, &right, &mut Vec::new());
        assert!(ball.speed() > 4.0);
        ball.reset();
        assert!(!ball.is_active());
        assert_centered(&ball);
        assert_eq!(ball.velocity(), (0.0, 0.0));
        assert_eq!(ball.speed(), 4.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_hits_raise_speed_within_bounds(
            offsets in proptest::collection::vec(-50.0f32..50.0, 1..40),
        ) {
            let (left, right) = paddles();
            let mut ball = Ball::new(&GameConfig::default());
            ball.launch_with(-4.0, 0.0);
            let mut sounds = Vec::new();
            for offset in offsets {
                let before = ball.speed();
                ball.place(55.0, 300.0 + offset);
                prop_assert_eq!(
                    ball.check_paddle_collision(&left, &right, &mut sounds),
                    Some(Side::Left)
                );
                let after = ball.speed();
                prop_assert!(after >= before);
                prop_assert!(after <= 10.0);
                prop_assert!(after == 10.0 || (after - before - 0.5).abs() < 1e-6);
                let (vx, vy) = ball.velocity();
                prop_assert!(vx > 0.0);
                prop_assert!(((vx * vx + vy * vy).sqrt() - after).abs() < 1e-4);
            }
        }
    }
}
