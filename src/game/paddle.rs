use rand::Rng;

use crate::config::GameConfig;
use crate::game::ball::Ball;
use crate::game::geometry::Rect;
use crate::game::keys::{Key, KeySnapshot};
use crate::game::Side;

/// Largest AI aim error in pixels, reached at difficulty 0.0.
const AI_MAX_ERROR: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Human { up: Key, down: Key },
    Ai,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    rect: Rect,
    speed: f32,
    side: Side,
    control: Control,
    field_height: f32,
}

impl Paddle {
    /// A paddle parked `margin` pixels from its own wall, vertically centred.
    pub fn new(side: Side, control: Control, config: &GameConfig) -> Self {
        let p = &config.paddle;
        let field = &config.field;
        let x = match side {
            Side::Left => p.margin,
            Side::Right => field.width - p.margin - p.width,
        };
        let y = field.height / 2.0 - p.height / 2.0;
        Self {
            rect: Rect::new(x, y, p.width, p.height),
            speed: p.speed,
            side,
            control,
            field_height: field.height,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn set_control(&mut self, control: Control) {
        self.control = control;
    }

    /// Place the top edge, clamped to the field.
    pub fn set_y(&mut self, y: f32) {
        self.rect.y = y.clamp(0.0, self.max_y());
    }

    fn max_y(&self) -> f32 {
        (self.field_height - self.rect.height).max(0.0)
    }

    fn shift(&mut self, dy: f32) {
        self.set_y(self.rect.y + dy);
    }

    /// Human movement: every held direction key contributes one speed step.
    /// The steps are summed before clamping, so both keys together never move.
    pub fn move_with(&mut self, keys: KeySnapshot) {
        let Control::Human { up, down } = self.control else {
            return;
        };
        let mut dy = 0.0;
        if keys.is_held(up) {
            dy -= self.speed;
        }
        if keys.is_held(down) {
            dy += self.speed;
        }
        if dy != 0.0 {
            self.shift(dy);
        }
    }

    fn ball_approaching(&self, ball: &Ball) -> bool {
        let (vx, _) = ball.velocity();
        match self.side {
            Side::Left => vx < 0.0,
            Side::Right => vx > 0.0,
        }
    }

    /// One frame of computer play. Tracks the ball with an aim error that
    /// shrinks as `difficulty` approaches 1.0, and drifts home to the middle
    /// while the ball is heading the other way.
    pub fn ai_move<R: Rng>(&mut self, ball: &Ball, difficulty: f32, rng: &mut R) {
        let difficulty = difficulty.clamp(0.0, 1.0);
        let center = self.rect.center_y();

        if self.ball_approaching(ball) {
            let spread = AI_MAX_ERROR * (1.0 - difficulty);
            let error = if spread > 0.0 {
                rng.gen_range(-spread..=spread)
            } else {
                0.0
            };
            let target = ball.rect().center_y() + error;
            let step = self.speed * difficulty;

            if center < target {
                self.shift(step);
            } else if center > target {
                self.shift(-step);
            }
        } else {
            let mid = self.field_height / 2.0;
            // No drift within one speed step of the centre
            if (center - mid).abs() > self.speed {
                if center > mid {
                    self.shift(-self.speed * 0.5);
                } else {
                    self.shift(self.speed * 0.5);
                }
            }
        }
    }
}
