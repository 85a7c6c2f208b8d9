//! Court simulation: paddles, ball, scoring and the menu/play/pause/over
//! state machine. Nothing in here touches the terminal.

pub mod ball;
pub mod geometry;
pub mod keys;
pub mod paddle;
pub mod session;

pub use ball::Ball;
pub use geometry::Rect;
pub use keys::{Key, KeySnapshot};
pub use paddle::{Control, Paddle};
pub use session::{Command, Flow, Mode, Score, Screen, Session};

/// Which half of the court a paddle defends. Also names the player that won
/// a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Player number: 1 for the left paddle, 2 for the right.
    pub fn code(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}
