use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::SoundSink;
use crate::config::GameConfig;
use crate::game::ball::Ball;
use crate::game::keys::{Key, KeySnapshot};
use crate::game::paddle::{Control, Paddle};
use crate::game::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SinglePlayer,
    TwoPlayer,
}

impl Mode {
    fn right_control(self) -> Control {
        match self {
            Mode::SinglePlayer => Control::Ai,
            Mode::TwoPlayer => Control::Human {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
            },
        }
    }
}

/// Discrete inputs. Anything that makes no sense on the current screen is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartSinglePlayer,
    StartTwoPlayer,
    Pause,
    Resume,
    ReturnToMenu,
    Replay,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a point and return the new total for that side.
    pub fn award(&mut self, side: Side) -> u32 {
        let total = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *total += 1;
        *total
    }
}

pub struct Session<S: SoundSink> {
    config: GameConfig,
    screen: Screen,
    mode: Mode,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    score: Score,
    /// Frames until the pending serve, if one is scheduled
    launch_timer: Option<u32>,
    rng: StdRng,
    sounds: S,
}

impl<S: SoundSink> Session<S> {
    /// Seeds the RNG from `config.seed` when present.
    pub fn new(config: GameConfig, sounds: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, sounds, rng)
    }

    pub fn with_rng(config: GameConfig, sounds: S, rng: StdRng) -> Self {
        let mode = Mode::SinglePlayer;
        let left = Paddle::new(
            Side::Left,
            Control::Human {
                up: Key::W,
                down: Key::S,
            },
            &config,
        );
        let right = Paddle::new(Side::Right, mode.right_control(), &config);
        let ball = Ball::new(&config);
        Self {
            config,
            screen: Screen::MainMenu,
            mode,
            left,
            right,
            ball,
            score: Score::default(),
            launch_timer: None,
            rng,
            sounds,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn left(&self) -> &Paddle {
        &self.left
    }

    pub fn right(&self) -> &Paddle {
        &self.right
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn sounds(&self) -> &S {
        &self.sounds
    }

    /// Frames left before the next serve.
    pub fn launch_pending(&self) -> Option<u32> {
        self.launch_timer
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match (self.screen, command) {
            (Screen::MainMenu, Command::StartSinglePlayer) => self.start(Mode::SinglePlayer),
            (Screen::MainMenu, Command::StartTwoPlayer) => self.start(Mode::TwoPlayer),
            (Screen::MainMenu, Command::Quit) => {
                log::info!("quit from main menu");
                return Flow::Quit;
            }
            (Screen::Playing, Command::Pause) => {
                log::info!("paused at {}-{}", self.score.left, self.score.right);
                self.screen = Screen::Paused;
            }
            (Screen::Paused, Command::Resume) => {
                log::info!("resumed");
                self.screen = Screen::Playing;
            }
            (Screen::Paused, Command::ReturnToMenu) | (Screen::GameOver, Command::ReturnToMenu) => {
                log::info!("back to main menu");
                self.screen = Screen::MainMenu;
                self.launch_timer = None;
            }
            (Screen::GameOver, Command::Replay) => self.start(self.mode),
            (screen, command) => {
                log::trace!("ignored {:?} on {:?}", command, screen);
            }
        }
        Flow::Continue
    }

    fn start(&mut self, mode: Mode) {
        log::info!("starting {:?} game, first to {}", mode, self.config.rules.win_score);
        self.mode = mode;
        self.right.set_control(mode.right_control());
        self.score = Score::default();
        self.ball.reset();
        self.screen = Screen::Playing;
        self.schedule_launch();
    }

    fn schedule_launch(&mut self) {
        self.launch_timer = Some(self.config.launch_delay_frames());
    }

    /// Count down the pending serve. One-shot: the timer clears itself when it
    /// fires, whether or not the ball needed launching.
    fn advance_launch_timer(&mut self) {
        let Some(frames) = self.launch_timer else {
            return;
        };
        if frames <= 1 {
            self.launch_timer = None;
            if !self.ball.is_active() {
                self.ball.launch(&mut self.rng);
            }
        } else {
            self.launch_timer = Some(frames - 1);
        }
    }

    /// Advance one frame. Only the `Playing` screen moves anything.
    pub fn tick(&mut self, keys: KeySnapshot) {
        if self.screen != Screen::Playing {
            return;
        }

        self.advance_launch_timer();

        let difficulty = self.config.rules.ai_difficulty;
        drive(&mut self.left, &self.ball, keys, difficulty, &mut self.rng);
        drive(&mut self.right, &self.ball, keys, difficulty, &mut self.rng);

        self.ball.update(&mut self.sounds);
        self.ball
            .check_paddle_collision(&self.left, &self.right, &mut self.sounds);

        if let Some(scorer) = self.ball.check_score(&mut self.sounds) {
            self.point(scorer);
        }
    }

    fn point(&mut self, scorer: Side) {
        let total = self.score.award(scorer);
        log::info!(
            "player {} scores: {}-{}",
            scorer.code(),
            self.score.left,
            self.score.right
        );

        if total >= self.config.rules.win_score {
            log::info!("game over, player {} wins", scorer.code());
            self.screen = Screen::GameOver;
            self.launch_timer = None;
        } else {
            self.schedule_launch();
        }
    }

    pub fn winner(&self) -> Option<Side> {
        let target = self.config.rules.win_score;
        if self.score.left >= target {
            Some(Side::Left)
        } else if self.score.right >= target {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn winner_label(&self) -> Option<&'static str> {
        self.winner().map(|side| match (side, self.mode) {
            (Side::Left, _) => "Player 1 Wins!",
            (Side::Right, Mode::SinglePlayer) => "Computer Wins!",
            (Side::Right, Mode::TwoPlayer) => "Player 2 Wins!",
        })
    }
}

fn drive(paddle: &mut Paddle, ball: &Ball, keys: KeySnapshot, difficulty: f32, rng: &mut StdRng) {
    match paddle.control() {
        Control::Human { .. } => paddle.move_with(keys),
        Control::Ai => paddle.ai_move(ball, difficulty, rng),
    }
}
