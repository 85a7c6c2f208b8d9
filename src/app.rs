use crossterm::event::KeyEvent;

use crate::audio::SoundSink;
use crate::config::GameConfig;
use crate::game::{Flow, Session};
use crate::input::{HoldPolicy, InputHandler, KeyAction};

pub struct App {
    pub should_quit: bool,
    pub session: Session<Box<dyn SoundSink>>,
    input: InputHandler,
}

impl App {
    pub fn new(config: GameConfig, sounds: Box<dyn SoundSink>, hold: HoldPolicy) -> Self {
        log::info!("input hold policy: {:?}", hold);
        Self {
            should_quit: false,
            session: Session::new(config, sounds),
            input: InputHandler::new(hold),
        }
    }

    pub fn on_tick(&mut self) {
        self.session.tick(self.input.snapshot());
        self.input.end_frame();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let screen = self.session.screen();
        match self.input.handle_key_event(screen, key) {
            KeyAction::ForceQuit => {
                log::info!("ctrl+c, quitting");
                self.should_quit = true;
            }
            KeyAction::Command(command) => {
                if self.session.handle(command) == Flow::Quit {
                    self.should_quit = true;
                }
                // Held keys do not carry over between screens
                if self.session.screen() != screen {
                    self.input.clear();
                }
            }
            KeyAction::None => {}
        }
    }
}
