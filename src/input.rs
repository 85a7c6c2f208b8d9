use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Command, Key, KeySnapshot, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    /// Ctrl+C: leave from any screen
    ForceQuit,
    None,
}

/// How long a key stays held once pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPolicy {
    /// The terminal reports releases, so a key is held until released.
    UntilRelease,
    /// No release events: a press or auto-repeat keeps the key held for this
    /// many frames.
    Frames(u32),
}

/// Turns key events into commands and keeps track of held paddle keys.
pub struct InputHandler {
    policy: HoldPolicy,
    // Frames of hold left per key, indexed like Key::ALL
    held: [Option<u32>; 4],
}

fn paddle_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        _ => None,
    }
}

fn slot(key: Key) -> usize {
    match key {
        Key::W => 0,
        Key::S => 1,
        Key::ArrowUp => 2,
        Key::ArrowDown => 3,
    }
}

/// Screen-specific bindings for discrete commands.
pub fn command_for(screen: Screen, code: KeyCode) -> Option<Command> {
    match (screen, code) {
        (Screen::MainMenu, KeyCode::Char('1')) => Some(Command::StartSinglePlayer),
        (Screen::MainMenu, KeyCode::Char('2')) => Some(Command::StartTwoPlayer),
        (Screen::MainMenu, KeyCode::Char('q') | KeyCode::Char('Q')) => Some(Command::Quit),

        (Screen::Playing, KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P')) => {
            Some(Command::Pause)
        }

        (Screen::Paused, KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P')) => {
            Some(Command::Resume)
        }
        (Screen::Paused, KeyCode::Esc) => Some(Command::ReturnToMenu),

        (Screen::GameOver, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) => {
            Some(Command::Replay)
        }
        (Screen::GameOver, KeyCode::Esc) => Some(Command::ReturnToMenu),

        _ => None,
    }
}

impl InputHandler {
    pub fn new(policy: HoldPolicy) -> Self {
        Self {
            policy,
            held: [None; 4],
        }
    }

    pub fn handle_key_event(&mut self, screen: Screen, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::ForceQuit;
        }

        if let Some(paddle) = paddle_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.press(paddle),
                KeyEventKind::Release => self.release(paddle),
            }
        }

        // Commands fire on the initial press only
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        match command_for(screen, key.code) {
            Some(command) => KeyAction::Command(command),
            None => KeyAction::None,
        }
    }

    fn press(&mut self, key: Key) {
        self.held[slot(key)] = Some(match self.policy {
            HoldPolicy::UntilRelease => 0,
            HoldPolicy::Frames(n) => n,
        });
    }

    fn release(&mut self, key: Key) {
        self.held[slot(key)] = None;
    }

    /// Keys to apply this frame.
    pub fn snapshot(&self) -> KeySnapshot {
        Key::ALL
            .into_iter()
            .filter(|k| self.held[slot(*k)].is_some())
            .collect()
    }

    /// Age timed holds by one frame. Call once after each simulation tick.
    pub fn end_frame(&mut self) {
        let HoldPolicy::Frames(_) = self.policy else {
            return;
        };
        for hold in self.held.iter_mut() {
            *hold = match *hold {
                Some(n) if n > 1 => Some(n - 1),
                _ => None,
            };
        }
    }

    pub fn clear(&mut self) {
        self.held = [None; 4];
    }
}
