use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
}

/// Reads the terminal on a background thread so the frame loop never blocks
/// on input.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(poll_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let poll_rate = Duration::from_millis(poll_ms);

        thread::spawn(move || loop {
            match event::poll(poll_rate) {
                Ok(true) => {
                    let forwarded = match event::read() {
                        Ok(crossterm::event::Event::Key(key)) => Some(Event::Key(key)),
                        Ok(_) => None,
                        Err(e) => {
                            log::error!("terminal read failed: {}", e);
                            return;
                        }
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    log::error!("terminal poll failed: {}", e);
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Everything that arrived since the last call, without waiting.
    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.rx.try_iter()
    }
}

/// Paces the loop to a fixed frame rate.
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Sleep until the next frame boundary. A frame that overran its slot
    /// re-anchors the schedule instead of trying to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            log::trace!("frame overran by {:?}", now - self.next);
            self.next = now + self.period;
        }
    }
}
