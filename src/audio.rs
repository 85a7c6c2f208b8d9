//! Sound triggers emitted by the simulation.
//!
//! The game never waits on or inspects a sink, so a missing or silent
//! backend cannot change what happens on the court.

use std::io::{self, Write};

use crate::config::SoundBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    WallBounce,
    PaddleHit,
    Score,
}

impl SoundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::WallBounce => "wall-bounce",
            SoundEvent::PaddleHit => "paddle-hit",
            SoundEvent::Score => "score",
        }
    }
}

pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Drops every event.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Writes each event to the log instead of a speaker.
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, event: SoundEvent) {
        log::debug!("sound: {}", event.name());
    }
}

/// Rings the terminal bell.
pub struct TerminalBell<W: Write> {
    out: W,
    failed: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play(&mut self, _event: SoundEvent) {
        if self.failed {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            // One warning, then stay quiet for the rest of the run
            log::warn!("terminal bell disabled: {}", e);
            self.failed = true;
        }
    }
}

impl<T: SoundSink + ?Sized> SoundSink for Box<T> {
    fn play(&mut self, event: SoundEvent) {
        (**self).play(event);
    }
}

/// Records events in order.
impl SoundSink for Vec<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        self.push(event);
    }
}

pub fn sink_for(backend: SoundBackend) -> Box<dyn SoundSink> {
    match backend {
        SoundBackend::Off => Box::new(Silent),
        SoundBackend::Log => Box::new(LogSink),
        SoundBackend::Bell => Box::new(TerminalBell::stdout()),
    }
}
