//! Terminal two-paddle arcade ball game.
//!
//! `game` holds the simulation and screen state machine, `input` and `event`
//! turn terminal events into commands and held keys, `ui` draws a session
//! with ratatui.

pub mod app;
pub mod audio;
pub mod config;
pub mod event;
pub mod game;
pub mod input;
pub mod ui;
