use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Everything a session needs to know before it starts. Nothing here changes
/// while a game is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible serves and AI error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub field: FieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub rules: RulesConfig,
    pub input: InputConfig,
    pub sound: SoundConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per frame
    pub speed: f32,
    /// Gap between each paddle and its back wall
    pub margin: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 100.0,
            speed: 5.0,
            margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub size: f32,
    pub initial_speed: f32,
    /// Added to the speed on every paddle hit
    pub speed_increment: f32,
    pub max_speed: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            initial_speed: 4.0,
            speed_increment: 0.5,
            max_speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub win_score: u32,
    /// 0.0 (sloppy, slow) to 1.0 (perfect tracking at full paddle speed)
    pub ai_difficulty: f32,
    pub launch_delay_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            win_score: 10,
            ai_difficulty: 0.8,
            launch_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How long a press counts as held on terminals that never report key
    /// releases
    pub hold_frames: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { hold_frames: 12 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoundBackend {
    Off,
    #[default]
    Log,
    Bell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SoundConfig {
    pub backend: SoundBackend,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            field: FieldConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            rules: RulesConfig::default(),
            input: InputConfig::default(),
            sound: SoundConfig::default(),
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        let p = &self.paddle;
        let b = &self.ball;
        let r = &self.rules;

        ensure!(f.width > 0.0 && f.height > 0.0, "field size must be positive");
        ensure!(f.fps > 0, "fps must be at least 1");
        ensure!(p.width > 0.0 && p.height > 0.0, "paddle size must be positive");
        ensure!(p.height <= f.height, "paddle is taller than the field");
        ensure!(p.speed >= 0.0, "paddle speed must not be negative");
        ensure!(
            p.margin >= 0.0 && 2.0 * (p.margin + p.width) < f.width,
            "paddles do not fit across the field"
        );
        ensure!(
            b.size > 0.0 && b.size < f.height && b.size < f.width,
            "ball size must be positive and smaller than the field"
        );
        ensure!(b.initial_speed > 0.0, "initial ball speed must be positive");
        ensure!(
            b.initial_speed <= b.max_speed,
            "initial ball speed {} exceeds max speed {}",
            b.initial_speed,
            b.max_speed
        );
        ensure!(b.speed_increment >= 0.0, "speed increment must not be negative");
        // A faster ball could pass through a paddle between two frames
        ensure!(
            b.max_speed < p.width + b.size,
            "max ball speed {} must stay below paddle width + ball size ({})",
            b.max_speed,
            p.width + b.size
        );
        ensure!(r.win_score > 0, "win score must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&r.ai_difficulty),
            "ai difficulty {} is outside 0.0..=1.0",
            r.ai_difficulty
        );
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.field.fps as f64)
    }

    /// The serve delay expressed in simulation frames.
    pub fn launch_delay_frames(&self) -> u32 {
        let frames = self.rules.launch_delay_ms as f64 * self.field.fps as f64 / 1000.0;
        frames.round() as u32
    }
}

pub fn difficulty_label(difficulty: f32) -> &'static str {
    if difficulty < 0.33 {
        "Easy"
    } else if difficulty < 0.66 {
        "Medium"
    } else {
        "Hard"
    }
}
