//! Stage configuration loaded from an INI file.
//!
//! Provides safe defaults so a bare `StageConfig::new()` always works, and
//! merges any values found in the file over them. Missing keys keep their
//! defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [stage]
//! width = 800
//! height = 600
//! background = 255,255,255
//!
//! [clock]
//! fps = 30
//!
//! [rng]
//! seed = 1
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::shape::Color;
use crate::error::{Error, Result};

const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;
const DEFAULT_FPS: u32 = 30;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_CONFIG_PATH: &str = "./easel.ini";

#[derive(Resource, Debug, Clone)]
pub struct StageConfig {
    /// Stage width in pixels.
    pub width: f32,
    /// Stage height in pixels.
    pub height: f32,
    /// Ticks per second of the fixed-cadence loop.
    pub fps: u32,
    /// Initial background color.
    pub background: Color,
    /// Seed for the jitter animation's random source, so replays match.
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StageConfig {
    /// Configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            background: Color::WHITE,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file, merging over current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| Error::Config(format!("failed to load config file: {e}")))?;

        // [stage] section
        if let Some(width) = config.getfloat("stage", "width").ok().flatten() {
            self.width = width as f32;
        }
        if let Some(height) = config.getfloat("stage", "height").ok().flatten() {
            self.height = height as f32;
        }
        if let Some(raw) = config.get("stage", "background") {
            self.background = parse_color(&raw)?;
        }

        // [clock] section
        if let Some(fps) = config.getuint("clock", "fps").ok().flatten() {
            self.fps = fps as u32;
        }

        // [rng] section
        if let Some(seed) = config.getuint("rng", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "config loaded from {}: {}x{} at {} fps",
            self.config_path.display(),
            self.width,
            self.height,
            self.fps
        );
        Ok(())
    }
}

/// Parse `r,g,b` or `r,g,b,a` with 0-255 components.
fn parse_color(raw: &str) -> Result<Color> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let channel = |i: usize| -> Result<u8> {
        parts[i]
            .parse::<u8>()
            .map_err(|_| Error::Config(format!("bad color component {:?} in {raw:?}", parts[i])))
    };
    match parts.len() {
        3 => Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?)),
        4 => Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
        _ => Err(Error::Config(format!(
            "background must be r,g,b or r,g,b,a, got {raw:?}"
        ))),
    }
}
