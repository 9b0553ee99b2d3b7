use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::{Coord, GridShape};
use crate::terrain_generation::TerrainSettings;

pub const GRID_WIDTH: usize = 64;
pub const GRID_HEIGHT: usize = 64;
/// Edge length of one cell in world units (pixels at zoom 1).
pub const CELL_SIZE: f32 = 8.0;
pub const TERRAIN_LEVELS: u32 = 8;
pub const CAVE_THRESHOLD: f32 = 0.3;

/// Micro-steps (single water units) placed per round.
pub const STEPS_PER_ROUND: u32 = 5;
/// Rounds between progress reports in the log.
pub const REPORT_INTERVAL: u64 = 50;
pub const DEPTH_FIRST_FACTOR: f64 = 5.0;
/// Round cadence of the step scheduler (one round per 25 ms).
pub const ROUNDS_PER_SECOND: f64 = 40.0;
pub const DEFAULT_SEED: u64 = 42;

/// Levels a source may rise above the highest terrain cell.
pub const SOURCE_HEADROOM: u32 = 2;

pub const WORLD_WIDTH: f32 = GRID_WIDTH as f32 * CELL_SIZE;
pub const WORLD_HEIGHT: f32 = GRID_HEIGHT as f32 * CELL_SIZE;

// =============================================================================
// Engine tunables
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Small values keep expansion close to strict lowest-level-first order;
    /// large values let the most recently advanced branch keep digging.
    pub depth_first_factor: f64,
    pub steps_per_round: u32,
    pub report_interval: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            depth_first_factor: DEPTH_FIRST_FACTOR,
            steps_per_round: STEPS_PER_ROUND,
            report_interval: REPORT_INTERVAL,
        }
    }
}

// =============================================================================
// FloodConfig resource
// =============================================================================

/// Everything needed to build a simulation run: grid size, terrain, engine
/// tunables, round cadence, RNG seed and the initial water sources.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub terrain: TerrainSettings,
    pub engine: EngineSettings,
    pub rounds_per_second: f64,
    /// Seed for the frontier tie-break jitter.
    pub seed: u64,
    pub sources: Vec<Coord>,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            terrain: TerrainSettings::default(),
            engine: EngineSettings::default(),
            rounds_per_second: ROUNDS_PER_SECOND,
            seed: DEFAULT_SEED,
            sources: vec![Coord::new(10, 20), Coord::new(30, 30)],
        }
    }
}

impl FloodConfig {
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.grid_width, self.grid_height)
    }

    pub fn round_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.rounds_per_second)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.engine.steps_per_round == 0 {
            return Err(ConfigError::Invalid(
                "steps_per_round must be at least 1".to_string(),
            ));
        }
        if !self.engine.depth_first_factor.is_finite() || self.engine.depth_first_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "depth_first_factor must be finite and >= 0, got {}",
                self.engine.depth_first_factor
            )));
        }
        if !self.rounds_per_second.is_finite() || self.rounds_per_second <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "rounds_per_second must be > 0, got {}",
                self.rounds_per_second
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FloodConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// =============================================================================
// ConfigError
// =============================================================================

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The file is not valid config JSON.
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
