use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Allowed values for the parameter panel. [`Config::sanitized`] clamps to
/// the same upper bounds but lets file-provided grids go down to one.
pub const ROWS_RANGE: RangeInclusive<usize> = 5..=15;
pub const COLUMNS_RANGE: RangeInclusive<usize> = 5..=20;
pub const ANT_RADIUS_RANGE: RangeInclusive<f32> = 3.0..=10.0;
pub const ANT_SPEED_RANGE: RangeInclusive<f32> = 0.5..=10.0;
pub const ANT_INTERVAL_RANGE: RangeInclusive<u32> = 5..=1000;
pub const EXPLORATION_RANGE: RangeInclusive<f32> = 0.0..=0.8;
pub const PATH_LOOP_CYCLE_RANGE: RangeInclusive<u32> = 1..=600;
pub const MARGIN_RANGE: RangeInclusive<f32> = 0.0..=200.0;

/// Every tunable of the demo.
///
/// The viewer owns the only mutable copy; the generator, the ants and the
/// frame driver receive a [`Config::sanitized`] snapshot once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub margin: f32,

    pub rows: usize,
    pub columns: usize,
    pub path_color: [u8; 3],
    /// Frames between two repaints of the path layer.
    pub path_loop_cycle: u32,

    pub ant_speed: f32,
    pub ant_color: [u8; 3],
    pub ant_exploring_color: [u8; 3],
    pub ant_radius: f32,
    /// Frames between two spawned ants.
    pub ant_interval: u32,

    pub exploration_probability: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            margin: 20.0,
            rows: 5,
            columns: 10,
            path_color: [0x5B, 0x3B, 0x82],
            path_loop_cycle: 120,
            ant_speed: 2.0,
            ant_color: [0xFF, 0xA6, 0xC4],
            ant_exploring_color: [0x37, 0x85, 0xDE],
            ant_radius: 5.0,
            ant_interval: 30,
            exploration_probability: 0.5,
        }
    }
}

fn clamp_f32(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

impl Config {
    /// Returns a copy with every field forced into a usable range.
    ///
    /// Zero-sized grids and zero intervals become one, probabilities stay in
    /// `[0, 0.8]`, and non-finite floats fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            margin: clamp_f32(self.margin, &MARGIN_RANGE, defaults.margin),
            rows: self.rows.clamp(1, *ROWS_RANGE.end()),
            columns: self.columns.clamp(1, *COLUMNS_RANGE.end()),
            path_color: self.path_color,
            path_loop_cycle: self
                .path_loop_cycle
                .clamp(*PATH_LOOP_CYCLE_RANGE.start(), *PATH_LOOP_CYCLE_RANGE.end()),
            ant_speed: clamp_f32(self.ant_speed, &ANT_SPEED_RANGE, defaults.ant_speed),
            ant_color: self.ant_color,
            ant_exploring_color: self.ant_exploring_color,
            ant_radius: clamp_f32(self.ant_radius, &ANT_RADIUS_RANGE, defaults.ant_radius),
            ant_interval: self.ant_interval.clamp(1, *ANT_INTERVAL_RANGE.end()),
            exploration_probability: clamp_f32(
                self.exploration_probability,
                &EXPLORATION_RANGE,
                defaults.exploration_probability,
            ),
        }
    }

    /// Grid shape as `(columns, rows)`.
    pub fn grid(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
