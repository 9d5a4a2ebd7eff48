/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the flocking rule. Defaults reproduce the classic
 * 800x600 demo. Every field can be overridden from a JSON file (missing
 * fields keep their default) or live from the UI sliders.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

// Bounds on the demo's physics rate
pub const MIN_TICKS_PER_SECOND: f32 = 1.0;
pub const MAX_TICKS_PER_SECOND: f32 = 1000.0;

// Order in which agents are updated within one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    // In place, in registry order: later agents see earlier agents' new state
    #[default]
    Sequential,
    // Every force is computed against the pre-tick state, then applied
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // World bounds
    pub width: f32,
    pub height: f32,
    // Steering
    pub rad_step: f32,
    pub dist_threshold: f32,
    pub max_speed: f32,
    pub centering_factor: f32,
    pub avoid_factor: f32,
    pub alignment_factor: f32,
    pub turn_factor: f32,
    pub boundary_margin: f32,
    // Entities
    pub agent_size: f32,
    pub obstacle_size: f32,
    pub select_distance: f32,
    pub initial_velocity: [f32; 2],
    pub initial_agents: usize,
    pub update_mode: UpdateMode,
    // Fixed physics rate of the interactive demo
    pub ticks_per_second: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            rad_step: 0.01,
            dist_threshold: 50.0,
            max_speed: 3.0,
            centering_factor: 0.005,
            avoid_factor: 0.001,
            alignment_factor: 0.01,
            turn_factor: 0.05,
            boundary_margin: 100.0,
            agent_size: 5.0,
            obstacle_size: 10.0,
            select_distance: 10.0,
            initial_velocity: [1.0, 0.0],
            initial_agents: 0,
            update_mode: UpdateMode::Sequential,
            ticks_per_second: 100.0,
        }
    }
}

impl SimulationParams {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn initial_velocity(&self) -> Vec2 {
        vec2(self.initial_velocity[0], self.initial_velocity[1])
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("rad_step", self.rad_step),
            ("max_speed", self.max_speed),
            ("agent_size", self.agent_size),
            ("obstacle_size", self.obstacle_size),
            ("ticks_per_second", self.ticks_per_second),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be a positive number, got {}", value)));
            }
        }

        let non_negative = [
            ("dist_threshold", self.dist_threshold),
            ("centering_factor", self.centering_factor),
            ("avoid_factor", self.avoid_factor),
            ("alignment_factor", self.alignment_factor),
            ("turn_factor", self.turn_factor),
            ("boundary_margin", self.boundary_margin),
            ("select_distance", self.select_distance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be a non-negative number, got {}", value)));
            }
        }

        if !(MIN_TICKS_PER_SECOND..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second) {
            return Err(invalid(
                "ticks_per_second",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND, self.ticks_per_second
                ),
            ));
        }
        if self.initial_velocity.iter().any(|v| !v.is_finite()) {
            return Err(invalid("initial_velocity", "components must be finite".to_string()));
        }
        if 2.0 * self.boundary_margin > self.width.min(self.height) {
            return Err(invalid(
                "boundary_margin",
                format!("{} leaves no room inside a {}x{} world", self.boundary_margin, self.width, self.height),
            ));
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }

    pub fn get_distance_range() -> std::ops::RangeInclusive<f32> {
        0.0..=200.0
    }

    pub fn get_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.1
    }

    pub fn get_turn_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_rad_step_range() -> std::ops::RangeInclusive<f32> {
        0.001..=0.2
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
