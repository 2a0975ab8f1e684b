//! # Simulation Tuning
//!
//! All feel-defining numbers live here. Hosts either build the structs
//! literally or load them from a TOML string once at startup; either
//! way the values are validated before any component accepts them.

use serde::{Deserialize, Serialize};

use crate::error::{TuningError, TuningResult};

/// Tuning for the character motion controller.
///
/// Defaults are the reference platformer feel: a 4-unit jump that
/// takes 0.4 s to reach its apex, with 100 ms of coyote time and
/// jump buffering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Maximum horizontal speed (units per second).
    pub move_speed: f32,
    /// Horizontal acceleration toward a non-zero target (units/s^2).
    pub acceleration: f32,
    /// Horizontal deceleration toward rest (units/s^2).
    pub deceleration: f32,
    /// Apex height of a full jump (units).
    pub jump_height: f32,
    /// Time to reach the apex of a full jump (seconds).
    pub jump_duration: f32,
    /// Grace window after leaving ground during which a jump still
    /// fires (seconds).
    pub coyote_time: f32,
    /// Grace window during which a jump press is remembered before
    /// landing (seconds).
    pub jump_buffer_time: f32,
    /// Gravity multiplier while falling. 1.0 disables the effect.
    pub fall_multiplier: f32,
    /// Gravity multiplier while rising with the jump button released.
    /// 1.0 disables the effect.
    pub low_jump_multiplier: f32,
    /// Downward speed is clamped to this magnitude (units per second).
    pub max_fall_speed: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            acceleration: 50.0,
            deceleration: 50.0,
            jump_height: 4.0,
            jump_duration: 0.4,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            max_fall_speed: 50.0,
        }
    }
}

impl MotionTuning {
    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`TuningError`] naming the first offending parameter.
    pub fn validate(&self) -> TuningResult<()> {
        check_non_negative("move_speed", self.move_speed)?;
        check_non_negative("acceleration", self.acceleration)?;
        check_non_negative("deceleration", self.deceleration)?;
        check_non_negative("jump_height", self.jump_height)?;
        check_positive("jump_duration", self.jump_duration)?;
        check_non_negative("coyote_time", self.coyote_time)?;
        check_non_negative("jump_buffer_time", self.jump_buffer_time)?;
        check_multiplier("fall_multiplier", self.fall_multiplier)?;
        check_multiplier("low_jump_multiplier", self.low_jump_multiplier)?;
        check_non_negative("max_fall_speed", self.max_fall_speed)?;
        Ok(())
    }
}

/// Tuning for the shared world structures.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Edge length of one spatial index cell (world units).
    pub cell_size: f32,
    /// Slots pre-allocated per object pool.
    pub initial_pool_size: usize,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            initial_pool_size: 64,
        }
    }
}

impl WorldTuning {
    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`TuningError`] if `cell_size` is not finite and
    /// strictly positive.
    pub fn validate(&self) -> TuningResult<()> {
        if !self.cell_size.is_finite() {
            return Err(TuningError::NotFinite { name: "cell_size" });
        }
        if self.cell_size <= 0.0 {
            return Err(TuningError::NonPositiveCellSize(self.cell_size));
        }
        Ok(())
    }
}

/// Complete tuning set for one simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    /// Character motion tuning.
    pub motion: MotionTuning,
    /// World structure tuning.
    pub world: WorldTuning,
}

impl SimTuning {
    /// Parses and validates tuning from a TOML string.
    ///
    /// Missing keys fall back to defaults, so a partial file is fine.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError::Parse`] for malformed TOML, or the
    /// validation error for out-of-range values.
    pub fn from_toml_str(text: &str) -> TuningResult<Self> {
        let tuning: Self =
            toml::from_str(text).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure from either section.
    pub fn validate(&self) -> TuningResult<()> {
        self.motion.validate()?;
        self.world.validate()?;
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f32) -> TuningResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotFinite { name })
    }
}

fn check_non_negative(name: &'static str, value: f32) -> TuningResult<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(TuningError::NegativeValue { name, value });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> TuningResult<()> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(TuningError::NonPositiveValue { name, value });
    }
    Ok(())
}

fn check_multiplier(name: &'static str, value: f32) -> TuningResult<()> {
    check_finite(name, value)?;
    if value < 1.0 {
        return Err(TuningError::MultiplierBelowOne { name, value });
    }
    Ok(())
}
