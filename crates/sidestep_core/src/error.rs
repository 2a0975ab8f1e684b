//! # Tuning Error Types
//!
//! Everything that can go wrong while constructing the kernel. Ticking
//! itself never fails; bad numbers are rejected up front.

use thiserror::Error;

/// Errors raised while validating or loading tuning values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Cell size must be strictly positive or every bucket computation
    /// degenerates.
    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(f32),

    /// A parameter that must be strictly positive was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositiveValue {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A parameter that must be non-negative was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeValue {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Gravity multipliers below 1.0 would push the character upward.
    #[error("{name} must be at least 1.0, got {value}")]
    MultiplierBelowOne {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A parameter was NaN or infinite.
    #[error("{name} must be finite")]
    NotFinite {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// Tuning file could not be parsed.
    #[error("invalid tuning file: {0}")]
    Parse(String),
}

/// Result type for tuning operations.
pub type TuningResult<T> = Result<T, TuningError>;
