//! # SIDESTEP Core
//!
//! Deterministic simulation kernel for platformer-style games:
//!
//! - [`ObjectPool`] - reusable-instance allocator for high-churn
//!   entities, growing instead of failing on exhaustion
//! - [`SpatialIndex`] - uniform-grid broad-phase for proximity and
//!   overlap queries
//! - [`MotionController`] - per-tick character motion with coyote
//!   time, jump buffering, and variable jump height
//!
//! ## Architecture Rules
//!
//! 1. **Construction validates, ticking never fails** - bad tuning is
//!    a typed error up front, never a mid-game surprise
//! 2. **Single-writer per structure** - no internal locks; the host
//!    owns the clear/re-insert/query cycle
//! 3. **Determinism** - same inputs, same outputs, every run
//!
//! ## Example
//!
//! ```rust,ignore
//! use sidestep_core::{MotionController, MotionState, MotionTuning, TickInput};
//!
//! let controller = MotionController::new(MotionTuning::default())?;
//! let mut state = MotionState::default();
//! // Once per fixed tick:
//! let outcome = controller.tick(&mut state, TickInput::default(), 1.0 / 60.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod math;
pub mod motion;
pub mod pool;
pub mod spatial;

pub use config::{MotionTuning, SimTuning, WorldTuning};
pub use error::{TuningError, TuningResult};
pub use math::{Aabb, Vec2};
pub use motion::{MotionController, MotionState, TickInput, TickOutcome};
pub use pool::{ObjectPool, PoolHandle};
pub use spatial::SpatialIndex;
