//! # SIDESTEP
//!
//! Deterministic platformer simulation kernel. The host owns the
//! actual game loop; this crate supplies the pieces it drives once per
//! fixed tick:
//!
//! ```text
//! Frame N:
//! ┌───────────────────────────────────────────────────────────┐
//! │ 1. timestep.advance(frame_dt) -> k ticks                  │
//! │ 2. for each tick:                                         │
//! │    ├─ controller.tick(state, input, step)  (per entity)   │
//! │    ├─ index.clear(); re-insert movers; fan out queries    │
//! │    └─ pool.acquire()/release() for spawned/expired objects│
//! │ 3. render with timestep.alpha() interpolation (host-side) │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything engine-specific - rendering, collision narrow-phase,
//! input devices, lifecycle hooks - stays on the host side of that
//! boundary.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod timestep;

pub use sidestep_core::{
    Aabb, MotionController, MotionState, MotionTuning, ObjectPool, PoolHandle, SimTuning,
    SpatialIndex, TickInput, TickOutcome, TuningError, TuningResult, Vec2, WorldTuning,
};
pub use timestep::{FixedTimestep, TickStats, TickStatsAccumulator};
