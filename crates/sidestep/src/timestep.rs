//! # Fixed Timestep Support
//!
//! The kernel is tick-based; the host's clock is not. This module
//! converts irregular frame times into a whole number of fixed ticks
//! plus an interpolation remainder, and keeps per-tick timing honest.

use std::time::Duration;

use sidestep_core::{TuningError, TuningResult};

/// Frame deltas above this are clamped before accumulation, so a
/// debugger pause or window drag cannot trigger a tick avalanche.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.1;

/// Accumulates wall-clock time and pays it out in fixed ticks.
///
/// ```rust,ignore
/// let mut timestep = FixedTimestep::new(1.0 / 60.0)?;
/// // Each frame:
/// for _ in 0..timestep.advance(frame_dt) {
///     simulate_one_tick(timestep.step());
/// }
/// let alpha = timestep.alpha(); // render interpolation factor
/// ```
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    /// Length of one simulation tick (seconds).
    step: f32,
    /// Unspent frame time (seconds). Always in `[0, step)` after
    /// `advance` returns.
    accumulator: f32,
    /// Clamp applied to each incoming frame delta.
    max_frame_delta: f32,
}

impl FixedTimestep {
    /// Creates a timestep with the given tick length and the default
    /// frame-delta clamp.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite or non-positive `step`.
    pub fn new(step: f32) -> TuningResult<Self> {
        if !step.is_finite() {
            return Err(TuningError::NotFinite { name: "step" });
        }
        if step <= 0.0 {
            return Err(TuningError::NonPositiveValue {
                name: "step",
                value: step,
            });
        }
        Ok(Self {
            step,
            accumulator: 0.0,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA.max(step),
        })
    }

    /// Overrides the frame-delta clamp. Clamped below at one step so
    /// at least one tick can always be funded.
    #[must_use]
    pub fn with_max_frame_delta(mut self, max_frame_delta: f32) -> Self {
        self.max_frame_delta = max_frame_delta.max(self.step);
        self
    }

    /// The fixed tick length in seconds.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Banks a frame's delta and returns how many fixed ticks to run.
    ///
    /// Negative or NaN deltas contribute nothing. Oversized deltas,
    /// `+inf` included, are just extreme hitches: they are clamped to
    /// the frame-delta cap like any other runaway frame.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        if frame_delta > 0.0 {
            self.accumulator += frame_delta.min(self.max_frame_delta);
        }

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left unspent, in `[0, 1)`. Hosts use this to
    /// interpolate rendering between the last two simulated states.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

/// Timing record for one simulated tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Tick number.
    pub tick: u64,
    /// How long the tick took to simulate.
    pub duration: Duration,
}

/// Rolling statistics over recorded ticks.
#[derive(Clone, Debug)]
pub struct TickStatsAccumulator {
    /// Budget per tick; slower ticks are counted and logged.
    budget: Duration,
    /// Total ticks recorded.
    ticks_recorded: u64,
    /// Sum of tick durations.
    total: Duration,
    /// Slowest tick seen.
    max: Duration,
    /// Ticks that exceeded the budget.
    over_budget: u64,
}

impl TickStatsAccumulator {
    /// Creates an accumulator with the given per-tick budget.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            ticks_recorded: 0,
            total: Duration::ZERO,
            max: Duration::ZERO,
            over_budget: 0,
        }
    }

    /// Records one tick, warning when it blew the budget.
    pub fn record(&mut self, stats: TickStats) {
        self.ticks_recorded += 1;
        self.total += stats.duration;
        self.max = self.max.max(stats.duration);

        if stats.duration > self.budget {
            self.over_budget += 1;
            tracing::warn!(
                tick = stats.tick,
                duration_us = stats.duration.as_micros() as u64,
                budget_us = self.budget.as_micros() as u64,
                "tick exceeded budget"
            );
        }
    }

    /// Total ticks recorded.
    #[must_use]
    pub const fn ticks_recorded(&self) -> u64 {
        self.ticks_recorded
    }

    /// Ticks that exceeded the budget.
    #[must_use]
    pub const fn over_budget(&self) -> u64 {
        self.over_budget
    }

    /// Slowest recorded tick.
    #[must_use]
    pub const fn max_tick(&self) -> Duration {
        self.max
    }

    /// Average tick duration in milliseconds.
    #[must_use]
    pub fn avg_tick_ms(&self) -> f64 {
        if self.ticks_recorded == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() * 1000.0 / self.ticks_recorded as f64
    }

    /// Emits a one-line summary at info level.
    pub fn log_summary(&self) {
        tracing::info!(
            ticks = self.ticks_recorded,
            avg_ms = self.avg_tick_ms(),
            max_us = self.max.as_micros() as u64,
            over_budget = self.over_budget,
            "tick statistics"
        );
    }
}
