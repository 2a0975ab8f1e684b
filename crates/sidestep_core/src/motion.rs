//! # Character Motion Controller
//!
//! Converts per-tick intent (horizontal axis, jump press/hold) and an
//! externally supplied ground-contact flag into a velocity update.
//! Implements the responsive-feel trio:
//!
//! - **Coyote time**: a jump still fires for a short window after
//!   walking off a ledge.
//! - **Jump buffering**: a press shortly before landing is remembered
//!   and fires on contact.
//! - **Variable height**: releasing the button early truncates the
//!   arc; falling is heavier than rising.
//!
//! The controller is deterministic: one `tick` per fixed timestep,
//! same inputs produce the same state, no hidden clocks. Ground
//! detection and collision response stay with the host physics; the
//! controller only shapes velocity.

use serde::{Deserialize, Serialize};

use crate::config::MotionTuning;
use crate::error::TuningResult;
use crate::math::Vec2;

/// Axis inputs smaller than this are treated as released, switching
/// the horizontal blend from acceleration to deceleration.
const AXIS_EPSILON: f32 = 1e-4;

/// One tick's worth of intent, sampled by the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInput {
    /// Horizontal axis value in `[-1, 1]`. Values outside are clamped.
    pub axis: f32,
    /// True only on the tick the jump control went down (edge).
    pub jump_pressed: bool,
    /// True while the jump control is held (level).
    pub jump_held: bool,
    /// Ground contact this tick, from the host's physics query.
    pub grounded: bool,
}

/// Per-entity motion state. Owned by the entity, mutated exclusively
/// by [`MotionController::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Current velocity (units per second).
    pub velocity: Vec2,
    /// Ground contact reported on the previous tick.
    pub grounded_last_tick: bool,
    /// Remaining coyote grace (seconds). Never negative.
    pub coyote_timer: f32,
    /// Remaining buffered-press window (seconds). Never negative.
    pub jump_buffer_timer: f32,
    /// True from jump trigger until the arc is cut or the entity lands.
    pub is_jumping: bool,
}

/// What happened during a tick, for hosts that drive effects or audio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A jump triggered this tick.
    pub jumped: bool,
    /// Ground contact began this tick.
    pub landed: bool,
}

/// Stateless-per-entity motion driver.
///
/// One controller can tick any number of entities; all per-entity
/// state lives in [`MotionState`]. Derived quantities (jump velocity,
/// gravity) are computed once at construction from the parabolic jump
/// model: reaching `jump_height` in `jump_duration` seconds requires
/// `v0 = 2h/t` and `g = v0/t`.
#[derive(Clone, Debug)]
pub struct MotionController {
    /// Validated tuning values.
    tuning: MotionTuning,
    /// Initial vertical speed of a full jump (units per second).
    jump_velocity: f32,
    /// Base gravity (units per second squared).
    gravity: f32,
}

impl MotionController {
    /// Creates a controller from validated tuning.
    ///
    /// # Errors
    ///
    /// Returns the first tuning violation; see
    /// [`MotionTuning::validate`].
    pub fn new(tuning: MotionTuning) -> TuningResult<Self> {
        tuning.validate()?;
        let jump_velocity = 2.0 * tuning.jump_height / tuning.jump_duration;
        let gravity = jump_velocity / tuning.jump_duration;
        Ok(Self {
            tuning,
            jump_velocity,
            gravity,
        })
    }

    /// Initial vertical speed of a full jump.
    #[inline]
    #[must_use]
    pub const fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    /// Base gravity applied while airborne.
    #[inline]
    #[must_use]
    pub const fn gravity(&self) -> f32 {
        self.gravity
    }

    /// The tuning this controller was built from.
    #[must_use]
    pub const fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    /// Advances `state` by one fixed tick.
    ///
    /// `dt` must be finite and non-negative; `dt = 0` integrates
    /// nothing but timers still evaluate, so a buffered press can
    /// trigger on a zero-length tick.
    pub fn tick(&self, state: &mut MotionState, input: TickInput, dt: f32) -> TickOutcome {
        let landed = input.grounded && !state.grounded_last_tick;

        // Timers first: reset on their events, otherwise count down,
        // floored at zero.
        state.coyote_timer = if input.grounded {
            self.tuning.coyote_time
        } else {
            (state.coyote_timer - dt).max(0.0)
        };
        state.jump_buffer_timer = if input.jump_pressed {
            self.tuning.jump_buffer_time
        } else {
            (state.jump_buffer_timer - dt).max(0.0)
        };

        self.blend_horizontal(state, input.axis, dt);
        self.integrate_vertical(state, input, landed, dt);

        // Trigger last, checked against the freshly updated timers. On
        // a grounded press both windows were just reset, so pressing
        // while standing still fires immediately.
        let mut jumped = false;
        if state.coyote_timer > 0.0 && state.jump_buffer_timer > 0.0 {
            state.velocity.y = self.jump_velocity;
            // Consume both windows so one grounding event cannot fund
            // two jumps.
            state.coyote_timer = 0.0;
            state.jump_buffer_timer = 0.0;
            state.is_jumping = true;
            jumped = true;
        }

        state.grounded_last_tick = input.grounded;
        TickOutcome { jumped, landed }
    }

    /// Moves horizontal velocity toward `axis * move_speed` without
    /// overshooting, accelerating toward a live target and decelerating
    /// toward rest.
    fn blend_horizontal(&self, state: &mut MotionState, axis: f32, dt: f32) {
        let target = axis.clamp(-1.0, 1.0) * self.tuning.move_speed;
        let rate = if target.abs() > AXIS_EPSILON {
            self.tuning.acceleration
        } else {
            self.tuning.deceleration
        };
        let max_step = rate * dt;
        let delta = target - state.velocity.x;
        state.velocity.x += delta.clamp(-max_step, max_step);
    }

    /// Applies landing, gravity, fall tuning, and the terminal clamp.
    fn integrate_vertical(
        &self,
        state: &mut MotionState,
        input: TickInput,
        landed: bool,
        dt: f32,
    ) {
        if input.grounded && state.velocity.y <= 0.0 {
            // Resting or touching down: the host's collision already
            // stopped the descent.
            if landed || state.velocity.y < 0.0 {
                state.is_jumping = false;
            }
            state.velocity.y = 0.0;
            return;
        }

        let mut gravity_scale = 1.0;
        if state.velocity.y < 0.0 {
            // Heavier fall reads better than symmetric parabolas.
            gravity_scale += self.tuning.fall_multiplier - 1.0;
        } else if state.velocity.y > 0.0 && !input.jump_held {
            // Early release: cut the arc short.
            gravity_scale += self.tuning.low_jump_multiplier - 1.0;
            state.is_jumping = false;
        }

        state.velocity.y -= self.gravity * gravity_scale * dt;
        if state.velocity.y < -self.tuning.max_fall_speed {
            state.velocity.y = -self.tuning.max_fall_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> MotionController {
        MotionController::new(MotionTuning::default()).unwrap()
    }

    fn grounded_idle() -> TickInput {
        TickInput {
            grounded: true,
            ..TickInput::default()
        }
    }

    /// Runs `n` idle grounded ticks to settle the state.
    fn settle(ctl: &MotionController, state: &mut MotionState, n: usize) {
        for _ in 0..n {
            ctl.tick(state, grounded_idle(), DT);
        }
    }

    #[test]
    fn test_jump_velocity_from_parabolic_model() {
        // jump_height = 4, jump_duration = 0.4 => v0 = 2*4/0.4 = 20.
        let ctl = controller();
        assert!((ctl.jump_velocity() - 20.0).abs() < 1e-5);
        assert!((ctl.gravity() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = MotionTuning {
            jump_duration: -0.4,
            ..Default::default()
        };
        assert!(MotionController::new(tuning).is_err());
    }

    #[test]
    fn test_horizontal_approach_without_overshoot() {
        let ctl = MotionController::new(MotionTuning {
            move_speed: 7.0,
            acceleration: 50.0,
            deceleration: 50.0,
            ..Default::default()
        })
        .unwrap();
        let mut state = MotionState::default();
        let input = TickInput {
            axis: 1.0,
            grounded: true,
            ..TickInput::default()
        };

        let mut previous = 0.0;
        for _ in 0..20 {
            ctl.tick(&mut state, input, 0.1);
            assert!(state.velocity.x >= previous, "must ramp monotonically");
            assert!(state.velocity.x <= 7.0, "must never exceed move_speed");
            previous = state.velocity.x;
        }
        assert!((state.velocity.x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_decelerates_to_rest() {
        let ctl = controller();
        let mut state = MotionState::default();
        state.velocity.x = 7.0;

        for _ in 0..60 {
            ctl.tick(&mut state, grounded_idle(), DT);
        }
        assert!(state.velocity.x.abs() < 1e-5);
    }

    #[test]
    fn test_grounded_press_jumps_immediately() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 2);

        let outcome = ctl.tick(
            &mut state,
            TickInput {
                jump_pressed: true,
                jump_held: true,
                grounded: true,
                ..TickInput::default()
            },
            DT,
        );

        assert!(outcome.jumped);
        assert!(state.is_jumping);
        assert!((state.velocity.y - ctl.jump_velocity()).abs() < 1e-5);
    }

    #[test]
    fn test_coyote_grace_honors_late_press() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 2);

        // Walk off the ledge: airborne for less than coyote_time.
        for _ in 0..3 {
            ctl.tick(&mut state, TickInput::default(), DT);
        }
        assert!(3.0 * DT < ctl.tuning().coyote_time);

        let outcome = ctl.tick(
            &mut state,
            TickInput {
                jump_pressed: true,
                jump_held: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(outcome.jumped, "press inside the grace window must fire");
    }

    #[test]
    fn test_coyote_expiry_rejects_late_press() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 2);

        // Airborne well past coyote_time.
        for _ in 0..12 {
            ctl.tick(&mut state, TickInput::default(), DT);
        }
        assert!(12.0 * DT >= ctl.tuning().coyote_time);

        let outcome = ctl.tick(
            &mut state,
            TickInput {
                jump_pressed: true,
                jump_held: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(!outcome.jumped, "grace expired, press must not fire");
        assert_eq!(state.coyote_timer, 0.0);
    }

    #[test]
    fn test_jump_buffer_fires_on_landing() {
        let ctl = controller();
        let mut state = MotionState::default();
        // Falling, press slightly before contact.
        state.velocity.y = -5.0;
        ctl.tick(
            &mut state,
            TickInput {
                jump_pressed: true,
                jump_held: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(state.jump_buffer_timer > 0.0);

        // Contact next tick: buffered press fires without a new edge.
        let outcome = ctl.tick(
            &mut state,
            TickInput {
                jump_held: true,
                grounded: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(outcome.landed);
        assert!(outcome.jumped);
    }

    #[test]
    fn test_jump_single_fire() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 2);

        let outcome = ctl.tick(
            &mut state,
            TickInput {
                jump_pressed: true,
                jump_held: true,
                grounded: true,
                ..TickInput::default()
            },
            DT,
        );
        assert!(outcome.jumped);
        // Trigger consumed both windows.
        assert_eq!(state.coyote_timer, 0.0);
        assert_eq!(state.jump_buffer_timer, 0.0);

        // Same-tick style re-check: no new press, no new grounding.
        let again = ctl.tick(
            &mut state,
            TickInput {
                jump_held: true,
                ..TickInput::default()
            },
            0.0,
        );
        assert!(!again.jumped);
    }

    #[test]
    fn test_early_release_cuts_the_arc() {
        let ctl = controller();

        let mut held = MotionState::default();
        let mut tapped = MotionState::default();
        for state in [&mut held, &mut tapped] {
            settle(&ctl, state, 2);
            ctl.tick(
                state,
                TickInput {
                    jump_pressed: true,
                    jump_held: true,
                    grounded: true,
                    ..TickInput::default()
                },
                DT,
            );
        }

        // Rise for a few ticks, one holding, one released.
        for _ in 0..5 {
            ctl.tick(
                &mut held,
                TickInput {
                    jump_held: true,
                    ..TickInput::default()
                },
                DT,
            );
            ctl.tick(&mut tapped, TickInput::default(), DT);
        }

        assert!(
            tapped.velocity.y < held.velocity.y,
            "tap must lose vertical speed faster than hold"
        );
        assert!(held.is_jumping);
        assert!(!tapped.is_jumping, "cut arc clears is_jumping");
    }

    #[test]
    fn test_fall_is_heavier_than_rise() {
        let ctl = controller();

        let mut rising = MotionState::default();
        rising.velocity.y = 1.0;
        let before = rising.velocity.y;
        ctl.tick(
            &mut rising,
            TickInput {
                jump_held: true,
                ..TickInput::default()
            },
            DT,
        );
        let rise_loss = before - rising.velocity.y;

        let mut falling = MotionState::default();
        falling.velocity.y = -1.0;
        let before = falling.velocity.y;
        ctl.tick(&mut falling, TickInput::default(), DT);
        let fall_loss = before - falling.velocity.y;

        assert!(fall_loss > rise_loss);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let ctl = controller();
        let mut state = MotionState::default();

        for _ in 0..600 {
            ctl.tick(&mut state, TickInput::default(), DT);
        }
        assert!((state.velocity.y + ctl.tuning().max_fall_speed).abs() < 1e-4);
    }

    #[test]
    fn test_landing_zeroes_descent_and_reports() {
        let ctl = controller();
        let mut state = MotionState::default();
        state.velocity.y = -8.0;
        state.is_jumping = true;

        let outcome = ctl.tick(&mut state, grounded_idle(), DT);
        assert!(outcome.landed);
        assert_eq!(state.velocity.y, 0.0);
        assert!(!state.is_jumping);

        // Still grounded next tick: no second landing edge.
        let outcome = ctl.tick(&mut state, grounded_idle(), DT);
        assert!(!outcome.landed);
    }

    #[test]
    fn test_zero_dt_is_integration_noop() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 2);
        state.velocity.x = 3.0;
        let before = state;

        let outcome = ctl.tick(
            &mut state,
            TickInput {
                axis: 1.0,
                grounded: true,
                ..TickInput::default()
            },
            0.0,
        );

        assert!(!outcome.jumped);
        assert_eq!(state.velocity, before.velocity);
        // Timers still evaluated: grounded keeps coyote topped up.
        assert_eq!(state.coyote_timer, ctl.tuning().coyote_time);
    }

    #[test]
    fn test_timers_never_negative() {
        let ctl = controller();
        let mut state = MotionState::default();
        settle(&ctl, &mut state, 1);

        for _ in 0..100 {
            ctl.tick(&mut state, TickInput::default(), DT);
            assert!(state.coyote_timer >= 0.0);
            assert!(state.jump_buffer_timer >= 0.0);
        }
    }
}
