//! Drill movement policy.
//!
//! Above ground a drill is a plain projectile. Underground it steers with
//! speed-dependent authority, drives itself forward through a mix of force
//! and intrinsic propulsion, and hands that propulsion back to the physics
//! as extrinsic momentum when it breaks the surface.

use glam::Vec2;
use log::debug;

use crate::config::DrillTuning;
use crate::constants::{
    INPUT_DEADZONE, PROPULSION_RAMP_SECS, UNDERGROUND_DRIVE_FACTOR, UNDERGROUND_PROPULSION_FACTOR,
};
use crate::events::{EffectCue, EventOutbox};
use crate::physics::{MovementPolicy, PhysicsBody, Surface};

/// Steering torque for a turn input at squared speed `speed_sqr`.
///
/// Authority is full below `lower_sqr` and shrinks linearly in squared speed
/// down to `lower_sqr / upper_sqr` at `upper_sqr`.
///
/// # Examples
/// ```
/// use drill_arena::combatant::steering_torque;
/// let torque = steering_torque(1.0, 20.0, 25.0, 1.0, 49.0);
/// assert!((torque - 20.0 * 25.0 / 49.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn steering_torque(turn: f32, turn_speed: f32, speed_sqr: f32, lower_sqr: f32, upper_sqr: f32) -> f32 {
    let clamped = speed_sqr.clamp(lower_sqr, upper_sqr);
    turn * turn_speed * (upper_sqr - clamped + lower_sqr) / upper_sqr
}

/// A drill is high-speed while moving fast with its net motion pointing
/// away from its facing, i.e. along the drill tip.
///
/// Motion exactly perpendicular to the facing counts as along the tip.
#[must_use]
pub fn is_high_speed(velocity: Vec2, forward: Vec2, threshold_sqr: f32) -> bool {
    velocity.length_squared() > threshold_sqr && velocity.dot(-forward) >= 0.0
}

/// Per-drill movement state carried between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDrive {
    tuning: DrillTuning,
    turn_input: f32,
    accel_input: f32,
    high_speed: bool,
    underground_time: f32,
    sparks_playing: bool,
}

impl DrillDrive {
    /// Idle drive for the given tuning.
    #[must_use]
    pub const fn new(tuning: DrillTuning) -> Self {
        Self {
            tuning,
            turn_input: 0.0,
            accel_input: 0.0,
            high_speed: false,
            underground_time: 0.0,
            sparks_playing: false,
        }
    }

    /// Clears inputs and derived state.
    pub const fn reset(&mut self) {
        self.turn_input = 0.0;
        self.accel_input = 0.0;
        self.high_speed = false;
        self.underground_time = 0.0;
        self.sparks_playing = false;
    }

    /// Stores the turn input, clamped to `[-1, 1]`.
    pub fn set_turn(&mut self, value: f32) {
        self.turn_input = clamp_input(value);
    }

    /// Stores the accelerate (positive) or brake (negative) input.
    pub fn set_accel(&mut self, value: f32) {
        self.accel_input = clamp_input(value);
    }

    /// Current turn input.
    #[must_use]
    pub const fn turn_input(&self) -> f32 {
        self.turn_input
    }

    /// Current accelerate input.
    #[must_use]
    pub const fn accel_input(&self) -> f32 {
        self.accel_input
    }

    /// High-speed flag computed on the last tick.
    #[must_use]
    pub const fn high_speed(&self) -> bool {
        self.high_speed
    }

    /// Seconds spent underground since the last surface break.
    #[must_use]
    pub const fn underground_time(&self) -> f32 {
        self.underground_time
    }

    /// Handling values the drive was built with.
    #[must_use]
    pub const fn tuning(&self) -> &DrillTuning {
        &self.tuning
    }
}

/// Input clamp: NaN reads as no input.
fn clamp_input(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Binds a drive to the outbox its effect cues go to for one tick.
pub struct DriveStep<'a> {
    /// Drive whose inputs steer the body.
    pub drive: &'a mut DrillDrive,
    /// Destination for spark and surface cues.
    pub events: &'a mut EventOutbox,
}

impl DriveStep<'_> {
    fn break_surface(&mut self, body: &mut PhysicsBody) {
        debug!("drill broke the surface at {:?}", body.position());
        self.events.cue(EffectCue::StopUndergroundEffect);
        self.events.cue(EffectCue::ClearDrillSparks);
        self.events.cue(EffectCue::StopDrillSparks);
        self.drive.sparks_playing = false;
        let carried = body.intrinsic_velocity();
        body.add_force_relative_to_velocity(carried);
        body.set_intrinsic_velocity(Vec2::ZERO);
        self.drive.underground_time = 0.0;
    }

    fn update_sparks(&mut self) {
        if self.drive.high_speed && !self.drive.sparks_playing {
            self.events.cue(EffectCue::PlayDrillSparks);
            self.drive.sparks_playing = true;
        } else if !self.drive.high_speed && self.drive.sparks_playing {
            self.events.cue(EffectCue::StopDrillSparks);
            self.drive.sparks_playing = false;
        }
    }

    fn drill(&mut self, body: &mut PhysicsBody) {
        self.update_sparks();

        let tuning = self.drive.tuning;
        self.drive.underground_time += body.fixed_delta();

        let tip = -body.forward();
        body.add_force_relative_to_velocity(tip * tuning.speed * UNDERGROUND_DRIVE_FACTOR);
        let ramp = self.drive.underground_time.min(PROPULSION_RAMP_SECS);
        body.set_intrinsic_velocity(tip * tuning.speed * UNDERGROUND_PROPULSION_FACTOR * ramp);

        let accel = self.drive.accel_input;
        if accel.abs() >= INPUT_DEADZONE {
            if accel > 0.0 {
                body.add_force_relative_to_velocity(tip * tuning.acc);
            } else {
                body.add_force_relative_to_velocity(-tip * tuning.brake);
            }
        }
    }
}

impl MovementPolicy for DriveStep<'_> {
    fn steer(&mut self, body: &mut PhysicsBody) {
        let tuning = self.drive.tuning;
        let velocity = body.velocity();
        let speed_sqr = velocity.length_squared();

        body.add_torque(steering_torque(
            self.drive.turn_input,
            tuning.turn_speed,
            speed_sqr,
            tuning.turn_lower_bound_sqr,
            tuning.turn_upper_bound_sqr,
        ));

        self.drive.high_speed =
            is_high_speed(velocity, body.forward(), tuning.high_speed_threshold_sqr);

        match (body.surface(), body.surface_now()) {
            (Surface::Underground, Surface::Airborne) => {
                self.break_surface(body);
                return;
            }
            (Surface::Airborne, Surface::Underground) => {
                debug!("drill entered the ground at {:?}", body.position());
                self.events.cue(EffectCue::PlayUndergroundEffect);
            }
            _ => {}
        }

        if body.surface() == Surface::Underground {
            self.drill(body);
        }
    }
}
