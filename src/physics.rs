//! Force-accumulating rigid body integrator.
//!
//! A [`PhysicsBody`] splits its motion into two parts. Intrinsic velocity is
//! set directly by the owning controller and ignores gravity and drag.
//! Extrinsic velocity integrates accumulated forces and is subject to both.
//! The controller shapes motion through a [`MovementPolicy`] that the body
//! invokes once per fixed tick before integrating.

use glam::Vec2;

use crate::config::WorldSettings;
use crate::constants::{
    DEFAULT_MASS, DRAG_SNAP_SPEED_SQR, MIN_DISPLACEMENT_SQR, SURFACE_HEIGHT_FACTOR, TORQUE_GAIN,
};

/// Which motion regime a body is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Above the surface: gravity applies, no drag.
    Airborne,
    /// At or below the surface: drag applies, no gravity.
    Underground,
}

/// Returns the surface state for a body at height `y` with vertical scale
/// `scale_y`.
///
/// # Examples
/// ```
/// use drill_arena::physics::{surface_at, Surface};
/// assert_eq!(surface_at(0.5, 1.0), Surface::Underground);
/// assert_eq!(surface_at(0.51, 1.0), Surface::Airborne);
/// ```
#[must_use]
pub const fn surface_at(y: f32, scale_y: f32) -> Surface {
    if y <= SURFACE_HEIGHT_FACTOR * scale_y {
        Surface::Underground
    } else {
        Surface::Airborne
    }
}

/// Controller hook run at the start of every integration step.
///
/// While the hook runs, [`PhysicsBody::surface`] still reports the state from
/// the previous tick, so implementors can detect transitions by comparing it
/// with [`PhysicsBody::surface_now`].
pub trait MovementPolicy {
    /// Adds forces and torque to `body` and may set its intrinsic velocity.
    fn steer(&mut self, body: &mut PhysicsBody);
}

/// Policy that leaves the body to gravity and drag alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl MovementPolicy for Passive {
    fn steer(&mut self, _body: &mut PhysicsBody) {}
}

/// A 2D body with separately tracked intrinsic and extrinsic velocity.
///
/// Forces and torque accumulate between ticks and are consumed by
/// [`PhysicsBody::integrate`]. A frozen body discards them.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    position: Vec2,
    /// Rotation about z in degrees.
    heading: f32,
    scale: Vec2,
    mass: f32,
    intrinsic_velocity: Vec2,
    extrinsic_velocity: Vec2,
    angular_momentum: f32,
    force_accum: Vec2,
    torque_accum: f32,
    frozen: bool,
    surface: Surface,
    environment: WorldSettings,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ONE, DEFAULT_MASS, WorldSettings::default())
    }
}

impl PhysicsBody {
    /// Creates a body at rest at `position`.
    #[must_use]
    pub const fn new(position: Vec2, scale: Vec2, mass: f32, environment: WorldSettings) -> Self {
        Self {
            position,
            heading: 0.0,
            scale,
            mass,
            intrinsic_velocity: Vec2::ZERO,
            extrinsic_velocity: Vec2::ZERO,
            angular_momentum: 0.0,
            force_accum: Vec2::ZERO,
            torque_accum: 0.0,
            frozen: false,
            surface: surface_at(position.y, scale.y),
            environment,
        }
    }

    /// Zeroes all motion state and captures fresh environment constants.
    ///
    /// Position, heading and the frozen flag are left to the caller.
    pub fn reset(&mut self, environment: WorldSettings) {
        self.angular_momentum = 0.0;
        self.torque_accum = 0.0;
        self.intrinsic_velocity = Vec2::ZERO;
        self.extrinsic_velocity = Vec2::ZERO;
        self.force_accum = Vec2::ZERO;
        self.environment = environment;
        self.surface = self.surface_now();
    }

    /// Stops the body taking part in integration and drops new forces.
    pub const fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Lets the body move again from the next tick.
    pub const fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Whether forces and integration are currently ignored.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Accumulates `force` for the next integration step.
    pub fn add_force(&mut self, force: Vec2) {
        if !self.frozen {
            self.force_accum += force;
        }
    }

    /// Adds the force that changes velocity by exactly `delta_v` over one
    /// tick of integration.
    pub fn add_force_relative_to_velocity(&mut self, delta_v: Vec2) {
        if !self.frozen {
            self.force_accum += delta_v / self.environment.fixed_delta;
        }
    }

    /// Accumulates `torque`, amplified by the body's steering gain.
    pub fn add_torque(&mut self, torque: f32) {
        if !self.frozen {
            self.torque_accum += torque * TORQUE_GAIN;
        }
    }

    /// Runs one fixed tick.
    pub fn integrate(&mut self, policy: &mut dyn MovementPolicy) {
        if self.frozen {
            self.force_accum = Vec2::ZERO;
            self.torque_accum = 0.0;
            return;
        }
        let dt = self.environment.fixed_delta;

        policy.steer(self);

        self.surface = self.surface_now();

        if self.surface == Surface::Airborne {
            self.add_force(Vec2::NEG_Y * self.mass * self.environment.gravity * dt);
        }

        self.extrinsic_velocity += self.force_accum * dt;

        if self.surface == Surface::Underground {
            self.extrinsic_velocity = apply_ground_drag(
                self.extrinsic_velocity,
                dt,
                self.environment.ground_viscosity,
            );
        }

        let mut displacement = self.velocity() * dt;
        if displacement.length_squared() < MIN_DISPLACEMENT_SQR {
            displacement = Vec2::ZERO;
        }
        self.position += displacement;

        self.angular_momentum = self.torque_accum * dt;
        self.heading -= self.angular_momentum * dt;

        self.force_accum = Vec2::ZERO;
        self.torque_accum = 0.0;
    }

    /// Sum of intrinsic and extrinsic velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.intrinsic_velocity + self.extrinsic_velocity
    }

    /// Velocity set by the controller, immune to gravity and drag.
    #[must_use]
    pub const fn intrinsic_velocity(&self) -> Vec2 {
        self.intrinsic_velocity
    }

    /// Replaces the controller-driven part of the velocity.
    pub const fn set_intrinsic_velocity(&mut self, velocity: Vec2) {
        self.intrinsic_velocity = velocity;
    }

    /// Velocity integrated from accumulated forces.
    #[must_use]
    pub const fn extrinsic_velocity(&self) -> Vec2 {
        self.extrinsic_velocity
    }

    /// Angular momentum from the last integration step.
    #[must_use]
    pub const fn angular_momentum(&self) -> f32 {
        self.angular_momentum
    }

    /// World position of the body's centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the body without touching its velocity.
    pub const fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Rotation about z in degrees; positive turns counter-clockwise.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Sets the rotation about z in degrees.
    pub const fn set_heading(&mut self, degrees: f32) {
        self.heading = degrees;
    }

    /// Unit vector along the body's local up axis.
    ///
    /// # Examples
    /// ```
    /// use drill_arena::physics::PhysicsBody;
    /// let mut body = PhysicsBody::default();
    /// body.set_heading(90.0);
    /// let forward = body.forward();
    /// assert!((forward.x + 1.0).abs() < 1e-6 && forward.y.abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn forward(&self) -> Vec2 {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        Vec2::new(-sin, cos)
    }

    /// Body scale.
    #[must_use]
    pub const fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Mass used for gravity.
    #[must_use]
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Surface state recorded by the last integration step.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.surface
    }

    /// Surface state implied by the current position.
    #[must_use]
    pub const fn surface_now(&self) -> Surface {
        surface_at(self.position.y, self.scale.y)
    }

    /// Environment constants captured at construction or the last reset.
    #[must_use]
    pub const fn environment(&self) -> &WorldSettings {
        &self.environment
    }

    /// Tick length in seconds.
    #[must_use]
    pub const fn fixed_delta(&self) -> f32 {
        self.environment.fixed_delta
    }

    /// Force accumulated since the last integration step.
    #[must_use]
    pub const fn pending_force(&self) -> Vec2 {
        self.force_accum
    }

    /// Torque accumulated since the last integration step, gain applied.
    #[must_use]
    pub const fn pending_torque(&self) -> f32 {
        self.torque_accum
    }
}

/// Applies one tick of viscous drag to an extrinsic velocity.
///
/// Velocities slower than the snap threshold stop outright instead of
/// creeping towards zero. The decay factor never drops below zero, so drag
/// cannot reverse the direction of travel.
///
/// # Examples
/// ```
/// use drill_arena::physics::apply_ground_drag;
/// use glam::Vec2;
/// let slowed = apply_ground_drag(Vec2::new(1.0, 0.0), 0.02, 3.0);
/// assert!((slowed.x - 0.94).abs() < 1e-6);
/// assert_eq!(apply_ground_drag(Vec2::new(0.01, 0.0), 0.02, 3.0), Vec2::ZERO);
/// ```
#[must_use]
pub fn apply_ground_drag(velocity: Vec2, dt: f32, viscosity: f32) -> Vec2 {
    if velocity.length_squared() > DRAG_SNAP_SPEED_SQR {
        velocity * (1.0 - dt * viscosity).max(0.0)
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn airborne() -> PhysicsBody {
        PhysicsBody::new(Vec2::new(0.0, 5.0), Vec2::ONE, 20.0, WorldSettings::default())
    }

    #[fixture]
    fn underground() -> PhysicsBody {
        PhysicsBody::new(Vec2::new(0.0, -2.0), Vec2::ONE, 20.0, WorldSettings::default())
    }

    struct SetIntrinsic(Vec2);

    impl MovementPolicy for SetIntrinsic {
        fn steer(&mut self, body: &mut PhysicsBody) {
            body.set_intrinsic_velocity(self.0);
        }
    }

    #[rstest]
    fn frozen_body_drops_forces_and_does_not_move(mut airborne: PhysicsBody) {
        airborne.freeze();
        airborne.add_force(Vec2::new(100.0, 0.0));
        airborne.add_torque(1.0);
        assert_eq!(airborne.pending_force(), Vec2::ZERO);
        airborne.integrate(&mut Passive);
        assert_eq!(airborne.position(), Vec2::new(0.0, 5.0));
        assert_eq!(airborne.velocity(), Vec2::ZERO);
    }

    #[rstest]
    fn freeze_keeps_accumulated_force_until_next_tick(mut airborne: PhysicsBody) {
        airborne.add_force(Vec2::new(3.0, 0.0));
        airborne.freeze();
        assert_eq!(airborne.pending_force(), Vec2::new(3.0, 0.0));
        airborne.integrate(&mut Passive);
        assert_eq!(airborne.pending_force(), Vec2::ZERO);
    }

    #[rstest]
    fn gravity_scales_with_mass_and_tick(mut airborne: PhysicsBody) {
        airborne.integrate(&mut Passive);
        let dt = 0.02_f32;
        let expected_vy = -20.0 * 9.81 * dt * dt;
        assert_relative_eq!(airborne.extrinsic_velocity().y, expected_vy, epsilon = 1e-6);
        assert_eq!(airborne.surface(), Surface::Airborne);
    }

    #[rstest]
    fn relative_force_applies_exact_velocity_delta(mut underground: PhysicsBody) {
        underground.reset(WorldSettings {
            ground_viscosity: 0.0,
            ..WorldSettings::default()
        });
        underground.add_force_relative_to_velocity(Vec2::new(2.0, 0.0));
        underground.integrate(&mut Passive);
        assert_relative_eq!(underground.extrinsic_velocity().x, 2.0, epsilon = 1e-5);
    }

    #[rstest]
    fn drag_never_reverses_sign(mut underground: PhysicsBody) {
        underground.add_force_relative_to_velocity(Vec2::new(3.0, -4.0));
        let mut previous = Vec2::new(3.0, -4.0);
        for _ in 0..500 {
            underground.integrate(&mut Passive);
            let current = underground.extrinsic_velocity();
            assert!(current.x >= 0.0 && current.x <= previous.x);
            assert!(current.y <= 0.0 && current.y >= previous.y);
            previous = current;
        }
        assert_eq!(underground.extrinsic_velocity(), Vec2::ZERO);
    }

    #[rstest]
    #[case::exact_stop(50.0)]
    #[case::overshoot(60.0)]
    fn thick_drag_stops_instead_of_reversing(#[case] viscosity: f32) {
        let slowed = apply_ground_drag(Vec2::new(3.0, -1.0), 0.02, viscosity);
        assert!(slowed.x >= 0.0 && slowed.y <= 0.0);
        assert_relative_eq!(slowed.length(), 0.0, epsilon = 1e-6);
    }

    #[rstest]
    fn tiny_displacement_is_discarded(mut underground: PhysicsBody) {
        let mut policy = SetIntrinsic(Vec2::new(0.1, 0.0));
        underground.integrate(&mut policy);
        assert_eq!(underground.position(), Vec2::new(0.0, -2.0));
        assert_relative_eq!(underground.velocity().x, 0.1);
    }

    #[rstest]
    fn velocity_is_sum_of_parts(mut underground: PhysicsBody) {
        let mut policy = SetIntrinsic(Vec2::new(-2.0, 0.5));
        for tick in 0..20 {
            if tick % 3 == 0 {
                underground.add_force(Vec2::new(10.0, 40.0));
            }
            underground.integrate(&mut policy);
            assert_eq!(
                underground.velocity(),
                underground.intrinsic_velocity() + underground.extrinsic_velocity()
            );
        }
    }

    #[rstest]
    fn torque_turns_heading_clockwise(mut underground: PhysicsBody) {
        underground.add_torque(1.0);
        underground.integrate(&mut Passive);
        let dt = 0.02_f32;
        assert_relative_eq!(underground.angular_momentum(), TORQUE_GAIN * dt);
        assert_relative_eq!(underground.heading(), -TORQUE_GAIN * dt * dt);
        assert_eq!(underground.pending_torque(), 0.0);
    }

    #[rstest]
    fn reset_clears_motion_and_recaptures_environment(mut airborne: PhysicsBody) {
        airborne.add_force(Vec2::new(5.0, 0.0));
        airborne.integrate(&mut SetIntrinsic(Vec2::ONE));
        let settings = WorldSettings {
            gravity: 1.0,
            ..WorldSettings::default()
        };
        airborne.reset(settings);
        assert_eq!(airborne.velocity(), Vec2::ZERO);
        assert_eq!(airborne.angular_momentum(), 0.0);
        assert_eq!(airborne.environment(), &settings);
    }
}
