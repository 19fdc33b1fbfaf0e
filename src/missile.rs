//! Homing hazards.
//!
//! A [`Missile`] is a [`Pickup`] that drifts after the drills. Once per
//! retarget period it aims at whichever present drill is closest, with a
//! cruise velocity that grows with the distance up to a cap. Within each
//! period the velocity eases in from zero with the square of the elapsed
//! time, so the missile lunges forward in bursts.

use glam::Vec2;
use log::debug;

use crate::combatant::Combatant;
use crate::constants::{
    DEFAULT_MISSILE_SPEED, MISSILE_DISTANCE_GAIN, MISSILE_MAX_REACH, MISSILE_RETARGET_SECS,
};
use crate::pickup::{Pickup, PickupEffect};
use crate::timer::secs_to_ticks;

/// Cruise velocity of a missile at `position` chasing `target`.
///
/// # Examples
/// ```
/// use drill_arena::missile::cruise_velocity;
/// use glam::Vec2;
/// let near = cruise_velocity(Vec2::ZERO, Vec2::new(3.0, 0.0), 0.2);
/// assert!((near.x - 0.66).abs() < 1e-5);
/// let far = cruise_velocity(Vec2::ZERO, Vec2::new(0.0, 100.0), 0.2);
/// assert!((far.y - 2.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn cruise_velocity(position: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let offset = target - position;
    let reach = (offset.length() * MISSILE_DISTANCE_GAIN).min(MISSILE_MAX_REACH);
    offset.normalize_or_zero() * speed * reach
}

/// A pickup that homes in on the nearest drill.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    payload: Pickup,
    speed: f32,
    cruise: Vec2,
    since_retarget: u32,
}

impl Missile {
    /// Wraps `payload`; the missile carries its effects and trigger circle.
    ///
    /// It idles for the first retarget period.
    #[must_use]
    pub const fn new(payload: Pickup) -> Self {
        Self {
            payload,
            speed: DEFAULT_MISSILE_SPEED,
            cruise: Vec2::ZERO,
            since_retarget: 0,
        }
    }

    /// Overrides the cruise speed factor.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// The trigger carried by the missile.
    #[must_use]
    pub const fn payload(&self) -> &Pickup {
        &self.payload
    }

    /// Current centre of the trigger circle.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.payload.position()
    }

    /// Velocity picked at the last retarget, before easing.
    #[must_use]
    pub const fn cruise(&self) -> Vec2 {
        self.cruise
    }

    /// Moves the missile by one tick of `dt` seconds.
    ///
    /// A consumed missile stays where it is.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Tick counts within one retarget period are small."
    )]
    pub fn advance(&mut self, combatants: &[Combatant], dt: f32) {
        if self.payload.is_consumed() {
            return;
        }
        self.since_retarget = self.since_retarget.saturating_add(1);
        if self.since_retarget >= secs_to_ticks(MISSILE_RETARGET_SECS, dt) {
            self.since_retarget = 0;
            self.retarget(combatants);
        }
        let elapsed = self.since_retarget as f32 * dt;
        let ease = (elapsed * elapsed).min(1.0);
        let position = self.payload.position() + self.cruise * ease * dt;
        self.payload.set_position(position);
    }

    fn retarget(&mut self, combatants: &[Combatant]) {
        let position = self.payload.position();
        let nearest = combatants
            .iter()
            .filter(|combatant| combatant.is_present())
            .min_by(|a, b| {
                a.position()
                    .distance_squared(position)
                    .total_cmp(&b.position().distance_squared(position))
            });
        self.cruise = nearest.map_or(Vec2::ZERO, |target| {
            debug!("missile at {position:?} chasing {}", target.player());
            cruise_velocity(position, target.position(), self.speed)
        });
    }

    /// Advances the missile, then applies its payload to drills it touched.
    pub fn update(&mut self, combatants: &mut [Combatant], dt: f32) -> Vec<PickupEffect> {
        self.advance(combatants, dt);
        self.payload.update(combatants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::PlayerIndex;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const DT: f32 = 0.02;

    fn drill_at(player: u8, x: f32) -> Combatant {
        Combatant::builder()
            .player(PlayerIndex(player))
            .spawn(Vec2::new(x, 5.0))
            .build()
            .expect("valid combatant")
    }

    fn missile_at(x: f32) -> Missile {
        Missile::new(Pickup::new(Vec2::new(x, 5.0), 0.1).with_health_delta(-1.0))
    }

    fn run(missile: &mut Missile, drills: &[Combatant], ticks: usize) {
        for _ in 0..ticks {
            missile.advance(drills, DT);
        }
    }

    #[rstest]
    fn idles_until_the_first_retarget() {
        let drills = [drill_at(0, 3.0)];
        let mut missile = missile_at(0.0);
        run(&mut missile, &drills, 49);
        assert_eq!(missile.cruise(), Vec2::ZERO);
        run(&mut missile, &drills, 1);
        assert_eq!(missile.position(), Vec2::new(0.0, 5.0));
        assert_relative_eq!(missile.cruise().x, 0.66, epsilon = 1e-5);
        assert_relative_eq!(missile.cruise().y, 0.0);
    }

    #[rstest]
    fn lunge_eases_in() {
        let drills = [drill_at(0, 3.0)];
        let mut missile = missile_at(0.0);
        run(&mut missile, &drills, 50);
        let mut previous = missile.position().x;
        let mut last_step = 0.0;
        for _ in 0..10 {
            missile.advance(&drills, DT);
            let step = missile.position().x - previous;
            assert!(step > last_step);
            last_step = step;
            previous = missile.position().x;
        }
        assert_relative_eq!(missile.position().y, 5.0);
    }

    #[rstest]
    fn chases_the_nearest_present_drill() {
        let mut drills = [drill_at(0, -2.0), drill_at(1, 4.0)];
        let mut missile = missile_at(0.0);
        run(&mut missile, &drills, 60);
        assert!(missile.position().x < 0.0);

        let [left, _] = &mut drills;
        left.hurt(left.max_health());
        for _ in 0..5 {
            left.fixed_update();
        }
        assert!(!left.is_present());
        let mut missile = missile_at(0.0);
        run(&mut missile, &drills, 60);
        assert!(missile.position().x > 0.0);
    }

    #[rstest]
    fn empty_arena_leaves_missile_in_place() {
        let mut missile = missile_at(1.0);
        run(&mut missile, &[], 120);
        assert_eq!(missile.position(), Vec2::new(1.0, 5.0));
    }

    #[rstest]
    fn consumed_missile_stops() {
        let drills = [drill_at(0, 3.0)];
        let mut missile = Missile::new(
            Pickup::new(Vec2::new(0.0, 5.0), 0.1)
                .with_score(1)
                .consumed_on_enter(true),
        );
        run(&mut missile, &drills, 55);
        let mut drill = drill_at(1, 0.0);
        assert!(missile.payload.apply(&mut drill).is_some());
        let parked = missile.position();
        run(&mut missile, &drills, 20);
        assert_eq!(missile.position(), parked);
    }
}
