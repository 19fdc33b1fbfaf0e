//! Hit classification and damage rules.

use glam::Vec2;

use crate::constants::{HIT_PROBE_DISTANCE, HIT_PROBE_RADIUS_FACTOR};
use crate::hitbox::{CircleCast, HitPart, HitboxQuery};

use super::PlayerIndex;

/// Read-only view of the combatant on the other side of a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opponent {
    /// Slot of the opposing drill.
    pub player: PlayerIndex,
    /// Its position when the contact began.
    pub position: Vec2,
    /// Whether it was at high speed when the contact began.
    pub high_speed: bool,
}

/// Stateless helper that resolves which part of a drill was struck and
/// how much that hurts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactResolver;

impl ContactResolver {
    /// Builds the probe swept from the opponent towards the target.
    #[must_use]
    pub fn probe(target: PlayerIndex, target_position: Vec2, target_scale: Vec2, opponent_position: Vec2) -> CircleCast {
        CircleCast {
            origin: opponent_position,
            radius: HIT_PROBE_RADIUS_FACTOR * target_scale.x,
            direction: target_position - opponent_position,
            max_distance: HIT_PROBE_DISTANCE,
            owner: Some(target),
        }
    }

    /// Returns the first part of `cast.owner` met by the probe.
    ///
    /// Hits on other drills are skipped even when the query does not filter
    /// by owner.
    #[must_use]
    pub fn classify(query: &dyn HitboxQuery, cast: &CircleCast) -> Option<HitPart> {
        query
            .circle_cast(cast)
            .into_iter()
            .find(|hit| cast.owner.map_or(true, |owner| hit.owner == owner))
            .map(|hit| hit.part)
    }

    /// Damage dealt to a target whose `part` was struck.
    ///
    /// A body hit always hurts, and hurts twice as much from a high-speed
    /// opponent. A drill-on-drill hit only hurts when the opponent is at high
    /// speed and the target is not.
    ///
    /// # Examples
    /// ```
    /// use drill_arena::combatant::ContactResolver;
    /// use drill_arena::hitbox::HitPart;
    /// assert_eq!(ContactResolver::damage(HitPart::Core, false, true), 2);
    /// assert_eq!(ContactResolver::damage(HitPart::Peripheral, true, true), 0);
    /// ```
    #[must_use]
    pub fn damage(part: HitPart, target_high_speed: bool, opponent_high_speed: bool) -> u8 {
        match part {
            HitPart::Core => 1 + u8::from(opponent_high_speed),
            HitPart::Peripheral => u8::from(opponent_high_speed && !target_high_speed),
        }
    }
}
