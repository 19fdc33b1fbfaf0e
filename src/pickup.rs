//! Trigger volumes that act on the drill entering them.
//!
//! Health packs, hazards, bumpers and score tokens are all a [`Pickup`]
//! with a different mix of effects. A pickup reacts to a drill tip entering
//! its circle, once per entry.

use glam::Vec2;
use hashbrown::HashSet;
use log::debug;

use crate::combatant::{Combatant, HealthChange, PlayerIndex};
use crate::constants::PICKUP_KNOCKBACK_IMPULSE;
use crate::hitbox::{HitPart, Hitbox};

/// What a pickup did to one drill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupEffect {
    /// Drill the pickup acted on.
    pub player: PlayerIndex,
    /// Points for the scoring collaborator to award.
    pub score: u32,
    /// `None` when the pickup carries no health change.
    pub health: Option<HealthChange>,
    /// Whether a knockback force was applied.
    pub knocked_back: bool,
}

/// A circular trigger volume with a configurable set of effects.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    position: Vec2,
    radius: f32,
    /// Positive heals, negative hurts.
    health_delta: f32,
    score: u32,
    knockback: bool,
    consume_on_enter: bool,
    consumed: bool,
    inside: HashSet<PlayerIndex>,
}

impl Pickup {
    /// Creates an inert pickup; chain the `with_*` methods to give it
    /// effects.
    #[must_use]
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            health_delta: 0.0,
            score: 0,
            knockback: false,
            consume_on_enter: false,
            consumed: false,
            inside: HashSet::new(),
        }
    }

    /// Heals by a positive `delta` or hurts by a negative one.
    #[must_use]
    pub fn with_health_delta(mut self, delta: f32) -> Self {
        self.health_delta = delta;
        self
    }

    /// Points reported to the scoring collaborator on every use.
    #[must_use]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// Pushes the drill tip away from the pickup's centre.
    #[must_use]
    pub fn with_knockback(mut self, knockback: bool) -> Self {
        self.knockback = knockback;
        self
    }

    /// Makes the pickup disappear after its first use.
    #[must_use]
    pub fn consumed_on_enter(mut self, consume: bool) -> Self {
        self.consume_on_enter = consume;
        self
    }

    /// Centre of the trigger circle.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the trigger circle.
    pub const fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Radius of the trigger circle.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether a single-use pickup has been used.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Returns `true` when the drill tip of `combatant` is inside the pickup.
    #[must_use]
    pub fn touches(&self, combatant: &Combatant) -> bool {
        let volume = Hitbox {
            owner: combatant.player(),
            part: HitPart::Peripheral,
            center: self.position,
            radius: self.radius,
        };
        combatant
            .hitboxes()
            .iter()
            .filter(|hitbox| hitbox.part == HitPart::Peripheral)
            .any(|tip| tip.overlaps(&volume))
    }

    /// Applies every effect of the pickup to `combatant`.
    ///
    /// Returns `None` once the pickup has been consumed.
    pub fn apply(&mut self, combatant: &mut Combatant) -> Option<PickupEffect> {
        if self.consumed {
            return None;
        }

        let health = if self.health_delta > 0.0 {
            Some(combatant.heal(self.health_delta))
        } else if self.health_delta < 0.0 {
            Some(combatant.hurt(-self.health_delta))
        } else {
            None
        };

        if self.knockback {
            let [_, tip] = combatant.hitboxes();
            let away = (tip.center - self.position).normalize_or_zero();
            let dt = combatant.body().fixed_delta();
            combatant.add_force(away * PICKUP_KNOCKBACK_IMPULSE / dt);
        }

        if self.consume_on_enter {
            self.consumed = true;
            self.inside.clear();
        }

        debug!("pickup at {:?} used by {}", self.position, combatant.player());
        Some(PickupEffect {
            player: combatant.player(),
            score: self.score,
            health,
            knocked_back: self.knockback,
        })
    }

    /// Applies the pickup to every present drill whose tip entered it since
    /// the last call. Drills that stay inside are not affected again.
    pub fn update(&mut self, combatants: &mut [Combatant]) -> Vec<PickupEffect> {
        let mut effects = Vec::new();
        for combatant in combatants.iter_mut() {
            if self.consumed {
                break;
            }
            let player = combatant.player();
            if !combatant.is_present() || !self.touches(combatant) {
                self.inside.remove(&player);
                continue;
            }
            if self.inside.insert(player) {
                effects.extend(self.apply(combatant));
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CombatantEvent, EffectCue};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn drill() -> Combatant {
        Combatant::builder()
            .player(PlayerIndex(0))
            .spawn(Vec2::new(0.0, 5.0))
            .build()
            .expect("valid combatant")
    }

    /// Pickup centred on the drill tip of [`drill`].
    fn at_tip(drill: &Combatant) -> Pickup {
        let [_, tip] = drill.hitboxes();
        Pickup::new(tip.center, 0.2)
    }

    #[rstest]
    fn health_pack_heals_once_per_entry(mut drill: Combatant) {
        drill.hurt(2.0);
        let mut pack = at_tip(&drill).with_health_delta(1.0);
        let mut drills = vec![drill];

        let first = pack.update(&mut drills);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].health, Some(HealthChange::Changed { health: 3.0 }));
        assert!(pack.update(&mut drills).is_empty());
        assert_relative_eq!(drills[0].health(), 3.0);
    }

    #[rstest]
    fn hazard_hurts_and_reports_score(mut drill: Combatant) {
        let mut hazard = at_tip(&drill).with_health_delta(-1.0).with_score(2);
        let effect = hazard.apply(&mut drill).expect("not consumed");
        assert_eq!(effect.score, 2);
        assert_relative_eq!(drill.health(), 3.0);
        assert!(drill
            .events()
            .contains(&CombatantEvent::Effect(EffectCue::PlayHitEffect)));
    }

    #[rstest]
    fn knockback_pushes_tip_away(mut drill: Combatant) {
        drill.unfreeze();
        let [_, tip] = drill.hitboxes();
        let mut bumper = Pickup::new(tip.center + Vec2::new(0.1, 0.0), 0.2).with_knockback(true);
        bumper.apply(&mut drill);
        let force = drill.body().pending_force();
        assert_relative_eq!(force.x, -PICKUP_KNOCKBACK_IMPULSE / 0.02, epsilon = 1e-3);
    }

    #[rstest]
    fn consumed_pickup_does_nothing(mut drill: Combatant) {
        let mut token = at_tip(&drill).with_score(1).consumed_on_enter(true);
        assert!(token.apply(&mut drill).is_some());
        assert!(token.is_consumed());
        assert!(token.apply(&mut drill).is_none());
    }

    #[rstest]
    fn body_alone_does_not_trigger(drill: Combatant) {
        let far_from_tip = Pickup::new(drill.position() + Vec2::new(0.0, 0.45), 0.05);
        assert!(!far_from_tip.touches(&drill));
    }
}
