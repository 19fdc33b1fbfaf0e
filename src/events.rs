//! Buffered notifications for the effects and scoring collaborators.
//!
//! Combatants never call out to presentation or scoring code directly.
//! They queue [`CombatantEvent`]s, and the owner drains them after each
//! step.

use crate::combatant::PlayerIndex;

/// Fire-and-forget presentation triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectCue {
    /// A damaging hit landed.
    PlayHitEffect,
    /// The drill entered the ground.
    PlayUndergroundEffect,
    /// The drill broke the surface.
    StopUndergroundEffect,
    /// The drill started to accelerate underground.
    PlayDrillSparks,
    /// The drill stopped accelerating or left the ground.
    StopDrillSparks,
    /// Removes spark particles already in flight.
    ClearDrillSparks,
    /// Starts (`true`) or ends (`false`) the damage blink.
    SetBlink(bool),
    /// Alpha of the damage indicator in `[0, 1]`.
    SetHealthBarOpacity(f32),
    /// Shows or hides the drill's sprite.
    SetVisible(bool),
}

/// Everything a combatant reports to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatantEvent {
    /// Presentation cue for the effects collaborator.
    Effect(EffectCue),
    /// Health reached zero. Emitted once per lost life.
    LifeLost {
        /// Drill that lost the life.
        player: PlayerIndex,
        /// Opponent credited with the elimination, if one struck recently.
        last_toucher: Option<PlayerIndex>,
        /// Lives remaining after this one was taken.
        lives_left: u32,
    },
    /// The deferred deactivation after a lost life completed.
    Deactivated {
        /// Drill that left the scene.
        player: PlayerIndex,
    },
    /// The respawn countdown finished and the drill can move again.
    Released {
        /// Drill that was unfrozen.
        player: PlayerIndex,
    },
}

/// Ordered queue of events waiting to be drained by the owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutbox {
    events: Vec<CombatantEvent>,
}

impl EventOutbox {
    /// Queues an event behind those already pending.
    pub fn push(&mut self, event: CombatantEvent) {
        self.events.push(event);
    }

    /// Queues a presentation cue.
    pub fn cue(&mut self, cue: EffectCue) {
        self.events.push(CombatantEvent::Effect(cue));
    }

    /// Removes and yields every pending event, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, CombatantEvent> {
        self.events.drain(..)
    }

    /// Whether nothing is waiting to be drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending events, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[CombatantEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn drain_returns_events_in_order_and_empties() {
        let mut outbox = EventOutbox::default();
        assert!(outbox.is_empty());
        outbox.cue(EffectCue::PlayHitEffect);
        outbox.push(CombatantEvent::Deactivated {
            player: PlayerIndex(1),
        });
        let drained: Vec<_> = outbox.drain().collect();
        assert_eq!(
            drained,
            vec![
                CombatantEvent::Effect(EffectCue::PlayHitEffect),
                CombatantEvent::Deactivated {
                    player: PlayerIndex(1)
                },
            ]
        );
        assert!(outbox.is_empty());
    }
}
