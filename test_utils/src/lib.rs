//! Utility helpers for tests.
//!
//! Builders for combatants in common poses, a fixed-answer [`HitboxQuery`]
//! and small event helpers shared by the integration suites.

use drill_arena::events::CombatantEvent;
use drill_arena::hitbox::{CastHit, CircleCast, HitPart, HitboxQuery};
use drill_arena::{Combatant, Opponent, PlayerIndex, SimulationClock};
use glam::Vec2;

/// Fixed tick used by every helper.
pub const DT: f32 = 0.02;

/// Builds a frozen combatant for `player` hovering at `(x, 5)`.
///
/// # Panics
/// Panics if the default tuning fails validation.
#[must_use]
pub fn airborne(player: u8, x: f32) -> Combatant {
    Combatant::builder()
        .player(PlayerIndex(player))
        .spawn(Vec2::new(x, 5.0))
        .build()
        .expect("default tuning should validate")
}

/// Builds a frozen combatant for `player` buried at `(x, -3)`.
///
/// # Panics
/// Panics if the default tuning fails validation.
#[must_use]
pub fn buried(player: u8, x: f32) -> Combatant {
    Combatant::builder()
        .player(PlayerIndex(player))
        .spawn(Vec2::new(x, -3.0))
        .build()
        .expect("default tuning should validate")
}

/// Unfreezes `combatant` and drives it until it is reversing at high speed.
///
/// The combatant must be underground at heading zero.
///
/// # Panics
/// Panics if high speed is not reached within a few ticks.
pub fn make_high_speed(combatant: &mut Combatant) {
    combatant.unfreeze();
    combatant
        .body_mut()
        .add_force_relative_to_velocity(Vec2::new(0.0, -6.0));
    for _ in 0..3 {
        combatant.fixed_update();
        if combatant.high_speed() {
            return;
        }
    }
    panic!("combatant never reached high speed");
}

/// Runs `ticks` fixed updates.
pub fn run_ticks(combatant: &mut Combatant, ticks: usize) {
    for _ in 0..ticks {
        combatant.fixed_update();
    }
}

/// Drains and returns the combatant's queued events.
pub fn drain(combatant: &mut Combatant) -> Vec<CombatantEvent> {
    combatant.drain_events().collect()
}

/// Counts queued `LifeLost` events without draining them.
#[must_use]
pub fn life_lost_count(combatant: &Combatant) -> usize {
    combatant
        .events()
        .iter()
        .filter(|event| matches!(event, CombatantEvent::LifeLost { .. }))
        .count()
}

/// Opponent snapshot one unit to the right of `target`.
#[must_use]
pub fn opponent_beside(target: &Combatant, player: u8, high_speed: bool) -> Opponent {
    Opponent {
        player: PlayerIndex(player),
        position: target.position() + Vec2::X,
        high_speed,
    }
}

/// Running clock ticking at [`DT`].
#[must_use]
pub fn clock() -> SimulationClock {
    SimulationClock::new(DT)
}

/// Volume query that always reports one part of one owner.
#[derive(Debug, Clone, Copy)]
pub struct FixedHit {
    /// Owner reported for every cast.
    pub owner: PlayerIndex,
    /// Part reported for every cast.
    pub part: HitPart,
}

impl FixedHit {
    /// Query reporting `part` of the drill in slot `owner`.
    #[must_use]
    pub const fn new(owner: u8, part: HitPart) -> Self {
        Self {
            owner: PlayerIndex(owner),
            part,
        }
    }
}

impl HitboxQuery for FixedHit {
    fn circle_cast(&self, _cast: &CircleCast) -> Vec<CastHit> {
        vec![CastHit {
            owner: self.owner,
            part: self.part,
            distance: 0.0,
        }]
    }
}

/// Volume query that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHits;

impl HitboxQuery for NoHits {
    fn circle_cast(&self, _cast: &CircleCast) -> Vec<CastHit> {
        Vec::new()
    }
}
