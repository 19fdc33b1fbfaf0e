//! Drill combatants.
//!
//! A [`Combatant`] embeds a [`PhysicsBody`] and drives it with the drill
//! movement policy. It tracks health, lives and the time-boxed states around
//! being hit: invulnerability, the damage blink, the last opponent to strike
//! it and the deferred deactivation after a lost life. Effects and
//! eliminations are queued on the combatant's [`EventOutbox`].

mod contact;
mod drive;
mod health;

use std::fmt;

use glam::Vec2;
use log::{debug, info, warn};

pub use contact::{ContactResolver, Opponent};
pub use drive::{is_high_speed, steering_torque, DrillDrive, DriveStep};
pub use health::{health_bar_opacity, is_valid_amount, Health, HealthChange};

use crate::clock::SimulationClock;
use crate::config::{DrillTuning, WorldSettings};
use crate::constants::{
    DEACTIVATION_DELAY_SECS, DEFAULT_LIVES, DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y, HITSTOP_SECS,
    HIT_BLINK_SECS, INVULNERABILITY_SECS, KNOCKBACK_IMPULSE, LAST_TOUCHER_HOLD_SECS,
    RESPAWN_BLINK_SECS, RESPAWN_COUNTDOWN_SECS,
};
use crate::error::ConfigError;
use crate::events::{CombatantEvent, EffectCue, EventOutbox};
use crate::hitbox::{drill_hitboxes, HitPart, Hitbox, HitboxQuery};
use crate::physics::{PhysicsBody, Surface};
use crate::timer::Countdown;

/// Player slot a combatant is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerIndex(pub u8);

impl PlayerIndex {
    /// Raw slot number.
    #[must_use]
    pub const fn into_inner(self) -> u8 {
        self.0
    }
}

impl From<u8> for PlayerIndex {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Whether a combatant can still be hurt this life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Standing with health left.
    Active,
    /// Out of health; waiting for deactivation or the next respawn.
    Eliminated,
}

/// What a reported contact did to the struck combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// The combatant is eliminated, out of the scene or was handed itself.
    Ignored,
    /// Another opponent volume is already inside this combatant.
    Suppressed,
    /// The probe found none of this combatant's parts.
    Missed,
    /// Knockback applied; invulnerability absorbed the damage.
    Shielded {
        /// Part the probe found.
        part: HitPart,
    },
    /// Knockback applied; the contact dealt no damage.
    Deflected {
        /// Part the probe found.
        part: HitPart,
    },
    /// Knockback applied and health removed.
    Damaged {
        /// Part the probe found.
        part: HitPart,
        /// Health removed by the hit.
        damage: u8,
        /// Effect of the damage on the health pool.
        change: HealthChange,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Timers {
    invulnerability: Countdown,
    blink: Countdown,
    last_toucher: Countdown,
    deactivation: Countdown,
    unfreeze: Countdown,
}

impl Timers {
    fn cancel_all(&mut self) {
        self.invulnerability.cancel();
        self.blink.cancel();
        self.last_toucher.cancel();
        self.deactivation.cancel();
        self.unfreeze.cancel();
    }
}

/// A drill bound to one player slot.
///
/// Built through [`CombatantBuilder`]; stepped by [`Combatant::fixed_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    player: PlayerIndex,
    world: WorldSettings,
    body: PhysicsBody,
    drive: DrillDrive,
    health: Health,
    lives_left: u32,
    lifecycle: Lifecycle,
    present: bool,
    invulnerable: bool,
    contact_count: u32,
    last_toucher: Option<PlayerIndex>,
    spawn_position: Vec2,
    timers: Timers,
    events: EventOutbox,
}

/// Assembles a [`Combatant`]. The player index is mandatory.
#[derive(Debug, Clone)]
pub struct CombatantBuilder {
    player: Option<PlayerIndex>,
    tuning: DrillTuning,
    world: WorldSettings,
    spawn: Vec2,
    lives: u32,
}

impl Default for CombatantBuilder {
    fn default() -> Self {
        Self {
            player: None,
            tuning: DrillTuning::default(),
            world: WorldSettings::default(),
            spawn: Vec2::new(DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y),
            lives: DEFAULT_LIVES,
        }
    }
}

impl CombatantBuilder {
    /// Builder with default tuning, spawn point and lives.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the combatant to a player slot.
    #[must_use]
    pub const fn player(mut self, player: PlayerIndex) -> Self {
        self.player = Some(player);
        self
    }

    /// Overrides the drill handling values.
    #[must_use]
    pub const fn tuning(mut self, tuning: DrillTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Overrides the environment captured by the body.
    #[must_use]
    pub const fn world(mut self, world: WorldSettings) -> Self {
        self.world = world;
        self
    }

    /// Sets the spawn point used by every reset.
    #[must_use]
    pub const fn spawn(mut self, spawn: Vec2) -> Self {
        self.spawn = spawn;
        self
    }

    /// Sets the starting number of lives.
    #[must_use]
    pub const fn lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    /// Builds a present, frozen combatant at full health on its spawn point.
    ///
    /// # Errors
    /// [`ConfigError::MissingPlayerIndex`] when no player was assigned, or
    /// the validation error of the world settings or tuning.
    pub fn build(self) -> Result<Combatant, ConfigError> {
        let player = self.player.ok_or(ConfigError::MissingPlayerIndex)?;
        self.world.validate()?;
        self.tuning.validate()?;

        let mut body = PhysicsBody::new(self.spawn, self.tuning.scale, self.tuning.mass, self.world);
        body.freeze();
        Ok(Combatant {
            player,
            world: self.world,
            body,
            drive: DrillDrive::new(self.tuning),
            health: Health::full(self.tuning.max_health),
            lives_left: self.lives,
            lifecycle: Lifecycle::Active,
            present: true,
            invulnerable: false,
            contact_count: 0,
            last_toucher: None,
            spawn_position: self.spawn,
            timers: Timers::default(),
            events: EventOutbox::default(),
        })
    }
}

impl Combatant {
    /// Shorthand for [`CombatantBuilder::new`].
    #[must_use]
    pub fn builder() -> CombatantBuilder {
        CombatantBuilder::new()
    }

    /// Runs one fixed tick: integrates the body, then advances every
    /// countdown and applies the ones that complete.
    pub fn fixed_update(&mut self) {
        if !self.present {
            return;
        }
        self.body.integrate(&mut DriveStep {
            drive: &mut self.drive,
            events: &mut self.events,
        });
        self.tick_timers();
    }

    fn tick_timers(&mut self) {
        if self.timers.invulnerability.tick() {
            self.invulnerable = false;
        }
        if self.timers.blink.tick() {
            self.events.cue(EffectCue::SetBlink(false));
        }
        if self.timers.last_toucher.tick() {
            self.last_toucher = None;
        }
        if self.timers.unfreeze.tick() {
            self.body.unfreeze();
            info!("{} released", self.player);
            self.events.push(CombatantEvent::Released {
                player: self.player,
            });
        }
        if self.timers.deactivation.tick() {
            self.timers.cancel_all();
            self.present = false;
            debug!("{} deactivated", self.player);
            self.events.push(CombatantEvent::Deactivated {
                player: self.player,
            });
        }
    }

    /// Sets the steering input, clamped to `[-1, 1]`.
    pub fn turn(&mut self, value: f32) {
        self.drive.set_turn(value);
    }

    /// Sets the accelerate (positive) or brake (negative) input, clamped to
    /// `[-1, 1]`.
    pub fn accelerate(&mut self, value: f32) {
        self.drive.set_accel(value);
    }

    /// Restores spawn state and freezes the body.
    ///
    /// Stops every pending timer, so a deactivation scheduled by a lost life
    /// is cancelled too.
    pub fn reset(&mut self) {
        let was_blinking = self.timers.blink.is_running();
        self.timers.cancel_all();

        self.body.set_position(self.spawn_position);
        self.body.set_heading(0.0);
        self.body.reset(self.world);

        self.health.refill();
        self.lifecycle = Lifecycle::Active;
        self.invulnerable = false;
        self.contact_count = 0;
        self.last_toucher = None;
        self.drive.reset();

        self.events.cue(EffectCue::StopDrillSparks);
        self.events.cue(EffectCue::StopUndergroundEffect);
        self.events.cue(EffectCue::SetHealthBarOpacity(0.0));
        self.events.cue(EffectCue::SetVisible(true));
        if was_blinking {
            self.events.cue(EffectCue::SetBlink(false));
        }

        self.body.freeze();
    }

    /// Puts the combatant back into the scene on its spawn point.
    ///
    /// It stays frozen for a short countdown, blinking and invulnerable.
    pub fn respawn(&mut self) {
        self.present = true;
        self.reset();
        let dt = self.world.fixed_delta;
        self.start_blink(RESPAWN_BLINK_SECS);
        self.invulnerable = true;
        self.timers.invulnerability.start(INVULNERABILITY_SECS, dt);
        self.timers.unfreeze.start(RESPAWN_COUNTDOWN_SECS, dt);
        info!("{} respawned with {} lives", self.player, self.lives_left);
    }

    /// Stops the body moving; timers keep running.
    pub const fn freeze(&mut self) {
        self.body.freeze();
    }

    /// Lets the body move again.
    pub const fn unfreeze(&mut self) {
        self.body.unfreeze();
    }

    /// Removes `amount` health.
    ///
    /// Reaching zero costs a life: the drill hides, a [`CombatantEvent::LifeLost`]
    /// is queued and deactivation follows shortly after.
    pub fn hurt(&mut self, amount: f32) -> HealthChange {
        if !is_valid_amount(amount) {
            warn!("{} rejected damage amount {amount}", self.player);
            return HealthChange::Rejected;
        }
        if !self.is_alive() {
            return HealthChange::Ignored;
        }

        let health = self.health.damage(amount);
        if self.health.is_depleted() {
            return self.lose_life();
        }

        self.events.cue(EffectCue::PlayHitEffect);
        self.events
            .cue(EffectCue::SetHealthBarOpacity(self.health.bar_opacity()));
        self.start_blink(HIT_BLINK_SECS);
        HealthChange::Changed { health }
    }

    fn lose_life(&mut self) -> HealthChange {
        self.lives_left = self.lives_left.saturating_sub(1);
        self.lifecycle = Lifecycle::Eliminated;
        self.events.cue(EffectCue::SetVisible(false));
        self.timers
            .deactivation
            .start(DEACTIVATION_DELAY_SECS, self.world.fixed_delta);
        info!(
            "{} lost a life ({} left), last touched by {:?}",
            self.player, self.lives_left, self.last_toucher
        );
        self.events.push(CombatantEvent::LifeLost {
            player: self.player,
            last_toucher: self.last_toucher,
            lives_left: self.lives_left,
        });
        HealthChange::Eliminated {
            lives_left: self.lives_left,
        }
    }

    /// Restores `amount` health, capped at the maximum.
    pub fn heal(&mut self, amount: f32) -> HealthChange {
        if !is_valid_amount(amount) {
            warn!("{} rejected heal amount {amount}", self.player);
            return HealthChange::Rejected;
        }
        if !self.is_alive() {
            return HealthChange::Ignored;
        }
        let health = self.health.heal(amount);
        self.events
            .cue(EffectCue::SetHealthBarOpacity(self.health.bar_opacity()));
        HealthChange::Changed { health }
    }

    fn start_blink(&mut self, secs: f32) {
        self.timers.blink.start(secs, self.world.fixed_delta);
        self.events.cue(EffectCue::SetBlink(true));
    }

    /// Records an opponent volume entering this combatant.
    pub const fn enter_contact(&mut self) {
        self.contact_count = self.contact_count.saturating_add(1);
    }

    /// Records an opponent volume leaving this combatant.
    pub const fn exit_contact(&mut self) {
        self.contact_count = self.contact_count.saturating_sub(1);
    }

    /// Resolves an opponent's volume touching this combatant.
    ///
    /// Only the first volume of a contact counts: while another opponent
    /// volume is already inside, the hit is suppressed. Callers report the
    /// hit before [`Self::enter_contact`] for the same volume.
    pub fn body_part_hit(
        &mut self,
        opponent: &Opponent,
        query: &dyn HitboxQuery,
        clock: &mut SimulationClock,
    ) -> HitOutcome {
        if !self.is_alive() || opponent.player == self.player {
            return HitOutcome::Ignored;
        }
        if self.contact_count != 0 {
            return HitOutcome::Suppressed;
        }

        let cast = ContactResolver::probe(
            self.player,
            self.body.position(),
            self.body.scale(),
            opponent.position,
        );
        let Some(part) = ContactResolver::classify(query, &cast) else {
            return HitOutcome::Missed;
        };

        let dt = self.world.fixed_delta;
        let away = (self.body.position() - opponent.position).normalize_or_zero();
        self.body.add_force(away * KNOCKBACK_IMPULSE / dt);

        self.last_toucher = Some(opponent.player);
        self.timers.last_toucher.start(LAST_TOUCHER_HOLD_SECS, dt);

        if self.invulnerable {
            debug!("{} shielded a {part:?} hit from {}", self.player, opponent.player);
            return HitOutcome::Shielded { part };
        }

        let damage = ContactResolver::damage(part, self.drive.high_speed(), opponent.high_speed);
        if damage == 0 {
            return HitOutcome::Deflected { part };
        }

        debug!(
            "{} took {damage} damage on {part:?} from {}",
            self.player, opponent.player
        );
        self.invulnerable = true;
        self.timers.invulnerability.start(INVULNERABILITY_SECS, dt);
        clock.request_hitstop(HITSTOP_SECS);
        let change = self.hurt(f32::from(damage));
        HitOutcome::Damaged {
            part,
            damage,
            change,
        }
    }

    /// Snapshot of this combatant as seen by the one it touches.
    #[must_use]
    pub fn opponent(&self) -> Opponent {
        Opponent {
            player: self.player,
            position: self.body.position(),
            high_speed: self.drive.high_speed(),
        }
    }

    /// Current core and drill-tip volumes.
    #[must_use]
    pub fn hitboxes(&self) -> [Hitbox; 2] {
        drill_hitboxes(
            self.player,
            self.body.position(),
            self.body.forward(),
            self.body.scale(),
        )
    }

    /// Adds an external force to the body, dropped while frozen.
    pub fn add_force(&mut self, force: Vec2) {
        self.body.add_force(force);
    }

    /// Overrides the remaining lives.
    pub const fn set_lives(&mut self, lives: u32) {
        self.lives_left = lives;
    }

    /// Moves the spawn point used by the next reset.
    pub const fn set_spawn_position(&mut self, spawn: Vec2) {
        self.spawn_position = spawn;
    }

    /// Queued events, oldest first, without draining them.
    #[must_use]
    pub fn events(&self) -> &[CombatantEvent] {
        self.events.as_slice()
    }

    /// Removes and yields every queued event, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CombatantEvent> {
        self.events.drain()
    }

    /// Slot this combatant is bound to.
    #[must_use]
    pub const fn player(&self) -> PlayerIndex {
        self.player
    }

    /// Health left in the current life.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health.current()
    }

    /// Health restored by a reset.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.health.max()
    }

    /// Lives not yet lost.
    #[must_use]
    pub const fn lives_left(&self) -> u32 {
        self.lives_left
    }

    /// Whether the drill is ramming along its tip at speed.
    #[must_use]
    pub const fn high_speed(&self) -> bool {
        self.drive.high_speed()
    }

    /// Total body velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    /// Body angular momentum from the last tick.
    #[must_use]
    pub const fn angular_momentum(&self) -> f32 {
        self.body.angular_momentum()
    }

    /// Body position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Body heading in degrees.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.body.heading()
    }

    /// Surface state recorded by the last tick.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.body.surface()
    }

    /// Seconds spent underground since the last surface break.
    #[must_use]
    pub const fn underground_time(&self) -> f32 {
        self.drive.underground_time()
    }

    /// Current `(turn, accelerate)` inputs.
    #[must_use]
    pub const fn inputs(&self) -> (f32, f32) {
        (self.drive.turn_input(), self.drive.accel_input())
    }

    /// Whether damage is currently ignored.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Whether the blink countdown is running.
    #[must_use]
    pub const fn is_blinking(&self) -> bool {
        self.timers.blink.is_running()
    }

    /// Opponent volumes currently inside this combatant.
    #[must_use]
    pub const fn contact_count(&self) -> u32 {
        self.contact_count
    }

    /// Opponent credited for a touch within the hold window.
    #[must_use]
    pub const fn last_toucher(&self) -> Option<PlayerIndex> {
        self.last_toucher
    }

    /// Current life state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// `true` while the combatant takes part in the simulation.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present
    }

    /// Whether the current life has been lost.
    #[must_use]
    pub const fn is_eliminated(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Eliminated)
    }

    /// Present and not eliminated.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.present && matches!(self.lifecycle, Lifecycle::Active)
    }

    /// Whether the body is frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.body.is_frozen()
    }

    /// Point the next reset returns to.
    #[must_use]
    pub const fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    /// The embedded physics body.
    #[must_use]
    pub const fn body(&self) -> &PhysicsBody {
        &self.body
    }

    /// Direct access to the body for external forces and teleports.
    pub const fn body_mut(&mut self) -> &mut PhysicsBody {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hitbox::{CastHit, MockHitboxQuery};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    const ME: PlayerIndex = PlayerIndex(0);
    const THEM: PlayerIndex = PlayerIndex(1);

    #[fixture]
    fn combatant() -> Combatant {
        Combatant::builder()
            .player(ME)
            .spawn(Vec2::new(0.0, 5.0))
            .build()
            .expect("valid combatant")
    }

    #[fixture]
    fn clock() -> SimulationClock {
        SimulationClock::new(0.02)
    }

    fn striking(part: HitPart) -> MockHitboxQuery {
        let mut query = MockHitboxQuery::new();
        query.expect_circle_cast().return_const(vec![CastHit {
            owner: ME,
            part,
            distance: 0.1,
        }]);
        query
    }

    fn opponent(high_speed: bool) -> Opponent {
        Opponent {
            player: THEM,
            position: Vec2::new(1.0, 5.0),
            high_speed,
        }
    }

    fn run_ticks(combatant: &mut Combatant, ticks: usize) {
        for _ in 0..ticks {
            combatant.fixed_update();
        }
    }

    #[rstest]
    fn builder_requires_player() {
        let err = Combatant::builder().build().expect_err("no player");
        assert!(matches!(err, ConfigError::MissingPlayerIndex));
    }

    #[rstest]
    fn built_combatant_is_frozen_at_full_health(combatant: Combatant) {
        assert!(combatant.is_frozen());
        assert!(combatant.is_present());
        assert_relative_eq!(combatant.health(), 4.0);
        assert_eq!(combatant.lives_left(), DEFAULT_LIVES);
        assert!(combatant.events().is_empty());
    }

    #[rstest]
    fn player_index_displays_slot() {
        assert_eq!(PlayerIndex(2).to_string(), "P2");
        assert_eq!(PlayerIndex::from(3).into_inner(), 3);
    }

    #[rstest]
    fn core_hit_hurts_and_grants_invulnerability(
        mut combatant: Combatant,
        mut clock: SimulationClock,
    ) {
        let outcome = combatant.body_part_hit(&opponent(false), &striking(HitPart::Core), &mut clock);
        assert!(matches!(
            outcome,
            HitOutcome::Damaged {
                part: HitPart::Core,
                damage: 1,
                ..
            }
        ));
        assert_relative_eq!(combatant.health(), 3.0);
        assert!(combatant.is_invulnerable());
        assert!(clock.is_hitstopped());
        assert_eq!(combatant.last_toucher(), Some(THEM));
    }

    #[rstest]
    fn invulnerable_combatant_only_takes_knockback(
        mut combatant: Combatant,
        mut clock: SimulationClock,
    ) {
        combatant.unfreeze();
        combatant.body_part_hit(&opponent(false), &striking(HitPart::Core), &mut clock);
        let outcome = combatant.body_part_hit(&opponent(true), &striking(HitPart::Core), &mut clock);
        assert_eq!(outcome, HitOutcome::Shielded { part: HitPart::Core });
        assert_relative_eq!(combatant.health(), 3.0);
        assert!(combatant.body().pending_force().x < 0.0);
    }

    #[rstest]
    fn contact_in_progress_suppresses_hit(mut combatant: Combatant, mut clock: SimulationClock) {
        combatant.enter_contact();
        let query = MockHitboxQuery::new();
        let outcome = combatant.body_part_hit(&opponent(true), &query, &mut clock);
        assert_eq!(outcome, HitOutcome::Suppressed);
        assert_relative_eq!(combatant.health(), 4.0);
        combatant.exit_contact();
        combatant.exit_contact();
        assert_eq!(combatant.contact_count(), 0);
    }

    #[rstest]
    fn invulnerability_and_blink_expire(mut combatant: Combatant, mut clock: SimulationClock) {
        combatant.body_part_hit(&opponent(false), &striking(HitPart::Core), &mut clock);
        assert!(combatant.is_blinking());
        run_ticks(&mut combatant, 49);
        assert!(combatant.is_invulnerable());
        assert_eq!(combatant.last_toucher(), Some(THEM));
        run_ticks(&mut combatant, 1);
        assert!(!combatant.is_invulnerable());
        assert!(!combatant.is_blinking());
        assert_eq!(combatant.last_toucher(), None);
    }

    #[rstest]
    fn last_hit_costs_a_life_and_deactivates(mut combatant: Combatant) {
        combatant.hurt(3.0);
        combatant.drain_events().for_each(drop);
        let change = combatant.hurt(5.0);
        assert_eq!(change, HealthChange::Eliminated { lives_left: 4 });
        assert_relative_eq!(combatant.health(), 0.0);
        assert_eq!(combatant.hurt(1.0), HealthChange::Ignored);

        let life_lost = combatant
            .events()
            .iter()
            .filter(|event| matches!(event, CombatantEvent::LifeLost { .. }))
            .count();
        assert_eq!(life_lost, 1);

        run_ticks(&mut combatant, 4);
        assert!(combatant.is_present());
        run_ticks(&mut combatant, 1);
        assert!(!combatant.is_present());
        assert!(combatant
            .events()
            .contains(&CombatantEvent::Deactivated { player: ME }));
    }

    #[rstest]
    #[case::negative(-1.0)]
    #[case::nan(f32::NAN)]
    #[case::infinite(f32::INFINITY)]
    fn invalid_amounts_are_rejected(mut combatant: Combatant, #[case] amount: f32) {
        assert_eq!(combatant.hurt(amount), HealthChange::Rejected);
        assert_eq!(combatant.heal(amount), HealthChange::Rejected);
        assert_relative_eq!(combatant.health(), 4.0);
    }

    #[rstest]
    fn heal_caps_at_max_and_updates_indicator(mut combatant: Combatant) {
        combatant.hurt(3.0);
        combatant.drain_events().for_each(drop);
        assert_eq!(combatant.heal(10.0), HealthChange::Changed { health: 4.0 });
        assert_eq!(
            combatant.events(),
            &[CombatantEvent::Effect(EffectCue::SetHealthBarOpacity(0.0))]
        );
    }

    #[rstest]
    fn reset_twice_matches_reset_once(mut combatant: Combatant, mut clock: SimulationClock) {
        combatant.unfreeze();
        combatant.turn(1.0);
        combatant.body_part_hit(&opponent(true), &striking(HitPart::Core), &mut clock);
        run_ticks(&mut combatant, 10);

        combatant.reset();
        combatant.drain_events().for_each(drop);
        let once = combatant.clone();
        combatant.reset();
        combatant.drain_events().for_each(drop);
        assert_eq!(combatant, once);
        assert!(combatant.is_frozen());
        assert_eq!(combatant.position(), Vec2::new(0.0, 5.0));
        assert_eq!(combatant.inputs(), (0.0, 0.0));
    }

    #[rstest]
    fn reset_leaves_a_moving_drill_frozen(mut combatant: Combatant) {
        combatant.unfreeze();
        combatant.accelerate(1.0);
        run_ticks(&mut combatant, 10);
        assert!(combatant.velocity() != Vec2::ZERO);

        combatant.reset();
        assert!(combatant.is_frozen());
        combatant.add_force(Vec2::new(50.0, 0.0));
        assert_eq!(combatant.body().pending_force(), Vec2::ZERO);
        run_ticks(&mut combatant, 5);
        assert_eq!(combatant.position(), Vec2::new(0.0, 5.0));
    }

    #[rstest]
    fn respawn_releases_after_countdown(mut combatant: Combatant) {
        combatant.hurt(4.0);
        run_ticks(&mut combatant, 5);
        assert!(!combatant.is_present());

        combatant.respawn();
        assert!(combatant.is_present());
        assert!(combatant.is_frozen());
        assert!(combatant.is_invulnerable());
        run_ticks(&mut combatant, 25);
        assert!(!combatant.is_frozen());
        assert!(combatant
            .events()
            .contains(&CombatantEvent::Released { player: ME }));
        run_ticks(&mut combatant, 25);
        assert!(!combatant.is_invulnerable());
    }
}
