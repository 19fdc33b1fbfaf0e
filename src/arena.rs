//! Fixed-tick scheduler for one arena.
//!
//! The arena owns the simulation clock, one combatant per player slot and
//! the broad phase that turns hitbox overlaps into contact calls. It does not
//! keep score or decide when a round ends; callers read the drained events
//! and respawn drills as their rules require.

use glam::Vec2;
use log::{debug, info};

use crate::broadphase::{Contact, ContactEvent, ContactTracker};
use crate::clock::SimulationClock;
use crate::combatant::{Combatant, HitOutcome, PlayerIndex};
use crate::config::ArenaConfig;
use crate::constants::{MAX_PLAYERS, SPAWN_SPACING};
use crate::error::{ArenaError, ConfigError};
use crate::events::CombatantEvent;
use crate::hitbox::HitboxWorld;
use crate::missile::Missile;
use crate::pickup::{Pickup, PickupEffect};

/// Spawn point of slot `index` in a row of `players` centred on `centre`.
///
/// # Examples
/// ```
/// use drill_arena::arena::spawn_point;
/// use glam::Vec2;
/// assert_eq!(spawn_point(Vec2::new(0.0, 5.0), 0, 2), Vec2::new(-1.25, 5.0));
/// assert_eq!(spawn_point(Vec2::new(0.0, 5.0), 1, 2), Vec2::new(1.25, 5.0));
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "Player counts are tiny and exactly representable."
)]
#[must_use]
pub fn spawn_point(centre: Vec2, index: usize, players: usize) -> Vec2 {
    let offset = SPAWN_SPACING * index as f32 - SPAWN_SPACING * 0.5 * (players as f32 - 1.0);
    centre + Vec2::new(offset, 0.0)
}

/// One round's worth of drills, pickups and missiles on a shared clock.
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    clock: SimulationClock,
    combatants: Vec<Combatant>,
    hitboxes: HitboxWorld,
    contacts: ContactTracker,
    pickups: Vec<Pickup>,
    missiles: Vec<Missile>,
    pickup_effects: Vec<PickupEffect>,
    paused_scale: Option<f32>,
}

impl Arena {
    /// Builds one frozen combatant per player slot on its spawn point.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = config.match_rules.players;
        let combatants = (0..players)
            .map(|index| {
                let slot = u8::try_from(index).map_err(|_| ConfigError::PlayerCount {
                    count: players,
                    max: MAX_PLAYERS,
                })?;
                Combatant::builder()
                    .player(PlayerIndex(slot))
                    .tuning(config.drill)
                    .world(config.world)
                    .spawn(spawn_point(config.match_rules.spawn, index, players))
                    .lives(config.match_rules.lives)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!("arena ready with {players} drills");
        Ok(Self {
            config,
            clock: SimulationClock::new(config.world.fixed_delta),
            combatants,
            hitboxes: HitboxWorld::default(),
            contacts: ContactTracker::default(),
            pickups: Vec::new(),
            missiles: Vec::new(),
            pickup_effects: Vec::new(),
            paused_scale: None,
        })
    }

    /// Restores every drill's lives and respawns them all.
    pub fn start_round(&mut self) {
        self.contacts.clear();
        for combatant in &mut self.combatants {
            combatant.set_lives(self.config.match_rules.lives);
            combatant.respawn();
        }
        info!("round started");
    }

    /// Runs as many fixed steps as `real_dt` seconds of wall-clock time make
    /// due, and returns that count.
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        let due = self.clock.advance(real_dt);
        for _ in 0..due {
            self.step();
        }
        due
    }

    /// Runs exactly one fixed step.
    pub fn step(&mut self) {
        for combatant in &mut self.combatants {
            combatant.fixed_update();
        }

        self.hitboxes.clear();
        for combatant in self.combatants.iter().filter(|c| c.is_present()) {
            self.hitboxes.extend(combatant.hitboxes());
        }

        let pairs = self.hitboxes.overlapping_pairs();
        for event in self.contacts.update(&pairs) {
            match event {
                ContactEvent::Enter(contact) => self.enter(contact),
                ContactEvent::Exit(contact) => {
                    if let Some(struck) = self.slot_mut(contact.struck) {
                        struck.exit_contact();
                    }
                }
            }
        }

        for pickup in &mut self.pickups {
            let effects = pickup.update(&mut self.combatants);
            self.pickup_effects.extend(effects);
        }

        let dt = self.config.world.fixed_delta;
        for missile in &mut self.missiles {
            let effects = missile.update(&mut self.combatants, dt);
            self.pickup_effects.extend(effects);
        }
    }

    fn enter(&mut self, contact: Contact) {
        let Some(opponent) = self.slot(contact.striker).map(Combatant::opponent) else {
            return;
        };
        let Some(struck) = self.combatants.get_mut(usize::from(contact.struck.0)) else {
            return;
        };
        let outcome = struck.body_part_hit(&opponent, &self.hitboxes, &mut self.clock);
        if !matches!(outcome, HitOutcome::Suppressed | HitOutcome::Ignored) {
            debug!(
                "{} {:?} touched {} {:?}: {outcome:?}",
                contact.striker, contact.striker_part, contact.struck, contact.struck_part
            );
        }
        struck.enter_contact();
    }

    /// Reports a contact between two drills as the broad phase would,
    /// counting the striker as inside the struck drill until
    /// [`Self::release_strike`].
    ///
    /// # Errors
    /// [`ArenaError::SelfContact`] when both sides are the same drill, or
    /// [`ArenaError::UnknownPlayer`] for an empty slot.
    pub fn strike(&mut self, struck: PlayerIndex, striker: PlayerIndex) -> Result<HitOutcome, ArenaError> {
        if struck == striker {
            return Err(ArenaError::SelfContact(struck));
        }
        let opponent = self.combatant(striker)?.opponent();
        let target = self
            .combatants
            .get_mut(usize::from(struck.0))
            .ok_or(ArenaError::UnknownPlayer(struck))?;
        let outcome = target.body_part_hit(&opponent, &self.hitboxes, &mut self.clock);
        target.enter_contact();
        Ok(outcome)
    }

    /// Ends a contact opened by [`Self::strike`].
    ///
    /// # Errors
    /// [`ArenaError::UnknownPlayer`] when no drill occupies `struck`.
    pub fn release_strike(&mut self, struck: PlayerIndex) -> Result<(), ArenaError> {
        self.combatant_mut(struck)?.exit_contact();
        Ok(())
    }

    fn slot(&self, player: PlayerIndex) -> Option<&Combatant> {
        self.combatants.get(usize::from(player.0))
    }

    fn slot_mut(&mut self, player: PlayerIndex) -> Option<&mut Combatant> {
        self.combatants.get_mut(usize::from(player.0))
    }

    /// The drill in slot `player`.
    ///
    /// # Errors
    /// [`ArenaError::UnknownPlayer`] when no drill occupies `player`.
    pub fn combatant(&self, player: PlayerIndex) -> Result<&Combatant, ArenaError> {
        self.slot(player).ok_or(ArenaError::UnknownPlayer(player))
    }

    /// Mutable access to the drill in slot `player`.
    ///
    /// # Errors
    /// [`ArenaError::UnknownPlayer`] when no drill occupies `player`.
    pub fn combatant_mut(&mut self, player: PlayerIndex) -> Result<&mut Combatant, ArenaError> {
        self.slot_mut(player).ok_or(ArenaError::UnknownPlayer(player))
    }

    /// Every drill, in slot order.
    #[must_use]
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Takes every queued event, tagged with the drill that raised it.
    pub fn drain_events(&mut self) -> Vec<(PlayerIndex, CombatantEvent)> {
        let mut drained = Vec::new();
        for combatant in &mut self.combatants {
            let player = combatant.player();
            drained.extend(combatant.drain_events().map(|event| (player, event)));
        }
        drained
    }

    /// Places a pickup in the arena and returns its slot.
    pub fn add_pickup(&mut self, pickup: Pickup) -> usize {
        self.pickups.push(pickup);
        self.pickups.len() - 1
    }

    /// Pickups placed in the arena.
    #[must_use]
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Launches a homing missile and returns its slot.
    pub fn add_missile(&mut self, missile: Missile) -> usize {
        self.missiles.push(missile);
        self.missiles.len() - 1
    }

    /// Missiles launched in the arena.
    #[must_use]
    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    /// Takes the effects of pickups and missiles triggered during past steps.
    pub fn drain_pickup_effects(&mut self) -> Vec<PickupEffect> {
        std::mem::take(&mut self.pickup_effects)
    }

    /// Applies `pickup` to one drill directly, regardless of overlap.
    ///
    /// # Errors
    /// [`ArenaError::UnknownPlayer`] when no drill occupies `player`.
    pub fn apply_pickup(
        &mut self,
        pickup: &mut Pickup,
        player: PlayerIndex,
    ) -> Result<Option<PickupEffect>, ArenaError> {
        let combatant = self.combatant_mut(player)?;
        Ok(pickup.apply(combatant))
    }

    /// The arena's simulation clock.
    #[must_use]
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Mutable access to the clock, for time scaling.
    pub const fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Stops scaled time until [`Self::resume`].
    pub fn pause(&mut self) {
        if self.paused_scale.is_none() {
            self.paused_scale = Some(self.clock.base_scale());
            self.clock.set_base_scale(0.0);
        }
    }

    /// Restores the time scale in effect before [`Self::pause`].
    pub fn resume(&mut self) {
        if let Some(scale) = self.paused_scale.take() {
            self.clock.set_base_scale(scale);
        }
    }

    /// Whether [`Self::pause`] is in effect.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused_scale.is_some()
    }

    /// Configuration the arena was built from.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }
}
