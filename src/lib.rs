#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core for a local multiplayer drill arena.
//!
//! Drills fly through the air, burrow underground and ram each other. The
//! crate provides the fixed-tick physics body, the drill combatant built on
//! top of it, hit resolution, pickups and homing missiles. A small
//! [`Arena`] scheduler wires them together. Rendering, input devices and
//! scoring stay with the caller, which reads the drained
//! [`CombatantEvent`]s.
pub mod arena;
pub mod broadphase;
pub mod clock;
pub mod combatant;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod hitbox;
pub mod logging;
pub mod missile;
pub mod physics;
pub mod pickup;
pub mod timer;

pub use arena::Arena;
pub use clock::SimulationClock;
pub use combatant::{
    Combatant, CombatantBuilder, ContactResolver, HealthChange, HitOutcome, Opponent, PlayerIndex,
};
pub use config::{ArenaConfig, DrillTuning, MatchRules, WorldSettings};
pub use error::{ArenaError, ConfigError};
pub use events::{CombatantEvent, EffectCue};
pub use hitbox::{HitPart, HitboxQuery, HitboxWorld};
pub use logging::init as init_logging;
pub use missile::Missile;
pub use physics::{MovementPolicy, PhysicsBody, Surface};
pub use pickup::{Pickup, PickupEffect};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust
    //! use drill_arena::prelude::*;
    //!
    //! let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    //! arena.start_round();
    //! arena.advance(0.1);
    //! assert!(arena.combatant(PlayerIndex(0)).unwrap().is_present());
    //! ```
    pub use crate::arena::Arena;
    pub use crate::combatant::{Combatant, HealthChange, HitOutcome, PlayerIndex};
    pub use crate::config::ArenaConfig;
    pub use crate::events::{CombatantEvent, EffectCue};
    pub use glam::Vec2;
}
