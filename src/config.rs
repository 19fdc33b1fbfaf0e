//! Arena configuration.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs to
//! name the values it overrides:
//!
//! ```
//! use drill_arena::config::ArenaConfig;
//! let config = ArenaConfig::from_json_str(r#"{ "match": { "players": 3 } }"#).unwrap();
//! assert_eq!(config.match_rules.players, 3);
//! assert!((config.world.gravity - 9.81).abs() < f32::EPSILON);
//! ```

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FIXED_DELTA, DEFAULT_GRAVITY, DEFAULT_GROUND_VISCOSITY, DEFAULT_LIVES, DEFAULT_MASS,
    DEFAULT_PLAYERS, DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y, MAX_PLAYERS,
};
use crate::error::ConfigError;

/// Environment constants read by every body on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Duration of one fixed tick in seconds.
    pub fixed_delta: f32,
    /// Downward acceleration applied to airborne bodies.
    pub gravity: f32,
    /// Drag coefficient applied to extrinsic velocity underground.
    pub ground_viscosity: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            gravity: DEFAULT_GRAVITY,
            ground_viscosity: DEFAULT_GROUND_VISCOSITY,
        }
    }
}

impl WorldSettings {
    /// Checks that the tick is positive, gravity is finite and underground
    /// drag can slow a body to rest without reversing it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] naming the first invalid field, or
    /// [`ConfigError::DragOvershoot`] when one tick of drag removes more
    /// than the whole velocity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.fixed_delta", self.fixed_delta)?;
        finite("world.gravity", self.gravity)?;
        non_negative("world.ground_viscosity", self.ground_viscosity)?;
        if self.ground_viscosity * self.fixed_delta > 1.0 {
            return Err(ConfigError::DragOvershoot {
                viscosity: self.ground_viscosity,
                fixed_delta: self.fixed_delta,
            });
        }
        Ok(())
    }
}

/// Per-drill handling and durability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillTuning {
    /// Base drilling speed underground.
    pub speed: f32,
    /// Steering torque per unit of turn input.
    pub turn_speed: f32,
    /// Squared speed at which steering authority bottoms out.
    pub turn_upper_bound_sqr: f32,
    /// Squared speed below which steering authority is full.
    pub turn_lower_bound_sqr: f32,
    /// Forward push while accelerating.
    pub acc: f32,
    /// Backward push while braking.
    pub brake: f32,
    /// Squared speed above which a reversing drill counts as high-speed.
    pub high_speed_threshold_sqr: f32,
    /// Health restored on every reset.
    pub max_health: f32,
    /// Inertia shared by linear and angular motion.
    pub mass: f32,
    /// Body scale; hitbox sizes and the surface line follow it.
    pub scale: Vec2,
}

impl Default for DrillTuning {
    fn default() -> Self {
        Self {
            speed: 2.0,
            turn_speed: 20.0,
            turn_upper_bound_sqr: 49.0,
            turn_lower_bound_sqr: 1.0,
            acc: 0.2,
            brake: 0.1,
            high_speed_threshold_sqr: 21.0,
            max_health: 4.0,
            mass: DEFAULT_MASS,
            scale: Vec2::ONE,
        }
    }
}

impl DrillTuning {
    /// Validates the tuning before a combatant is built from it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a value is non-finite, a strictly
    /// positive value is not, or the turn bounds are inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("drill.speed", self.speed)?;
        finite("drill.turn_speed", self.turn_speed)?;
        finite("drill.acc", self.acc)?;
        finite("drill.brake", self.brake)?;
        finite("drill.high_speed_threshold_sqr", self.high_speed_threshold_sqr)?;
        positive("drill.turn_upper_bound_sqr", self.turn_upper_bound_sqr)?;
        finite("drill.turn_lower_bound_sqr", self.turn_lower_bound_sqr)?;
        positive("drill.max_health", self.max_health)?;
        positive("drill.mass", self.mass)?;
        positive("drill.scale.x", self.scale.x)?;
        positive("drill.scale.y", self.scale.y)?;
        if self.turn_lower_bound_sqr > self.turn_upper_bound_sqr {
            return Err(ConfigError::TurnBounds {
                lower: self.turn_lower_bound_sqr,
                upper: self.turn_upper_bound_sqr,
            });
        }
        Ok(())
    }
}

/// Player slots, lives and spawn layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Number of drills in the round.
    pub players: usize,
    /// Lives granted to every drill at the start of a round.
    pub lives: u32,
    /// Centre of the spawn row.
    pub spawn: Vec2,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            lives: DEFAULT_LIVES,
            spawn: Vec2::new(DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y),
        }
    }
}

/// Complete arena configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Tick length and environment.
    pub world: WorldSettings,
    /// Tuning shared by every drill.
    pub drill: DrillTuning,
    /// Players, lives and spawn layout.
    #[serde(rename = "match")]
    pub match_rules: MatchRules,
}

impl ArenaConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and a validation
    /// error for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validates every section.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.drill.validate()?;
        let players = self.match_rules.players;
        if players == 0 || players > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                count: players,
                max: MAX_PLAYERS,
            });
        }
        finite("match.spawn.x", self.match_rules.spawn.x)?;
        finite("match.spawn.y", self.match_rules.spawn.y)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
