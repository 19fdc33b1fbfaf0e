//! Error types surfaced by configuration and arena lookups.
//!
//! Gameplay calls never fail: suppressed or invalid actions are logged and
//! reported through return values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::PlayerIndex;

/// Problems detected while building the arena or one of its combatants.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A combatant was built without its player slot assigned.
    #[error("combatant has no player index; assign one before activation")]
    MissingPlayerIndex,
    /// A numeric setting must be finite and strictly positive.
    #[error("`{field}` must be finite and positive, got {value}")]
    NonPositive {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A numeric setting must be finite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A numeric setting must be finite and not negative.
    #[error("`{field}` must be finite and not negative, got {value}")]
    Negative {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The requested number of drills does not fit the arena.
    #[error("player count {count} is outside 1..={max}")]
    PlayerCount {
        /// Requested player count.
        count: usize,
        /// Largest supported player count.
        max: usize,
    },
    /// The steering speed bounds are the wrong way round.
    #[error("turn bounds are inverted: lower {lower} exceeds upper {upper}")]
    TurnBounds {
        /// Squared speed of full steering authority.
        lower: f32,
        /// Squared speed of minimum steering authority.
        upper: f32,
    },
    /// Underground drag would overshoot zero within a single tick.
    #[error("ground viscosity {viscosity} times tick {fixed_delta} exceeds 1")]
    DragOvershoot {
        /// Configured drag coefficient.
        viscosity: f32,
        /// Configured tick length in seconds.
        fixed_delta: f32,
    },
    /// The config document is not valid JSON for [`crate::ArenaConfig`].
    #[error("failed to parse arena config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The config file could not be read.
    #[error("failed to read arena config {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Failures of arena-level lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// No drill was created for the slot.
    #[error("no combatant occupies player slot {0}")]
    UnknownPlayer(PlayerIndex),
    /// A drill was asked to hit its own body.
    #[error("player {0} cannot strike itself")]
    SelfContact(PlayerIndex),
}
