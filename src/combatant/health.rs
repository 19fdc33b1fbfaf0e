//! Health pool and damage indicator rules.

use crate::constants::HEALTH_BAR_REVEAL_FRACTION;

/// Result of a damage or heal request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthChange {
    /// The combatant is eliminated or out of the scene.
    Ignored,
    /// The amount was negative or not finite.
    Rejected,
    /// Health moved and the drill is still standing.
    Changed {
        /// Health after the change.
        health: f32,
    },
    /// Health reached zero and a life was lost.
    Eliminated {
        /// Lives remaining after this one was taken.
        lives_left: u32,
    },
}

/// Health clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// A full pool of `max` health.
    #[must_use]
    pub const fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Health left.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Health restored by [`Self::refill`].
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Restores the pool to its maximum.
    pub const fn refill(&mut self) {
        self.current = self.max;
    }

    /// Subtracts `amount`, never dropping below zero.
    pub fn damage(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount).max(0.0);
        self.current
    }

    /// Adds `amount`, never exceeding the maximum.
    pub fn heal(&mut self, amount: f32) -> f32 {
        self.current = (self.current + amount).min(self.max);
        self.current
    }

    /// Whether nothing is left.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Opacity of the damage indicator for the current pool.
    #[must_use]
    pub const fn bar_opacity(&self) -> f32 {
        health_bar_opacity(self.current, self.max)
    }
}

/// Opacity of the damage indicator for the given health.
///
/// The indicator stays hidden until at least half of the maximum is lost,
/// then shows the lost fraction.
///
/// # Examples
/// ```
/// use drill_arena::combatant::health_bar_opacity;
/// assert_eq!(health_bar_opacity(3.0, 4.0), 0.0);
/// assert_eq!(health_bar_opacity(2.0, 4.0), 0.5);
/// assert_eq!(health_bar_opacity(1.0, 4.0), 0.75);
/// ```
#[must_use]
pub const fn health_bar_opacity(current: f32, max: f32) -> f32 {
    let lost = (max - current) / max;
    if lost >= HEALTH_BAR_REVEAL_FRACTION {
        lost
    } else {
        0.0
    }
}

/// Returns `true` for amounts a damage or heal request may carry.
#[must_use]
pub fn is_valid_amount(amount: f32) -> bool {
    amount.is_finite() && amount >= 0.0
}
