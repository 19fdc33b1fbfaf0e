//! Tick-counted countdowns for time-boxed state transitions.
//!
//! Durations are given in seconds and rounded to whole fixed ticks when the
//! countdown starts, so expiry never depends on accumulated float error.

/// Converts a duration in seconds into a whole number of fixed ticks.
///
/// Non-finite or non-positive inputs yield zero ticks.
///
/// # Examples
/// ```
/// use drill_arena::timer::secs_to_ticks;
/// assert_eq!(secs_to_ticks(1.0, 0.02), 50);
/// assert_eq!(secs_to_ticks(0.1, 0.02), 5);
/// assert_eq!(secs_to_ticks(-1.0, 0.02), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The tick count is clamped into the u32 domain before casting."
)]
#[must_use]
pub fn secs_to_ticks(secs: f32, fixed_delta: f32) -> u32 {
    if !secs.is_finite() || !fixed_delta.is_finite() || secs <= 0.0 || fixed_delta <= 0.0 {
        return 0;
    }
    let ticks = (secs / fixed_delta).round();
    ticks.clamp(0.0, u32::MAX as f32) as u32
}

/// A countdown that fires once when its remaining ticks reach zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// Starts (or restarts) the countdown for `secs` seconds.
    ///
    /// A zero-length countdown still fires on the next [`Self::tick`].
    pub fn start(&mut self, secs: f32, fixed_delta: f32) {
        self.remaining = secs_to_ticks(secs, fixed_delta);
        self.running = true;
    }

    /// Stops the countdown without firing.
    pub const fn cancel(&mut self) {
        self.remaining = 0;
        self.running = false;
    }

    /// Whether the countdown is started and has not fired yet.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks left before the countdown fires.
    #[must_use]
    pub const fn remaining_ticks(&self) -> u32 {
        self.remaining
    }

    /// Advances by one tick. Returns `true` exactly once, on the tick the
    /// countdown completes.
    pub const fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }
}
