//! Fixed-tick simulation clock with time scaling and hitstop.
//!
//! Real elapsed time is scaled and accumulated; every whole `fixed_delta`
//! of scaled time becomes one due tick. Hitstop requests pause scaled time
//! for a span of real time. Overlapping requests share one pause that ends
//! when the longest hold expires, so the pause and the resume each happen
//! once no matter how many hits land together.

use log::debug;

use crate::constants::MAX_CATCH_UP_TICKS;

/// Converts real frame time into a count of due fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    fixed_delta: f32,
    base_scale: f32,
    /// Remaining real seconds of each outstanding hitstop request.
    hitstop_holds: Vec<f32>,
    accumulator: f32,
    tick: u64,
}

impl SimulationClock {
    /// Creates a running clock with a time scale of one.
    #[must_use]
    pub const fn new(fixed_delta: f32) -> Self {
        Self {
            fixed_delta,
            base_scale: 1.0,
            hitstop_holds: Vec::new(),
            accumulator: 0.0,
            tick: 0,
        }
    }

    /// Length of one fixed tick in seconds.
    #[must_use]
    pub const fn fixed_delta(&self) -> f32 {
        self.fixed_delta
    }

    /// Number of fixed ticks elapsed since creation.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Effective scale applied to real time this frame.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        if self.is_hitstopped() {
            0.0
        } else {
            self.base_scale
        }
    }

    /// Whether a hitstop hold is still outstanding.
    #[must_use]
    pub fn is_hitstopped(&self) -> bool {
        !self.hitstop_holds.is_empty()
    }

    /// Sets the scale used outside hitstop. Zero pauses the game; values
    /// below one give slow motion. Negative or non-finite values clamp to 0.
    pub fn set_base_scale(&mut self, scale: f32) {
        self.base_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    /// Scale used outside hitstop.
    #[must_use]
    pub const fn base_scale(&self) -> f32 {
        self.base_scale
    }

    /// Pauses scaled time for `real_secs` of real time.
    pub fn request_hitstop(&mut self, real_secs: f32) {
        if !real_secs.is_finite() || real_secs <= 0.0 {
            return;
        }
        if self.hitstop_holds.is_empty() {
            debug!("hitstop engaged at tick {}", self.tick);
        }
        self.hitstop_holds.push(real_secs);
    }

    /// Advances by `real_dt` seconds of wall-clock time and returns how many
    /// fixed ticks are now due. The caller runs exactly that many steps.
    ///
    /// Hitstop holds count down in real time. The frame that releases the
    /// last hold still contributes no scaled time.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The due tick count is floored and capped before casting."
    )]
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        if !real_dt.is_finite() || real_dt <= 0.0 {
            return 0;
        }
        if self.is_hitstopped() {
            for hold in &mut self.hitstop_holds {
                *hold -= real_dt;
            }
            self.hitstop_holds.retain(|hold| *hold > 0.0);
            if self.hitstop_holds.is_empty() {
                debug!("hitstop released at tick {}", self.tick);
            }
            return 0;
        }

        self.accumulator += real_dt * self.base_scale;
        let whole = (self.accumulator / self.fixed_delta)
            .floor()
            .clamp(0.0, f32::from(u16::MAX));
        let due = (whole as u32).min(MAX_CATCH_UP_TICKS);
        self.accumulator -= due as f32 * self.fixed_delta;
        // Drop backlog beyond the catch-up cap instead of spiralling.
        self.accumulator = self.accumulator.min(self.fixed_delta);
        self.tick += u64::from(due);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> SimulationClock {
        SimulationClock::new(0.02)
    }

    #[rstest]
    fn accumulates_partial_frames(mut clock: SimulationClock) {
        assert_eq!(clock.advance(0.015), 0);
        assert_eq!(clock.advance(0.015), 1);
        assert_eq!(clock.advance(0.04), 2);
        assert_eq!(clock.tick(), 3);
    }

    #[rstest]
    fn zero_scale_pauses_ticks(mut clock: SimulationClock) {
        clock.set_base_scale(0.0);
        assert_eq!(clock.advance(1.0), 0);
        clock.set_base_scale(1.0);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[rstest]
    fn hitstop_pauses_until_expiry(mut clock: SimulationClock) {
        clock.request_hitstop(0.02);
        assert!(clock.is_hitstopped());
        assert!(clock.time_scale().abs() < f32::EPSILON);
        assert_eq!(clock.advance(0.01), 0);
        assert_eq!(clock.advance(0.015), 0);
        assert!(!clock.is_hitstopped());
        assert!((clock.time_scale() - 1.0).abs() < f32::EPSILON);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[rstest]
    fn overlapping_hitstops_resume_once_at_longest_hold(mut clock: SimulationClock) {
        clock.set_base_scale(0.5);
        clock.request_hitstop(0.02);
        clock.request_hitstop(0.05);
        clock.advance(0.03);
        assert!(clock.is_hitstopped(), "longer hold keeps time paused");
        clock.advance(0.03);
        assert!(!clock.is_hitstopped());
        assert!(
            (clock.time_scale() - 0.5).abs() < f32::EPSILON,
            "resume restores the base scale rather than forcing 1.0"
        );
    }

    #[rstest]
    fn catch_up_is_capped(mut clock: SimulationClock) {
        assert_eq!(clock.advance(10.0), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[rstest]
    #[case::negative(-1.0)]
    #[case::nan(f32::NAN)]
    fn invalid_hitstop_is_ignored(mut clock: SimulationClock, #[case] secs: f32) {
        clock.request_hitstop(secs);
        assert!(!clock.is_hitstopped());
    }
}
