//! Overlap tracking between drill hitboxes.
//!
//! Every overlapping pair of volumes is seen from both sides: each drill is
//! told which of its parts touched which part of the other drill. The
//! tracker diffs those directed contacts between ticks and reports the ones
//! that began or ended.

use hashbrown::HashSet;

use crate::combatant::PlayerIndex;
use crate::hitbox::{HitPart, Hitbox};

/// One drill's part touching an opponent's part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Contact {
    /// Drill receiving the contact.
    pub struck: PlayerIndex,
    /// Part of the receiving drill that was touched.
    pub struck_part: HitPart,
    /// Drill whose volume entered.
    pub striker: PlayerIndex,
    /// Part of the entering drill that made the touch.
    pub striker_part: HitPart,
}

/// Change in the set of directed contacts between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// The contact began this tick.
    Enter(Contact),
    /// The contact ended this tick.
    Exit(Contact),
}

/// Remembers last tick's contacts so only changes are reported.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: HashSet<Contact>,
}

impl ContactTracker {
    /// Replaces the tracked overlaps with `pairs` and returns the changes.
    ///
    /// Exits come first, then enters; each group is sorted so the result is
    /// independent of hash order.
    pub fn update(&mut self, pairs: &[(Hitbox, Hitbox)]) -> Vec<ContactEvent> {
        let mut current = HashSet::with_capacity(pairs.len() * 2);
        for (first, second) in pairs {
            current.insert(directed(first, second));
            current.insert(directed(second, first));
        }

        let mut exits: Vec<Contact> = self.active.difference(&current).copied().collect();
        let mut enters: Vec<Contact> = current.difference(&self.active).copied().collect();
        exits.sort_unstable();
        enters.sort_unstable();
        self.active = current;

        exits
            .into_iter()
            .map(ContactEvent::Exit)
            .chain(enters.into_iter().map(ContactEvent::Enter))
            .collect()
    }

    /// Forgets every tracked contact without reporting exits.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Number of directed contacts currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no contact is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

fn directed(struck: &Hitbox, striker: &Hitbox) -> Contact {
    Contact {
        struck: struck.owner,
        struck_part: struck.part,
        striker: striker.owner,
        striker_part: striker.part,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rstest::rstest;

    fn hitbox(owner: u8, part: HitPart) -> Hitbox {
        Hitbox {
            owner: PlayerIndex(owner),
            part,
            center: Vec2::ZERO,
            radius: 1.0,
        }
    }

    #[rstest]
    fn new_overlap_enters_from_both_sides() {
        let mut tracker = ContactTracker::default();
        let events = tracker.update(&[(hitbox(0, HitPart::Peripheral), hitbox(1, HitPart::Core))]);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| matches!(event, ContactEvent::Enter(_))));
        assert_eq!(tracker.len(), 2);
    }

    #[rstest]
    fn persisting_overlap_reports_nothing() {
        let mut tracker = ContactTracker::default();
        let pairs = [(hitbox(0, HitPart::Core), hitbox(1, HitPart::Core))];
        tracker.update(&pairs);
        assert!(tracker.update(&pairs).is_empty());
    }

    #[rstest]
    fn ended_overlap_exits_before_new_enters() {
        let mut tracker = ContactTracker::default();
        tracker.update(&[(hitbox(0, HitPart::Core), hitbox(1, HitPart::Core))]);
        let events = tracker.update(&[(hitbox(0, HitPart::Peripheral), hitbox(1, HitPart::Core))]);
        assert_eq!(events.len(), 4);
        assert!(matches!(events.first(), Some(ContactEvent::Exit(_))));
        assert!(matches!(events.last(), Some(ContactEvent::Enter(_))));
    }

    #[rstest]
    fn clear_drops_contacts_silently() {
        let mut tracker = ContactTracker::default();
        tracker.update(&[(hitbox(0, HitPart::Core), hitbox(1, HitPart::Core))]);
        tracker.clear();
        assert!(tracker.is_empty());
        assert!(tracker.update(&[]).is_empty());
    }
}
