//! Circle hitboxes and the swept-circle volume query.
//!
//! Each drill carries two hitbox volumes: a core circle around the body and
//! a peripheral circle over the drill tip. [`HitboxWorld`] holds the current
//! volumes of every drill in the arena and answers [`HitboxQuery`] casts.

use glam::Vec2;

use crate::combatant::PlayerIndex;

/// Core circle radius relative to the drill's horizontal scale.
pub const CORE_RADIUS_FACTOR: f32 = 0.5;
/// Drill tip radius relative to the drill's horizontal scale.
pub const DRILL_RADIUS_FACTOR: f32 = 0.3;
/// Distance from body centre to drill tip centre, relative to vertical scale.
pub const DRILL_OFFSET_FACTOR: f32 = 0.6;

/// Which region of a drill a volume covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HitPart {
    /// The body. Hits here always hurt unless the drill is invulnerable.
    Core,
    /// Any other part, such as the drill tip.
    Peripheral,
}

/// A circular volume attached to one part of a drill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Drill carrying the volume.
    pub owner: PlayerIndex,
    /// Region the volume covers.
    pub part: HitPart,
    /// World-space centre.
    pub center: Vec2,
    /// World-space radius.
    pub radius: f32,
}

impl Hitbox {
    /// Returns `true` when the two circles strictly overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// Builds the core and drill-tip volumes for a drill pose.
///
/// `forward` is the body's local up axis; the tip sits along `-forward`.
#[must_use]
pub fn drill_hitboxes(owner: PlayerIndex, position: Vec2, forward: Vec2, scale: Vec2) -> [Hitbox; 2] {
    [
        Hitbox {
            owner,
            part: HitPart::Core,
            center: position,
            radius: CORE_RADIUS_FACTOR * scale.x,
        },
        Hitbox {
            owner,
            part: HitPart::Peripheral,
            center: position - forward * DRILL_OFFSET_FACTOR * scale.y,
            radius: DRILL_RADIUS_FACTOR * scale.x,
        },
    ]
}

/// A circle swept along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCast {
    /// Start of the sweep.
    pub origin: Vec2,
    /// Radius of the swept circle.
    pub radius: f32,
    /// Need not be normalised. A zero direction only reports volumes that
    /// already overlap the circle at `origin`.
    pub direction: Vec2,
    /// Longest travel that still counts as a hit.
    pub max_distance: f32,
    /// When set, only volumes owned by this player are reported.
    pub owner: Option<PlayerIndex>,
}

/// A volume touched by a [`CircleCast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    /// Drill carrying the touched volume.
    pub owner: PlayerIndex,
    /// Region the touched volume covers.
    pub part: HitPart,
    /// Travel along the cast before first contact; zero if overlapping at
    /// the origin.
    pub distance: f32,
}

/// Volume query primitive provided by the collision collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait HitboxQuery {
    /// Returns every hit along the cast, nearest first.
    fn circle_cast(&self, cast: &CircleCast) -> Vec<CastHit>;
}

/// Distance along `cast` at which it first touches `hitbox`, if within
/// range.
///
/// # Examples
/// ```
/// use drill_arena::hitbox::{sweep_circle, CircleCast, Hitbox, HitPart};
/// use drill_arena::PlayerIndex;
/// use glam::Vec2;
///
/// let target = Hitbox { owner: PlayerIndex(0), part: HitPart::Core, center: Vec2::new(2.0, 0.0), radius: 0.5 };
/// let cast = CircleCast { origin: Vec2::ZERO, radius: 0.5, direction: Vec2::X, max_distance: 5.0, owner: None };
/// let distance = sweep_circle(&cast, &target).unwrap();
/// assert!((distance - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn sweep_circle(cast: &CircleCast, hitbox: &Hitbox) -> Option<f32> {
    let reach = cast.radius + hitbox.radius;
    let offset = cast.origin - hitbox.center;
    let c = offset.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }
    let direction = cast.direction.try_normalize()?;
    let b = offset.dot(direction);
    if b >= 0.0 {
        // Moving away from the volume.
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let distance = -b - discriminant.sqrt();
    (distance <= cast.max_distance).then_some(distance)
}

/// Snapshot of every hitbox volume in the arena.
#[derive(Debug, Clone, Default)]
pub struct HitboxWorld {
    hitboxes: Vec<Hitbox>,
}

impl HitboxWorld {
    /// Removes every volume.
    pub fn clear(&mut self) {
        self.hitboxes.clear();
    }

    /// Adds one volume.
    pub fn insert(&mut self, hitbox: Hitbox) {
        self.hitboxes.push(hitbox);
    }

    /// Adds every volume yielded by `hitboxes`.
    pub fn extend<I>(&mut self, hitboxes: I)
    where
        I: IntoIterator<Item = Hitbox>,
    {
        self.hitboxes.extend(hitboxes);
    }

    /// Volumes in insertion order.
    #[must_use]
    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    /// Returns every pair of overlapping volumes owned by different drills.
    #[must_use]
    pub fn overlapping_pairs(&self) -> Vec<(Hitbox, Hitbox)> {
        let mut pairs = Vec::new();
        for (index, first) in self.hitboxes.iter().enumerate() {
            for second in self.hitboxes.iter().skip(index + 1) {
                if first.owner != second.owner && first.overlaps(second) {
                    pairs.push((*first, *second));
                }
            }
        }
        pairs
    }
}

impl HitboxQuery for HitboxWorld {
    fn circle_cast(&self, cast: &CircleCast) -> Vec<CastHit> {
        let mut hits: Vec<CastHit> = self
            .hitboxes
            .iter()
            .filter(|hitbox| cast.owner.map_or(true, |owner| owner == hitbox.owner))
            .filter_map(|hitbox| {
                sweep_circle(cast, hitbox).map(|distance| CastHit {
                    owner: hitbox.owner,
                    part: hitbox.part,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
