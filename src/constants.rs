//! Simulation constants shared by the integrator and the drill controller.
//!
//! Tunable gameplay values live in [`crate::config`]; the values here are
//! fixed properties of the motion model and the combat rules.

/// Fixed simulation step in seconds.
pub const DEFAULT_FIXED_DELTA: f32 = 0.02;
/// Downward acceleration used when no config overrides it.
pub const DEFAULT_GRAVITY: f32 = 9.81;
/// Drag coefficient applied underground by default.
pub const DEFAULT_GROUND_VISCOSITY: f32 = 3.0;
/// Default drill mass.
pub const DEFAULT_MASS: f32 = 20.0;
/// Lives granted at the start of a round.
pub const DEFAULT_LIVES: u32 = 5;
/// Player slots filled when no config overrides it.
pub const DEFAULT_PLAYERS: usize = 2;
/// Upper bound on player slots in one arena.
pub const MAX_PLAYERS: usize = 4;

/// Bodies at or below `SURFACE_HEIGHT_FACTOR * scale.y` are underground.
pub const SURFACE_HEIGHT_FACTOR: f32 = 0.5;
/// Below this squared speed underground drag snaps extrinsic velocity to zero.
pub const DRAG_SNAP_SPEED_SQR: f32 = 0.0025;
/// Per-tick displacements shorter than this are discarded to stop jitter.
pub const MIN_DISPLACEMENT_SQR: f32 = 0.005 * 0.005;
/// Multiplier applied to every torque accumulated by a body.
pub const TORQUE_GAIN: f32 = 500.0;

/// Share of `speed` applied each tick as underground drive force.
pub const UNDERGROUND_DRIVE_FACTOR: f32 = 0.12;
/// Share of `speed` carried as intrinsic propulsion underground.
pub const UNDERGROUND_PROPULSION_FACTOR: f32 = 0.2;
/// Seconds underground before propulsion reaches full strength.
pub const PROPULSION_RAMP_SECS: f32 = 1.0;
/// Inputs with a smaller magnitude count as released.
pub const INPUT_DEADZONE: f32 = 0.01;

/// Velocity delta pushed onto a drill struck by an opponent.
pub const KNOCKBACK_IMPULSE: f32 = 5.0;
/// Velocity delta pushed onto a drill by a knockback pickup.
pub const PICKUP_KNOCKBACK_IMPULSE: f32 = 8.0;
/// Hit probe radius relative to the struck body's horizontal scale.
pub const HIT_PROBE_RADIUS_FACTOR: f32 = 0.4;
/// How far the hit probe travels towards the opponent.
pub const HIT_PROBE_DISTANCE: f32 = 0.5;

/// Damage immunity after a damaging hit or a respawn.
pub const INVULNERABILITY_SECS: f32 = 1.0;
/// Blink duration after a damaging hit.
pub const HIT_BLINK_SECS: f32 = 1.0;
/// Blink duration after a respawn.
pub const RESPAWN_BLINK_SECS: f32 = 0.5;
/// Time a respawned drill stays frozen.
pub const RESPAWN_COUNTDOWN_SECS: f32 = 0.5;
/// How long an opponent stays credited for a touch.
pub const LAST_TOUCHER_HOLD_SECS: f32 = 1.0;
/// Delay between losing a life and leaving the scene, so scoring can observe
/// the final state first.
pub const DEACTIVATION_DELAY_SECS: f32 = 0.1;
/// Real-time length of the global pause applied on a damaging hit.
pub const HITSTOP_SECS: f32 = 0.02;
/// The health bar stays hidden until this share of health is lost.
pub const HEALTH_BAR_REVEAL_FRACTION: f32 = 0.5;

/// Horizontal distance between neighbouring spawn points.
pub const SPAWN_SPACING: f32 = 2.5;
/// Centre of the spawn row.
pub const DEFAULT_SPAWN_X: f32 = 0.0;
/// Height of the spawn row, above the ground.
pub const DEFAULT_SPAWN_Y: f32 = 5.0;

/// Upper bound on fixed ticks run for a single `advance` call.
pub const MAX_CATCH_UP_TICKS: u32 = 16;

/// Cruise speed factor of a homing missile.
pub const DEFAULT_MISSILE_SPEED: f32 = 0.2;
/// Seconds between a missile picking a new target.
pub const MISSILE_RETARGET_SECS: f32 = 1.0;
/// A missile aims slightly past its target.
pub const MISSILE_DISTANCE_GAIN: f32 = 1.1;
/// Cap on the distance term of a missile's cruise velocity.
pub const MISSILE_MAX_REACH: f32 = 10.0;
