//! Centralised flight, collision and world constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::FlightConfig`] mirrors every value
//! and uses these as its defaults; `assets/flight.toml` can override any subset.
//!
//! ## Units
//!
//! - Distances in map units (one unit = one pixel at zoom 1.0).
//! - Linear velocity in units/s; the per-tick accelerations below are added
//!   once per simulation tick, not scaled by `dt`.
//! - Angular velocity and angular acceleration in **degrees/s**.  Rotation
//!   itself is stored in radians.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Width of the playable map.  The ship is hard-clamped into `[0, MAP_WIDTH]`.
pub const MAP_WIDTH: f32 = 5000.0;

/// Height of the playable map.  The ship is hard-clamped into `[0, MAP_HEIGHT]`.
pub const MAP_HEIGHT: f32 = 5000.0;

// ── Ship: Normal Regime ───────────────────────────────────────────────────────

/// Forward speed cap, enforced only while forward thrust is held.
pub const MAX_SPEED: f32 = 500.0;

/// Fraction of [`MAX_SPEED`] allowed while reverse thrust is held.
pub const REVERSE_SPEED_FACTOR: f32 = 0.2;

/// Velocity added along the heading on every tick that forward thrust is held.
pub const LINEAR_ACCELERATION: f32 = 50.0;

/// Reverse thrust is `LINEAR_ACCELERATION / REVERSE_ACCELERATION_DIVISOR`.
///
/// At 100 the reverse push (0.5 u/s per tick) is far weaker than the reverse
/// cap allows; kept as the game has always played.
pub const REVERSE_ACCELERATION_DIVISOR: f32 = 100.0;

/// Spin (deg/s) added or removed per tick while a steer key is held.
/// There is no angular speed cap.
pub const ANGULAR_ACCELERATION: f32 = 10.0;

/// Per-tick multiplier applied to spin when not steering, and to linear
/// velocity when coasting.
pub const INERTIA_FACTOR: f32 = 0.99;

/// Per-tick multiplier applied to positive spin while thrusting.
pub const THRUST_SPIN_DAMPING: f32 = 0.8;

// ── Ship: Super-Speed Regime ──────────────────────────────────────────────────

/// Speed the ship is forced to along its heading every super-speed tick.
/// Steering adds half of this along the rotation axis.
pub const SUPER_SPEED_ACCELERATION: f32 = 1000.0;

// ── Collision Response ────────────────────────────────────────────────────────

/// Speed given to an asteroid struck by the ship, directed away from the ship.
pub const ASTEROID_BOUNCE_SPEED: f32 = 200.0;

/// Speed the ship recoils with after striking an asteroid.
pub const SHIP_RECOIL_SPEED: f32 = 50.0;

/// Spin (deg/s) assigned to a struck asteroid is drawn from `[-range, range]`.
pub const ASTEROID_SPIN_RANGE: i32 = 100;

/// Restitution used for asteroid–asteroid contacts.  1.0 = perfectly elastic.
pub const ASTEROID_RESTITUTION: f32 = 1.0;

// ── Game State ────────────────────────────────────────────────────────────────

/// Lives at the start of a run; a station visit restores this value.
pub const MAX_LIVES: i32 = 5;

// ── Field Generation ──────────────────────────────────────────────────────────

/// Number of asteroids spawned at scene start.
pub const ASTEROID_COUNT: usize = 300;

/// Number of refuel stations spawned at scene start.  Visiting all of them wins.
pub const STATION_COUNT: usize = 5;

/// Asteroids may spawn up to this far outside the map on every side.
pub const ASTEROID_SPAWN_OVERHANG: f32 = 100.0;

/// Initial asteroid velocity components are drawn from `[-range, range]`.
pub const ASTEROID_DRIFT_RANGE: i32 = 50;

/// Stations spawn at least this far inside the map edges.
pub const STATION_SPAWN_MARGIN: f32 = 100.0;

// ── Collision Extents (full width/height) ────────────────────────────────────

/// Ship collision box edge length.
pub const SHIP_COLLIDER_SIZE: f32 = 25.0;

/// Asteroid collision box edge length.
pub const ASTEROID_COLLIDER_SIZE: f32 = 30.0;

/// Station collision box edge length.
pub const STATION_COLLIDER_SIZE: f32 = 100.0;

// ── Presentation ──────────────────────────────────────────────────────────────

/// Font size of the HUD lines in the top-left corner.
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Seconds the one-shot asteroid hit cue stays on screen.
pub const HIT_CUE_DURATION: f32 = 0.5;
