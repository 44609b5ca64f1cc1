//! Runtime flight configuration loaded from `assets/flight.toml`.
//!
//! [`FlightConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_flight_config`] reads
//! `assets/flight.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `FlightConfig::default()`.

use crate::constants::*;
use crate::error::{
    require_damping, require_positive, require_unit_interval, GameError, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/flight.toml";

/// Runtime-tunable flight, collision and field configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub map_width: f32,
    pub map_height: f32,

    // ── Ship: Normal Regime ───────────────────────────────────────────────────
    pub max_speed: f32,
    pub reverse_speed_factor: f32,
    pub linear_acceleration: f32,
    pub reverse_acceleration_divisor: f32,
    pub angular_acceleration: f32,
    pub inertia_factor: f32,
    pub thrust_spin_damping: f32,

    // ── Ship: Super-Speed Regime ──────────────────────────────────────────────
    pub super_speed_acceleration: f32,

    // ── Collision Response ────────────────────────────────────────────────────
    pub asteroid_bounce_speed: f32,
    pub ship_recoil_speed: f32,
    pub asteroid_spin_range: i32,
    pub asteroid_restitution: f32,

    // ── Game State ────────────────────────────────────────────────────────────
    pub max_lives: i32,

    // ── Field Generation ──────────────────────────────────────────────────────
    pub asteroid_count: usize,
    pub station_count: usize,
    pub asteroid_spawn_overhang: f32,
    pub asteroid_drift_range: i32,
    pub station_spawn_margin: f32,
    /// Fixed seed for field layout and collision spin; `None` seeds from entropy.
    pub rng_seed: Option<u64>,

    // ── Collision Extents ─────────────────────────────────────────────────────
    pub ship_collider_size: f32,
    pub asteroid_collider_size: f32,
    pub station_collider_size: f32,

    // ── Presentation ──────────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub hit_cue_duration: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            // World Bounds
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            // Normal regime
            max_speed: MAX_SPEED,
            reverse_speed_factor: REVERSE_SPEED_FACTOR,
            linear_acceleration: LINEAR_ACCELERATION,
            reverse_acceleration_divisor: REVERSE_ACCELERATION_DIVISOR,
            angular_acceleration: ANGULAR_ACCELERATION,
            inertia_factor: INERTIA_FACTOR,
            thrust_spin_damping: THRUST_SPIN_DAMPING,
            // Super-speed regime
            super_speed_acceleration: SUPER_SPEED_ACCELERATION,
            // Collision response
            asteroid_bounce_speed: ASTEROID_BOUNCE_SPEED,
            ship_recoil_speed: SHIP_RECOIL_SPEED,
            asteroid_spin_range: ASTEROID_SPIN_RANGE,
            asteroid_restitution: ASTEROID_RESTITUTION,
            // Game state
            max_lives: MAX_LIVES,
            // Field
            asteroid_count: ASTEROID_COUNT,
            station_count: STATION_COUNT,
            asteroid_spawn_overhang: ASTEROID_SPAWN_OVERHANG,
            asteroid_drift_range: ASTEROID_DRIFT_RANGE,
            station_spawn_margin: STATION_SPAWN_MARGIN,
            rng_seed: None,
            // Extents
            ship_collider_size: SHIP_COLLIDER_SIZE,
            asteroid_collider_size: ASTEROID_COLLIDER_SIZE,
            station_collider_size: STATION_COLLIDER_SIZE,
            // Presentation
            hud_font_size: HUD_FONT_SIZE,
            hit_cue_duration: HIT_CUE_DURATION,
        }
    }
}

impl FlightConfig {
    /// Speed cap applied while reverse thrust is held.
    #[inline]
    pub fn max_reverse_speed(&self) -> f32 {
        self.max_speed * self.reverse_speed_factor
    }

    /// Per-tick reverse thrust magnitude.
    #[inline]
    pub fn reverse_acceleration(&self) -> f32 {
        self.linear_acceleration / self.reverse_acceleration_divisor
    }

    /// Parse a TOML document; keys not present keep their defaults.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: FlightConfig =
            toml::from_str(contents).map_err(|e| GameError::ConfigParse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the flight model divide by zero,
    /// never terminate a run, or leave an empty or non-finite spawn range.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("map_width", self.map_width)?;
        require_positive("map_height", self.map_height)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("reverse_speed_factor", self.reverse_speed_factor)?;
        require_positive("linear_acceleration", self.linear_acceleration)?;
        require_positive(
            "reverse_acceleration_divisor",
            self.reverse_acceleration_divisor,
        )?;
        require_positive("angular_acceleration", self.angular_acceleration)?;
        require_damping("inertia_factor", self.inertia_factor)?;
        require_damping("thrust_spin_damping", self.thrust_spin_damping)?;
        require_positive("super_speed_acceleration", self.super_speed_acceleration)?;
        require_positive("ship_collider_size", self.ship_collider_size)?;
        require_positive("asteroid_collider_size", self.asteroid_collider_size)?;
        require_positive("station_collider_size", self.station_collider_size)?;
        require_positive("hud_font_size", self.hud_font_size)?;
        require_positive("hit_cue_duration", self.hit_cue_duration)?;
        require_unit_interval("asteroid_restitution", self.asteroid_restitution)?;

        if self.max_lives < 1 {
            return Err(GameError::UnsafeConstant {
                name: "max_lives",
                value: self.max_lives as f32,
                safe_range: "[1, ∞)",
            });
        }
        if self.station_count < 1 {
            return Err(GameError::UnsafeConstant {
                name: "station_count",
                value: self.station_count as f32,
                safe_range: "[1, ∞)",
            });
        }
        let shortest_side = self.map_width.min(self.map_height);
        let margin = self.station_spawn_margin;
        if !(margin.is_finite() && margin >= 0.0 && margin * 2.0 < shortest_side) {
            return Err(GameError::UnsafeConstant {
                name: "station_spawn_margin",
                value: self.station_spawn_margin,
                safe_range: "[0, min(map_width, map_height) / 2)",
            });
        }
        let overhang = self.asteroid_spawn_overhang;
        if !(overhang.is_finite() && overhang * 2.0 >= -shortest_side) {
            return Err(GameError::UnsafeConstant {
                name: "asteroid_spawn_overhang",
                value: overhang,
                safe_range: "[-min(map_width, map_height) / 2, ∞)",
            });
        }
        if self.asteroid_spin_range < 0 || self.asteroid_drift_range < 0 {
            return Err(GameError::UnsafeConstant {
                name: "asteroid_spin_range / asteroid_drift_range",
                value: self.asteroid_spin_range.min(self.asteroid_drift_range) as f32,
                safe_range: "[0, ∞)",
            });
        }
        Ok(())
    }
}

/// Startup system: attempt to load `assets/flight.toml` and overwrite the
/// `FlightConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged but do not abort the game; a
/// missing file is not an error.
pub fn load_flight_config(mut config: ResMut<FlightConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match FlightConfig::from_toml_str(CONFIG_PATH, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded flight config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using compiled defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
