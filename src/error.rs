//! Game-specific error types.
//!
//! The flight core itself has no failure paths; these errors cover the
//! ambient layer, mainly loading and validating `assets/flight.toml`.
//! Callers log them and fall back to compiled defaults rather than aborting.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The config file exists but is not valid TOML for [`crate::config::FlightConfig`].
    ConfigParse {
        /// Path that was read.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A tunable is outside the range the flight model can work with.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a damping multiplier in `(0.0, 1.0]`.
pub fn require_damping(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error unless `value` lies in `[0.0, 1.0]`.
pub fn require_unit_interval(name: &'static str, value: f32) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(require_positive("max_speed", 500.0).is_ok());
        assert!(require_positive("max_speed", 0.0).is_err());
        assert!(require_positive("max_speed", f32::NAN).is_err());
    }

    #[test]
    fn damping_check_accepts_one() {
        assert!(require_damping("inertia_factor", 1.0).is_ok());
        assert!(require_damping("inertia_factor", 0.99).is_ok());
        assert!(require_damping("inertia_factor", 1.01).is_err());
    }

    #[test]
    fn unit_interval_check_rejects_nan() {
        assert!(require_unit_interval("asteroid_restitution", 0.0).is_ok());
        assert!(require_unit_interval("asteroid_restitution", 1.0).is_ok());
        assert!(require_unit_interval("asteroid_restitution", f32::NAN).is_err());
    }

    #[test]
    fn display_names_the_key() {
        let err = require_positive("map_width", -1.0).unwrap_err();
        assert!(err.to_string().contains("map_width"));
    }
}
