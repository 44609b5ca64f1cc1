//! World bounds and speed governor.
//!
//! Runs after the flight controller has produced a candidate velocity:
//! [`govern_speed`] applies the regime-specific caps, and [`clamp_to_bounds`]
//! keeps the ship inside the map after integration.

use crate::config::FlightConfig;
use crate::flight::{ControlKeys, FlightRegime};
use crate::kinematics::KinematicBody;
use bevy::math::Vec2;

/// Axis-aligned map rectangle `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub width: f32,
    pub height: f32,
}

impl MapBounds {
    pub fn from_config(cfg: &FlightConfig) -> Self {
        Self {
            width: cfg.map_width,
            height: cfg.map_height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Apply the normal-regime speed caps.
///
/// The forward cap is only enforced while forward thrust is held, and the
/// reverse cap only while reverse thrust is held; a coasting ship keeps
/// whatever speed it has.  Super speed has no cap because its velocity is
/// recomputed from constants every tick.
pub fn govern_speed(
    body: &mut KinematicBody,
    keys: &ControlKeys,
    regime: FlightRegime,
    cfg: &FlightConfig,
) {
    if regime.is_super_speed() {
        return;
    }
    let speed = body.speed();
    if keys.forward && speed > cfg.max_speed {
        body.clamp_speed(cfg.max_speed);
    } else if keys.backward && speed > cfg.max_reverse_speed() {
        body.clamp_speed(cfg.max_reverse_speed());
    }
}

/// Hard-clamp `body.position` into the map.
///
/// At a clamped edge the velocity component pointing out of the map is
/// zeroed; the body stops against the edge and never bounces back.
/// Returns `true` if the position was changed.
pub fn clamp_to_bounds(body: &mut KinematicBody, bounds: &MapBounds) -> bool {
    let clamped = Vec2::new(
        body.position.x.clamp(0.0, bounds.width),
        body.position.y.clamp(0.0, bounds.height),
    );
    if clamped == body.position {
        return false;
    }
    if clamped.x != body.position.x {
        let outward = if clamped.x == 0.0 { body.linvel.x < 0.0 } else { body.linvel.x > 0.0 };
        if outward {
            body.linvel.x = 0.0;
        }
    }
    if clamped.y != body.position.y {
        let outward = if clamped.y == 0.0 { body.linvel.y < 0.0 } else { body.linvel.y > 0.0 };
        if outward {
            body.linvel.y = 0.0;
        }
    }
    body.position = clamped;
    true
}
