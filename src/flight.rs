//! Flight controller: maps held control keys onto the ship's next linear and
//! angular velocity under one of two regimes.
//!
//! ## Regimes
//!
//! | Regime       | Spin                              | Linear velocity                          |
//! |--------------|-----------------------------------|------------------------------------------|
//! | `Normal`     | ±accel while steering, else ×0.99 | +heading·accel / −heading·accel/100 / ×0.99 |
//! | `SuperSpeed` | forced to 0                       | set to heading·1000, ± axis·500 when steering |
//!
//! Speed caps are applied afterwards by [`crate::governor::govern_speed`].
//!
//! Key precedence is fixed: left is checked before right and forward before
//! backward, so holding both of a pair behaves as the first one only.

use crate::config::FlightConfig;
use crate::kinematics::KinematicBody;
use bevy::prelude::*;

/// Held state of every control key for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlKeys {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub toggle_super_speed: bool,
    pub toggle_pause: bool,
}

/// Remembers whether a key was down last tick so a toggle fires once per press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleLatch {
    was_down: bool,
}

impl ToggleLatch {
    /// Feed this tick's held state; returns `true` only on an up → down edge.
    pub fn pressed(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}

/// Per-tick control snapshot: held keys plus the edge-detected toggles.
///
/// Written once per tick by the input layer via [`ControlInput::sample`];
/// read by the pause toggle and the flight systems.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControlInput {
    pub keys: ControlKeys,
    /// Super-speed toggle key went down this tick.
    pub super_speed_pressed: bool,
    /// Pause toggle key went down this tick.
    pub pause_pressed: bool,
    super_speed_latch: ToggleLatch,
    pause_latch: ToggleLatch,
}

impl ControlInput {
    /// Record this tick's held keys and derive the toggle edges.
    pub fn sample(&mut self, keys: ControlKeys) {
        self.keys = keys;
        self.super_speed_pressed = self.super_speed_latch.pressed(keys.toggle_super_speed);
        self.pause_pressed = self.pause_latch.pressed(keys.toggle_pause);
    }
}

/// The two mutually exclusive control models.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightRegime {
    /// Inertial flight with spin, thrust and damping.
    #[default]
    Normal,
    /// Forced forward rush with no turning.
    SuperSpeed,
}

impl FlightRegime {
    /// The other regime.
    pub fn toggled(self) -> Self {
        match self {
            FlightRegime::Normal => FlightRegime::SuperSpeed,
            FlightRegime::SuperSpeed => FlightRegime::Normal,
        }
    }

    #[inline]
    pub fn is_super_speed(self) -> bool {
        self == FlightRegime::SuperSpeed
    }
}

/// Compute the ship's next `linvel` / `angvel` from held keys.
///
/// Only the velocities are written; position and rotation are left to the
/// integrator.
pub fn steer(body: &mut KinematicBody, keys: &ControlKeys, regime: FlightRegime, cfg: &FlightConfig) {
    match regime {
        FlightRegime::Normal => steer_normal(body, keys, cfg),
        FlightRegime::SuperSpeed => steer_super_speed(body, keys, cfg),
    }
}

fn steer_normal(body: &mut KinematicBody, keys: &ControlKeys, cfg: &FlightConfig) {
    if keys.left {
        body.angvel -= cfg.angular_acceleration;
    } else if keys.right {
        body.angvel += cfg.angular_acceleration;
    } else {
        body.angvel *= cfg.inertia_factor;
    }

    let heading = body.heading();
    if keys.forward {
        // Nose-down: clockwise spin bleeds off while thrusting.
        if body.angvel > 0.0 {
            body.angvel *= cfg.thrust_spin_damping;
        }
        body.linvel += heading * cfg.linear_acceleration;
    } else if keys.backward {
        if body.angvel > 0.0 {
            body.angvel *= cfg.thrust_spin_damping;
        }
        body.linvel -= heading * cfg.reverse_acceleration();
    } else {
        body.linvel *= cfg.inertia_factor;
    }
}

fn steer_super_speed(body: &mut KinematicBody, keys: &ControlKeys, cfg: &FlightConfig) {
    body.angvel = 0.0;
    body.linvel = body.heading() * cfg.super_speed_acceleration;

    let strafe = body.rotation_axis() * (cfg.super_speed_acceleration / 2.0);
    if keys.left {
        body.linvel -= strafe;
    } else if keys.right {
        body.linvel += strafe;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn cfg() -> FlightConfig {
        FlightConfig::default()
    }

    fn keys() -> ControlKeys {
        ControlKeys::default()
    }

    #[test]
    fn latch_fires_once_per_press() {
        let mut latch = ToggleLatch::default();
        assert!(latch.pressed(true));
        assert!(!latch.pressed(true));
        assert!(!latch.pressed(true));
        assert!(!latch.pressed(false));
        assert!(latch.pressed(true));
    }

    #[test]
    fn control_input_derives_independent_edges() {
        let mut input = ControlInput::default();
        input.sample(ControlKeys {
            toggle_pause: true,
            ..keys()
        });
        assert!(input.pause_pressed);
        assert!(!input.super_speed_pressed);

        input.sample(ControlKeys {
            toggle_pause: true,
            toggle_super_speed: true,
            ..keys()
        });
        assert!(!input.pause_pressed, "held pause key must not re-fire");
        assert!(input.super_speed_pressed);
    }

    #[test]
    fn steering_accumulates_without_cap() {
        let mut body = KinematicBody::default();
        let left = ControlKeys { left: true, ..keys() };
        for _ in 0..100 {
            steer(&mut body, &left, FlightRegime::Normal, &cfg());
        }
        assert!((body.angvel + 1000.0).abs() < 1e-3);
    }

    #[test]
    fn left_wins_over_right() {
        let mut body = KinematicBody::default();
        let both = ControlKeys {
            left: true,
            right: true,
            ..keys()
        };
        steer(&mut body, &both, FlightRegime::Normal, &cfg());
        assert_eq!(body.angvel, -10.0);
    }

    #[test]
    fn idle_spin_and_drift_decay() {
        let mut body = KinematicBody {
            angvel: 100.0,
            linvel: Vec2::new(100.0, 0.0),
            ..Default::default()
        };
        steer(&mut body, &keys(), FlightRegime::Normal, &cfg());
        assert!((body.angvel - 99.0).abs() < 1e-4);
        assert!((body.linvel.x - 99.0).abs() < 1e-4);
    }

    #[test]
    fn forward_thrust_adds_along_heading_and_damps_clockwise_spin() {
        let mut body = KinematicBody {
            angvel: 50.0,
            ..Default::default()
        };
        let fwd = ControlKeys {
            forward: true,
            ..keys()
        };
        steer(&mut body, &fwd, FlightRegime::Normal, &cfg());
        // 50 × 0.99 (not steering) × 0.8 (thrusting)
        assert!((body.angvel - 39.6).abs() < 1e-4);
        assert!(body.linvel.x.abs() < 1e-4);
        assert!((body.linvel.y + 50.0).abs() < 1e-4);
    }

    #[test]
    fn thrust_leaves_counter_clockwise_spin_alone() {
        let mut body = KinematicBody::default();
        let keys = ControlKeys {
            left: true,
            forward: true,
            ..keys()
        };
        steer(&mut body, &keys, FlightRegime::Normal, &cfg());
        assert_eq!(body.angvel, -10.0);
    }

    #[test]
    fn forward_wins_over_backward() {
        let mut body = KinematicBody::default();
        let both = ControlKeys {
            forward: true,
            backward: true,
            ..keys()
        };
        steer(&mut body, &both, FlightRegime::Normal, &cfg());
        assert!((body.linvel.y + 50.0).abs() < 1e-4);
    }

    /// Characterization: reverse thrust is 1/100th of forward thrust even
    /// though the reverse cap would allow 20 % of max speed.
    #[test]
    fn reverse_thrust_is_one_hundredth_of_forward() {
        let mut body = KinematicBody::default();
        let back = ControlKeys {
            backward: true,
            ..keys()
        };
        steer(&mut body, &back, FlightRegime::Normal, &cfg());
        assert!((body.linvel.y - 0.5).abs() < 1e-6);
        assert!(body.linvel.x.abs() < 1e-6);
    }

    #[test]
    fn super_speed_overwrites_velocity_and_kills_spin() {
        let mut body = KinematicBody {
            angvel: 250.0,
            linvel: Vec2::new(-300.0, 300.0),
            ..Default::default()
        };
        steer(&mut body, &keys(), FlightRegime::SuperSpeed, &cfg());
        assert_eq!(body.angvel, 0.0);
        assert!(body.linvel.x.abs() < 1e-3);
        assert!((body.linvel.y + 1000.0).abs() < 1e-3);
    }

    #[test]
    fn super_speed_strafes_along_rotation_axis() {
        let mut body = KinematicBody::default();
        let right = ControlKeys {
            right: true,
            ..keys()
        };
        steer(&mut body, &right, FlightRegime::SuperSpeed, &cfg());
        assert!((body.linvel.x - 500.0).abs() < 1e-3);
        assert!((body.linvel.y + 1000.0).abs() < 1e-3);

        let left = ControlKeys { left: true, ..keys() };
        steer(&mut body, &left, FlightRegime::SuperSpeed, &cfg());
        assert!((body.linvel.x + 500.0).abs() < 1e-3);
        assert_eq!(body.angvel, 0.0);
    }

    #[test]
    fn regime_toggle_round_trips() {
        let r = FlightRegime::default();
        assert!(!r.is_super_speed());
        assert!(r.toggled().is_super_speed());
        assert_eq!(r.toggled().toggled(), r);
    }
}
