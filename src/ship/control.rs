//! Ship input and movement systems.
//!
//! ## Pipeline (every frame)
//!
//! 1. [`keyboard_to_control_system`]: samples held keys into [`ControlInput`]
//!    and derives the toggle edges.  Always runs so edges stay accurate
//!    across pauses.
//! 2. [`pause_toggle_system`]: flips Running ⇄ Paused on a pause press.
//!    The only gameplay system that runs while paused.
//! 3. [`flight_control_system`]: super-speed toggle, flight controller and
//!    speed governor; writes the ship's `Velocity`.  Running only.
//! 4. Rapier step (integration).
//! 5. [`hold_steered_spin_system`]: drops any spin the contact solver added.
//! 6. [`ship_bounds_system`]: hard clamp into the map after writeback.
//!
//! Steps 1 to 3 only need `ButtonInput<KeyCode>` and plain components, so
//! they run headless under `MinimalPlugins`.

use super::{Ship, SteeredSpin};
use crate::config::FlightConfig;
use crate::flight::{steer, ControlInput, ControlKeys, FlightRegime};
use crate::frame::{BodyExtents, MapFrame};
use crate::game_state::GameTracker;
use crate::governor::{clamp_to_bounds, govern_speed, MapBounds};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Step 1: Keyboard → ControlInput ───────────────────────────────────────────

/// Translate the keyboard into [`ControlKeys`].
///
/// - **A** / **D** → steer left / right
/// - **W** / **S** → thrust forward / reverse
/// - **F** → toggle super speed
/// - **P** → toggle pause
pub fn keyboard_to_control_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<ControlInput>) {
    input.sample(ControlKeys {
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
        forward: keys.pressed(KeyCode::KeyW),
        backward: keys.pressed(KeyCode::KeyS),
        toggle_super_speed: keys.pressed(KeyCode::KeyF),
        toggle_pause: keys.pressed(KeyCode::KeyP),
    });
}

// ── Step 2: Pause ─────────────────────────────────────────────────────────────

/// P while Running → Paused; P while Paused → Running.  Ignored once the run is over.
pub fn pause_toggle_system(input: Res<ControlInput>, mut tracker: ResMut<GameTracker>) {
    if input.pause_pressed && !tracker.is_terminal() {
        let status = tracker.toggle_pause();
        info!("Simulation {:?}", status);
    }
}

// ── Step 3: Flight controller ─────────────────────────────────────────────────

/// Run the flight controller and speed governor on the ship.
///
/// Reads the ship's current world state, converts it into map space, lets
/// the core compute the next velocities, and writes them back as the Rapier
/// `Velocity`.  Position and rotation are left to the physics step.
pub fn flight_control_system(
    mut q: Query<
        (
            &Transform,
            &mut Velocity,
            &mut FlightRegime,
            &mut SteeredSpin,
            &BodyExtents,
        ),
        With<Ship>,
    >,
    input: Res<ControlInput>,
    config: Res<FlightConfig>,
    frame: Res<MapFrame>,
) {
    let Ok((transform, mut velocity, mut regime, mut spin, extents)) = q.single_mut() else {
        return;
    };

    if input.super_speed_pressed {
        *regime = regime.toggled();
        info!("Super speed {}", if regime.is_super_speed() { "on" } else { "off" });
    }

    let mut body = frame.body_from_world(transform, &velocity, extents.0);
    steer(&mut body, &input.keys, *regime, &config);
    govern_speed(&mut body, &input.keys, *regime, &config);
    *velocity = frame.velocity_to_world(&body);
    spin.0 = velocity.angvel;
}

// ── Step 5: Contact spin ──────────────────────────────────────────────────────

/// Put back the controller's spin after the physics step.
///
/// Collisions only replace the ship's linear velocity; off-centre contacts
/// must not leave it turning.
pub fn hold_steered_spin_system(mut q: Query<(&mut Velocity, &SteeredSpin), With<Ship>>) {
    let Ok((mut velocity, spin)) = q.single_mut() else {
        return;
    };
    if velocity.angvel != spin.0 {
        velocity.angvel = spin.0;
    }
}

// ── Step 6: Bounds ────────────────────────────────────────────────────────────

/// Clamp the ship back into the map after the physics step.
///
/// Only writes `Transform` / `Velocity` when the ship actually left the map,
/// so Rapier is not handed a teleport every frame.
pub fn ship_bounds_system(
    mut q: Query<(&mut Transform, &mut Velocity, &BodyExtents), With<Ship>>,
    config: Res<FlightConfig>,
    frame: Res<MapFrame>,
) {
    let Ok((mut transform, mut velocity, extents)) = q.single_mut() else {
        return;
    };
    let mut body = frame.body_from_world(&transform, &velocity, extents.0);
    if clamp_to_bounds(&mut body, &MapBounds::from_config(&config)) {
        frame.write_translation(&body, &mut transform);
        *velocity = frame.velocity_to_world(&body);
    }
}
