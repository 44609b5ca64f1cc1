//! Ship module: entity spawn, input handling, flight systems and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`control`] | Keyboard sampling into `ControlInput`, pause toggle, flight controller, bounds clamp |
//! | [`rendering`] | Ship mesh fill, nose gizmo, camera follow |
//!
//! All public items are re-exported at this level.

pub mod control;
pub mod rendering;

pub use control::{
    flight_control_system, hold_steered_spin_system, keyboard_to_control_system,
    pause_toggle_system, ship_bounds_system,
};
pub use rendering::{attach_ship_mesh_system, camera_follow_system, ship_gizmo_system};

use crate::config::FlightConfig;
use crate::flight::FlightRegime;
use crate::frame::{BodyExtents, MapFrame};
use crate::governor::MapBounds;
use crate::kinematics::KinematicBody;
use crate::simulation::{ASTEROID_GROUP, SHIP_GROUP, STATION_GROUP};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Marker component for the player ship entity.
#[derive(Component)]
pub struct Ship;

/// World-space angular velocity (rad/s) last commanded by the flight
/// controller.  Contact impulses never change it.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct SteeredSpin(pub f32);

/// Spawn the ship at rest in the map centre, nose up.
///
/// Collision groups:
/// - `SHIP_GROUP`: the ship belongs to this group
/// - collides with asteroids and stations
///
/// Damping and friction are zero: the flight controller owns every change
/// to the ship's velocity apart from contact impulses, and
/// [`hold_steered_spin_system`] strips any spin those impulses add.
pub fn spawn_ship(mut commands: Commands, config: Res<FlightConfig>, frame: Res<MapFrame>) {
    let body = KinematicBody::at(
        MapBounds::from_config(&config).center(),
        config.ship_collider_size,
    );
    let half = config.ship_collider_size * 0.5;

    commands.spawn((
        Ship,
        FlightRegime::Normal,
        SteeredSpin::default(),
        BodyExtents::square(config.ship_collider_size),
        // Physics
        RigidBody::Dynamic,
        Collider::cuboid(half, half),
        Velocity::zero(),
        Damping {
            linear_damping: 0.0,
            angular_damping: 0.0,
        },
        Friction::coefficient(0.0),
        Restitution::coefficient(0.0),
        CollisionGroups::new(SHIP_GROUP, ASTEROID_GROUP | STATION_GROUP),
        ActiveEvents::COLLISION_EVENTS,
        // Transform / visibility
        frame.transform_to_world(&body, 1.0),
        Visibility::default(),
    ));

    info!("Ship spawned at {:?}", body.position);
}
