//! Conversion between map space and Bevy / Rapier world space.
//!
//! | Quantity         | Map space (core)            | World space (Bevy, Rapier)      |
//! |------------------|-----------------------------|---------------------------------|
//! | Position         | `(x, y)`, y down, `[0, H]`  | `(x, H − y)`, y up              |
//! | Rotation         | radians, clockwise positive | radians, counter-clockwise      |
//! | Linear velocity  | `(vx, vy)`                  | `(vx, −vy)`                     |
//! | Angular velocity | degrees/s, clockwise        | radians/s, counter-clockwise    |
//!
//! With this mapping the map-space heading `rotation − 90°` lands on the
//! entity's local +Y axis in world space, so ship meshes are authored nose-up.

use crate::config::FlightConfig;
use crate::kinematics::KinematicBody;
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

/// Half-width / half-height of an entity's collision box, in map units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyExtents(pub Vec2);

impl BodyExtents {
    /// Square box of full edge length `size`.
    pub fn square(size: f32) -> Self {
        Self(Vec2::splat(size * 0.5))
    }
}

/// Map height needed to flip y between the two spaces.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub height: f32,
}

impl MapFrame {
    pub fn from_config(cfg: &FlightConfig) -> Self {
        Self {
            height: cfg.map_height,
        }
    }

    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, self.height - p.y)
    }

    #[inline]
    pub fn to_map(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, self.height - p.y)
    }

    /// Read a core body out of Rapier-managed components.
    pub fn body_from_world(
        &self,
        transform: &Transform,
        velocity: &Velocity,
        half_extents: Vec2,
    ) -> KinematicBody {
        let world_angle = transform.rotation.to_euler(EulerRot::ZYX).0;
        KinematicBody {
            position: self.to_map(transform.translation.truncate()),
            rotation: -world_angle,
            linvel: Vec2::new(velocity.linvel.x, -velocity.linvel.y),
            angvel: -velocity.angvel.to_degrees(),
            half_extents,
        }
    }

    /// Rapier velocity equivalent of the body's velocities.
    pub fn velocity_to_world(&self, body: &KinematicBody) -> Velocity {
        Velocity {
            linvel: Vec2::new(body.linvel.x, -body.linvel.y),
            angvel: -body.angvel.to_radians(),
        }
    }

    /// World transform for a body at depth `z`.
    pub fn transform_to_world(&self, body: &KinematicBody, z: f32) -> Transform {
        Transform::from_translation(self.to_world(body.position).extend(z))
            .with_rotation(Quat::from_rotation_z(-body.rotation))
    }

    /// Overwrite only the translation (x, y) of `transform`, keeping depth and rotation.
    pub fn write_translation(&self, body: &KinematicBody, transform: &mut Transform) {
        let p = self.to_world(body.position);
        transform.translation.x = p.x;
        transform.translation.y = p.y;
    }
}
