//! Generic 2D rigid-body kinematics used by the ship, asteroids and stations.
//!
//! All values are in **map space**: x grows to the right, y grows downward,
//! rotation is in radians with 0 meaning "sprite nose points up" and positive
//! values turning clockwise on screen.  Angular velocity is stored in
//! degrees/s.  See [`crate::frame`] for the conversion to Bevy world space.

use bevy::math::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Position, orientation, velocities and collision extent of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    /// Radians; unbounded, no wraparound.
    pub rotation: f32,
    pub linvel: Vec2,
    /// Degrees per second.
    pub angvel: f32,
    /// Half-width / half-height of the axis-aligned collision box.
    pub half_extents: Vec2,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            linvel: Vec2::ZERO,
            angvel: 0.0,
            half_extents: Vec2::ZERO,
        }
    }
}

impl KinematicBody {
    /// A body at rest at `position` with a square collision box of edge `size`.
    pub fn at(position: Vec2, size: f32) -> Self {
        Self {
            position,
            half_extents: Vec2::splat(size * 0.5),
            ..Default::default()
        }
    }

    /// Advance one linear Euler step: no sub-stepping.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.linvel * dt;
        self.rotation += self.angvel.to_radians() * dt;
    }

    /// Rescale velocity so its magnitude does not exceed `max`, keeping direction.
    ///
    /// The division only happens when `speed > max`, and callers only pass
    /// strictly positive caps, so the divisor is never zero.
    pub fn clamp_speed(&mut self, max: f32) {
        let speed = self.speed();
        if speed > max {
            self.linvel *= max / speed;
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.linvel.length()
    }

    /// Unit vector the ship's nose points along (`rotation − 90°`).
    #[inline]
    pub fn heading(&self) -> Vec2 {
        let a = self.rotation - FRAC_PI_2;
        Vec2::new(a.cos(), a.sin())
    }

    /// Unit vector along the raw rotation angle, perpendicular to the heading.
    #[inline]
    pub fn rotation_axis(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// Axis-aligned box overlap test.  Touching edges do not count.
    pub fn overlaps(&self, other: &KinematicBody) -> bool {
        let d = (self.position - other.position).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.y < reach.y
    }
}
