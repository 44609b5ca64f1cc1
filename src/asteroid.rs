//! Asteroid field: marker components, outline generation and spawning.
//!
//! Asteroids are dynamic bodies that drift and spin at their spawn velocity
//! until something hits them.  The collision box is an axis-aligned square of
//! `asteroid_collider_size`; the jagged polygon in [`Vertices`] is visual only.

use crate::config::FlightConfig;
use crate::frame::{BodyExtents, MapFrame};
use crate::scene::random_asteroid;
use crate::simulation::{FieldRng, ASTEROID_GROUP, SHIP_GROUP};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Marker component for any asteroid entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asteroid;

/// Polygon vertices for rendering (stored in local space)
#[derive(Component, Debug, Clone)]
pub struct Vertices(pub Vec<Vec2>);

/// Spawn `asteroid_count` asteroids scattered over the map and its overhang.
pub fn spawn_asteroid_field(
    mut commands: Commands,
    config: Res<FlightConfig>,
    frame: Res<MapFrame>,
    mut rng: ResMut<FieldRng>,
) {
    let half = config.asteroid_collider_size * 0.5;

    for _ in 0..config.asteroid_count {
        let body = random_asteroid(&mut rng.0, &config);
        let sides = rng.0.gen_range(6..=9);
        let vertices = rock_outline(&mut rng.0, sides, half);

        commands.spawn((
            (
                Asteroid,
                Vertices(vertices),
                BodyExtents(body.half_extents),
                frame.transform_to_world(&body, 0.05),
                Visibility::default(),
                RigidBody::Dynamic,
            ),
            (
                Collider::cuboid(half, half),
                Restitution::coefficient(config.asteroid_restitution),
                Friction::coefficient(0.0),
                frame.velocity_to_world(&body),
                Damping {
                    linear_damping: 0.0,
                    angular_damping: 0.0,
                },
                CollisionGroups::new(ASTEROID_GROUP, SHIP_GROUP | ASTEROID_GROUP),
                ActiveEvents::COLLISION_EVENTS,
                Sleeping::disabled(),
            ),
        ));
    }

    info!("Spawned {} asteroids", config.asteroid_count);
}

/// Lumpy convex-ish outline: a regular `sides`-gon with each vertex pulled
/// inward by up to 30%, so the rock never pokes outside its collision box.
pub fn rock_outline<R: Rng + ?Sized>(rng: &mut R, sides: usize, radius: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / sides as f32;
            let r = radius * rng.gen_range(0.7..=1.0);
            Vec2::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn outline_has_requested_vertex_count() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(rock_outline(&mut rng, 7, 15.0).len(), 7);
    }

    #[test]
    fn outline_stays_inside_collision_box() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            for v in rock_outline(&mut rng, 8, 15.0) {
                assert!(v.x.abs() <= 15.0 + 1e-4 && v.y.abs() <= 15.0 + 1e-4);
                assert!(v.length() >= 15.0 * 0.7 - 1e-4);
            }
        }
    }

    #[test]
    fn spawn_field_creates_configured_count() {
        let mut world = World::new();
        let config = FlightConfig {
            asteroid_count: 12,
            ..Default::default()
        };
        world.insert_resource(MapFrame::from_config(&config));
        world.insert_resource(config);
        world.insert_resource(FieldRng::seeded(Some(1)));

        let mut schedule = Schedule::default();
        schedule.add_systems(spawn_asteroid_field);
        schedule.run(&mut world);

        let mut q = world.query_filtered::<(&Vertices, &BodyExtents), With<Asteroid>>();
        let spawned: Vec<_> = q.iter(&world).collect();
        assert_eq!(spawned.len(), 12);
        for (vertices, extents) in spawned {
            assert!(vertices.0.len() >= 6);
            assert_eq!(extents.0, Vec2::splat(15.0));
        }
    }
}
