//! Refuelling stations: fixed sensor boxes the ship flies through.
//!
//! 1. [`spawn_stations`] places `station_count` stations inside the map margin.
//! 2. [`attach_station_mesh_system`] gives each new station its filled octagon.
//! 3. [`station_visit_system`] listens for `CollisionEvent::Started` between
//!    the ship and a station.  A first visit refuels the ship (full lives),
//!    counts toward the win, hides the station and disables its collider so
//!    it never reports again.

use crate::asteroid_rendering::filled_polygon_mesh;
use crate::collision::resolve_ship_station;
use crate::config::FlightConfig;
use crate::frame::{BodyExtents, MapFrame};
use crate::game_state::GameTracker;
use crate::scene::random_station;
use crate::ship::Ship;
use crate::simulation::{FieldRng, SHIP_GROUP, STATION_GROUP};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// A refuelling station.  `visited` flips once and never back.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Station {
    pub visited: bool,
}

/// Spawn `station_count` unvisited stations.  Stations may overlap each other.
pub fn spawn_stations(
    mut commands: Commands,
    config: Res<FlightConfig>,
    frame: Res<MapFrame>,
    mut rng: ResMut<FieldRng>,
) {
    let half = config.station_collider_size * 0.5;

    for _ in 0..config.station_count {
        let body = random_station(&mut rng.0, &config);
        commands.spawn((
            Station::default(),
            BodyExtents(body.half_extents),
            frame.transform_to_world(&body, 0.02),
            Visibility::default(),
            RigidBody::Fixed,
            Collider::cuboid(half, half),
            Sensor,
            CollisionGroups::new(STATION_GROUP, SHIP_GROUP),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }

    info!("Spawned {} stations", config.station_count);
}

/// Attach a filled octagon `Mesh2d` to every freshly-spawned station.
pub fn attach_station_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Station>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<FlightConfig>,
) {
    let radius = config.station_collider_size * 0.5;
    for entity in query.iter() {
        let mesh = meshes.add(filled_polygon_mesh(&station_outline(radius)));
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.20, 0.55, 0.95)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(mat)));
    }
}

/// Regular octagon inscribed in the station box.
fn station_outline(radius: f32) -> Vec<Vec2> {
    (0..8)
        .map(|i| {
            let angle = std::f32::consts::TAU * (i as f32 + 0.5) / 8.0;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Resolve ship × station sensor contacts.
pub fn station_visit_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_ship: Query<Entity, With<Ship>>,
    mut q_station: Query<(&mut Station, &mut Visibility)>,
    mut tracker: ResMut<GameTracker>,
) {
    let Ok(ship_entity) = q_ship.single() else {
        return;
    };

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let station_entity = if e2 == ship_entity {
            e1
        } else if e1 == ship_entity {
            e2
        } else {
            continue;
        };
        let Ok((mut station, mut visibility)) = q_station.get_mut(station_entity) else {
            continue;
        };

        let Some(visit) = resolve_ship_station(&mut station.visited, &mut tracker) else {
            continue;
        };
        *visibility = Visibility::Hidden;
        commands.entity(station_entity).insert(ColliderDisabled);

        info!(
            "Station refuel: {}/{} visited, lives restored to {}",
            visit.stations_visited,
            tracker.total_stations(),
            tracker.lives()
        );
        if visit.won {
            info!("All stations visited: you win");
        }
    }
}
