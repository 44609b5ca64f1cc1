//! Ship rendering: filled dart mesh, nose gizmo, and the camera follow system.
//!
//! | Layer               | Technology | When                       |
//! |---------------------|------------|----------------------------|
//! | Ship filled polygon | `Mesh2d`   | always                     |
//! | Nose indicator      | Gizmos     | always; amber in super speed |

use super::Ship;
use crate::asteroid_rendering::filled_polygon_mesh;
use crate::config::FlightConfig;
use crate::flight::FlightRegime;
use bevy::prelude::*;

// ── Ship geometry ─────────────────────────────────────────────────────────────

/// Local-space vertices of the ship dart, scaled to the collider edge `size`.
///
/// The nose points along local +Y, which is the map-space heading after the
/// frame conversion.
fn ship_vertices(size: f32) -> Vec<Vec2> {
    let s = size / 25.0;
    [
        Vec2::new(0.0, 12.0),  // nose
        Vec2::new(-8.0, -8.0), // left fin tip
        Vec2::new(-3.0, -4.0), // left fin inner
        Vec2::new(0.0, -10.0), // tail notch
        Vec2::new(3.0, -4.0),  // right fin inner
        Vec2::new(8.0, -8.0),  // right fin tip
    ]
    .into_iter()
    .map(|v| v * s)
    .collect()
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Attach a filled `Mesh2d` polygon to the ship on spawn.
///
/// Runs only once per ship entity (via [`Added<Ship>`]).
pub fn attach_ship_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Ship>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<FlightConfig>,
) {
    for entity in query.iter() {
        let mesh_handle = meshes.add(filled_polygon_mesh(&ship_vertices(
            config.ship_collider_size,
        )));
        let mat_handle = materials.add(ColorMaterial::from_color(Color::srgb(0.08, 0.30, 0.32)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(mat_handle)));
    }
}

// ── Gizmo rendering ───────────────────────────────────────────────────────────

/// Nose direction line: white in normal flight, amber while in super speed.
pub fn ship_gizmo_system(
    mut gizmos: Gizmos,
    q_ship: Query<(&Transform, &FlightRegime), With<Ship>>,
    config: Res<FlightConfig>,
) {
    let Ok((transform, regime)) = q_ship.single() else {
        return;
    };
    let pos = transform.translation.truncate();
    let reach = config.ship_collider_size * 0.8;
    let nose = pos + transform.rotation.mul_vec3(Vec3::Y * reach).truncate();
    let color = if regime.is_super_speed() {
        Color::srgb(1.0, 0.65, 0.1)
    } else {
        Color::WHITE
    };
    gizmos.line_2d(pos, nose, color);
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Camera centre that follows `target` without showing space outside the map.
///
/// `map` is the world-space map size and `view` the visible area.  When the
/// view is larger than the map along an axis the camera sits on the map centre.
pub fn clamp_camera(target: Vec2, map: Vec2, view: Vec2) -> Vec2 {
    let half = view * 0.5;
    let axis = |t: f32, m: f32, h: f32| {
        if 2.0 * h >= m {
            m * 0.5
        } else {
            t.clamp(h, m - h)
        }
    };
    Vec2::new(axis(target.x, map.x, half.x), axis(target.y, map.y, half.y))
}

/// Keep the camera centred on the ship, bounded by the map edges.
///
/// Camera Z is preserved (used internally by Bevy for rendering order).
pub fn camera_follow_system(
    q_ship: Query<&Transform, With<Ship>>,
    mut q_camera: Query<&mut Transform, (With<Camera>, Without<Ship>)>,
    windows: Query<&Window>,
    config: Res<FlightConfig>,
) {
    let Ok(ship_transform) = q_ship.single() else {
        return;
    };
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };
    let view = windows
        .iter()
        .next()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);

    let centre = clamp_camera(
        ship_transform.translation.truncate(),
        Vec2::new(config.map_width, config.map_height),
        view,
    );
    cam.translation.x = centre.x;
    cam.translation.y = centre.y;
}
