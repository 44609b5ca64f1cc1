//! Mesh2d-based filled polygon rendering for asteroids, plus the one-shot
//! hit cue drawn where the ship strikes a rock.
//!
//! Every `Asteroid` entity receives a filled polygon mesh shortly after
//! spawning via [`attach_asteroid_mesh_system`] (which queries
//! `Added<Asteroid>`).  The mesh lives in the entity's local space, so the
//! rotation Rapier writes into `Transform` is applied without extra math.

use crate::asteroid::{Asteroid, Vertices};
use crate::config::FlightConfig;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Attach a filled `Mesh2d` polygon to every newly spawned asteroid.
pub fn attach_asteroid_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Vertices), Added<Asteroid>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, vertices) in query.iter() {
        if vertices.0.len() < 3 {
            continue;
        }

        let mesh_handle = meshes.add(filled_polygon_mesh(&vertices.0));
        let material_handle = materials.add(ColorMaterial::from_color(rock_color(entity.index())));

        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(material_handle)));
    }
}

// ── Hit cue ───────────────────────────────────────────────────────────────────

/// Expanding ring left behind at a ship × asteroid impact point (world space).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitCue {
    pub origin: Vec2,
    pub age: f32,
}

impl HitCue {
    pub fn at(origin: Vec2) -> Self {
        Self { origin, age: 0.0 }
    }

    /// Fraction of the cue's lifetime elapsed, clamped to `[0, 1]`.
    pub fn progress(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            1.0
        } else {
            (self.age / duration).clamp(0.0, 1.0)
        }
    }
}

/// Age every hit cue and despawn it once its duration has elapsed.
pub fn age_hit_cues_system(
    mut commands: Commands,
    mut q_cues: Query<(Entity, &mut HitCue)>,
    time: Res<Time>,
    config: Res<FlightConfig>,
) {
    let dt = time.delta_secs();
    for (entity, mut cue) in q_cues.iter_mut() {
        cue.age += dt;
        if cue.progress(config.hit_cue_duration) >= 1.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Draw each live cue as a ring that grows and fades out.
pub fn draw_hit_cues_system(
    mut gizmos: Gizmos,
    q_cues: Query<&HitCue>,
    config: Res<FlightConfig>,
) {
    for cue in q_cues.iter() {
        let t = cue.progress(config.hit_cue_duration);
        let radius = config.asteroid_collider_size * (0.5 + t * 1.5);
        gizmos.circle_2d(cue.origin, radius, Color::srgba(1.0, 0.45, 0.2, 1.0 - t));
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Fan-triangulate a star-shaped polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
/// Valid for any polygon that is star-shaped around vertex 0's neighbourhood,
/// which covers every hull and rock outline in this crate.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(fan_indices(n)));
    mesh
}

fn fan_indices(n: usize) -> Vec<u32> {
    let mut indices: Vec<u32> = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..(n as u32).saturating_sub(1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    indices
}

/// Rocky grey-brown fill color seeded by the entity index.
///
/// Palette: luminance 0.18–0.36 with a slight warm/cool tint variation.
fn rock_color(seed: u32) -> Color {
    // Knuth multiplicative hash → 0.0–1.0
    let h = seed.wrapping_mul(2_654_435_761).wrapping_add(0xDEAD_BEEF);
    let t = (h & 0xFFFF) as f32 / 65_535.0;

    let lum = 0.18 + t * 0.18;
    let r = (lum + t * 0.06).min(1.0);
    let g = (lum + t * 0.02).min(1.0);
    let b = (lum.max(0.14) - t * 0.03).max(0.0);
    Color::srgb(r, g, b)
}
