//! Simulation plugin: resources, startup order, per-frame system order and the
//! ship × asteroid contact system.
//!
//! ## Frame order
//!
//! ```text
//! Update      keyboard → pause toggle → physics on/off → flight controller*
//! (Rapier)    integration + contact detection
//! PostUpdate  spin hold* → bounds clamp* → asteroid contacts* → station visits* → HUD readout → HUD / overlay
//! ```
//!
//! Systems marked `*` run only while the game is `Running`; the Rapier
//! pipeline is switched off in every other status, so a paused or finished
//! game is fully frozen.

use crate::asteroid::{spawn_asteroid_field, Asteroid};
use crate::asteroid_rendering::{
    age_hit_cues_system, attach_asteroid_mesh_system, draw_hit_cues_system, HitCue,
};
use crate::collision::{resolve_ship_asteroid, ContactTracker};
use crate::config::{load_flight_config, FlightConfig};
use crate::flight::{ControlInput, FlightRegime};
use crate::frame::{BodyExtents, MapFrame};
use crate::game_state::{simulation_running, GameTracker, HudReadout};
use crate::graphics::{map_boundary_gizmo_system, setup_camera};
use crate::rendering::{hud_display_system, setup_hud, status_overlay_system};
use crate::ship::{
    attach_ship_mesh_system, camera_follow_system, flight_control_system,
    hold_steered_spin_system, keyboard_to_control_system, pause_toggle_system,
    ship_bounds_system, ship_gizmo_system, spawn_ship, Ship,
};
use crate::station::{attach_station_mesh_system, spawn_stations, station_visit_system};
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Collision groups ──────────────────────────────────────────────────────────

/// Ship collides with asteroids and stations.
pub const SHIP_GROUP: Group = Group::GROUP_1;
/// Asteroids collide with the ship and each other.
pub const ASTEROID_GROUP: Group = Group::GROUP_2;
/// Stations are sensors that only see the ship.
pub const STATION_GROUP: Group = Group::GROUP_3;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Shared RNG for field layout and collision spin.
#[derive(Resource)]
pub struct FieldRng(pub StdRng);

impl FieldRng {
    /// Deterministic when `seed` is set, otherwise seeded from OS entropy.
    pub fn seeded(seed: Option<u64>) -> Self {
        Self(match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        })
    }
}

/// Ship × asteroid pairs that were touching at the end of the last physics step.
#[derive(Resource, Default)]
pub struct ShipContacts(pub ContactTracker<Entity>);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlightConfig>()
            .init_resource::<ControlInput>()
            .init_resource::<HudReadout>()
            .init_resource::<ShipContacts>()
            .add_systems(
                Startup,
                (
                    // Config first so every other startup system sees the final values.
                    load_flight_config,
                    init_world_resources,
                    (
                        setup_physics,
                        setup_camera,
                        setup_hud,
                        spawn_ship,
                        spawn_asteroid_field,
                        spawn_stations,
                    ),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (
                        keyboard_to_control_system,
                        pause_toggle_system,
                        sync_physics_pipeline_system,
                        flight_control_system.run_if(simulation_running),
                    )
                        .chain(),
                    (
                        attach_ship_mesh_system,
                        attach_asteroid_mesh_system,
                        attach_station_mesh_system,
                    ),
                    age_hit_cues_system.run_if(simulation_running),
                    (
                        camera_follow_system,
                        ship_gizmo_system,
                        draw_hit_cues_system,
                        map_boundary_gizmo_system,
                    ),
                ),
            )
            .add_systems(
                PostUpdate,
                (
                    (
                        hold_steered_spin_system,
                        ship_bounds_system,
                        ship_asteroid_contact_system,
                        station_visit_system,
                    )
                        .chain()
                        .run_if(simulation_running),
                    hud_readout_system,
                    (hud_display_system, status_overlay_system),
                )
                    .chain()
                    .after(PhysicsSet::Writeback),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Insert the resources derived from the loaded [`FlightConfig`].
pub fn init_world_resources(mut commands: Commands, config: Res<FlightConfig>) {
    commands.insert_resource(MapFrame::from_config(&config));
    commands.insert_resource(GameTracker::new(
        config.max_lives,
        config.station_count as u32,
    ));
    commands.insert_resource(FieldRng::seeded(config.rng_seed));
    match config.rng_seed {
        Some(seed) => info!("Field seed {seed}"),
        None => info!("Field seeded from entropy"),
    }
}

/// Configure Rapier physics: no gravity in space.
pub fn setup_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

/// Run the Rapier pipeline only while the game is `Running`.
pub fn sync_physics_pipeline_system(
    tracker: Res<GameTracker>,
    mut config: Query<&mut RapierConfiguration>,
) {
    if !tracker.is_changed() {
        return;
    }
    let active = tracker.is_running();
    for mut cfg in config.iter_mut() {
        if cfg.physics_pipeline_active != active {
            cfg.physics_pipeline_active = active;
            debug!("Physics pipeline active: {active}");
        }
    }
}

/// Answer each new ship × asteroid touch exactly once.
///
/// Rapier reports every pair in contact after the step; [`ShipContacts`]
/// filters those down to contacts that started this step.  Pairs are handled
/// in entity order so a fixed seed replays the same spins.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn ship_asteroid_contact_system(
    mut commands: Commands,
    mut q_ship: Query<
        (Entity, &Transform, &mut Velocity, &BodyExtents),
        (With<Ship>, Without<Asteroid>),
    >,
    mut q_asteroids: Query<
        (&Transform, &mut Velocity, &BodyExtents),
        (With<Asteroid>, Without<Ship>),
    >,
    rapier_context: ReadRapierContext,
    mut contacts: ResMut<ShipContacts>,
    mut tracker: ResMut<GameTracker>,
    mut rng: ResMut<FieldRng>,
    config: Res<FlightConfig>,
    frame: Res<MapFrame>,
) {
    let Ok((ship_entity, ship_transform, mut ship_velocity, ship_extents)) = q_ship.single_mut()
    else {
        return;
    };
    let Ok(rapier) = rapier_context.single() else {
        return;
    };

    let mut touching = Vec::new();
    for contact_pair in rapier.contact_pairs_with(ship_entity) {
        if !contact_pair.has_any_active_contact() {
            continue;
        }
        let (Some(e1), Some(e2)) = (contact_pair.collider1(), contact_pair.collider2()) else {
            continue;
        };
        let other = if e1 == ship_entity { e2 } else { e1 };
        if q_asteroids.contains(other) {
            touching.push(other);
        }
    }
    touching.sort();

    let started = contacts.0.begin_tick(touching);
    if started.is_empty() {
        return;
    }

    let mut ship = frame.body_from_world(ship_transform, &ship_velocity, ship_extents.0);
    for asteroid_entity in started {
        let Ok((ast_transform, mut ast_velocity, ast_extents)) =
            q_asteroids.get_mut(asteroid_entity)
        else {
            continue;
        };
        let mut asteroid = frame.body_from_world(ast_transform, &ast_velocity, ast_extents.0);
        let Some(impact) =
            resolve_ship_asteroid(&mut ship, &mut asteroid, &mut tracker, &mut rng.0, &config)
        else {
            break;
        };
        *ast_velocity = frame.velocity_to_world(&asteroid);
        commands.spawn(HitCue::at(ast_transform.translation.truncate()));
        info!("Asteroid hit: {} lives left", impact.lives_left);
    }
    *ship_velocity = frame.velocity_to_world(&ship);

    if !tracker.is_alive() {
        info!("Out of lives: game over");
    }
}

/// Publish this frame's [`HudReadout`].  Only marks the resource changed when
/// a displayed value actually moved.
pub fn hud_readout_system(
    q_ship: Query<(&Velocity, &FlightRegime), With<Ship>>,
    tracker: Res<GameTracker>,
    mut hud: ResMut<HudReadout>,
) {
    let (speed, super_speed) = q_ship
        .single()
        .map(|(v, regime)| (v.linvel.length(), regime.is_super_speed()))
        .unwrap_or((0.0, false));
    hud.set_if_neq(HudReadout::capture(&tracker, speed, super_speed));
}
