use crate::config::FlightConfig;
use bevy::prelude::*;

/// Setup camera for 2D rendering, starting over the map centre.
pub fn setup_camera(mut commands: Commands, config: Res<FlightConfig>) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(config.map_width * 0.5, config.map_height * 0.5, 0.0),
    ));
    info!("Camera spawned");
}

/// Outline the playable map so the hard edge is visible in flight.
pub fn map_boundary_gizmo_system(mut gizmos: Gizmos, config: Res<FlightConfig>) {
    let (w, h) = (config.map_width, config.map_height);
    gizmos.linestrip_2d(
        [
            Vec2::ZERO,
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
            Vec2::ZERO,
        ],
        Color::srgba(0.4, 0.4, 0.5, 0.6),
    );
}
