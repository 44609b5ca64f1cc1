//! Heads-up display and status overlays.
//!
//! Both read the per-frame [`HudReadout`] only; nothing here touches the
//! simulation.
//!
//! | Element            | Position     | Shows                                       |
//! |--------------------|--------------|---------------------------------------------|
//! | HUD column         | top-left     | lives, speed, super-speed banner, stations  |
//! | Status overlay     | centred card | "Paused", "Game Over" or "You Win!"         |

use crate::config::FlightConfig;
use crate::game_state::{GameStatus, HudReadout};
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// One line of the HUD column.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Lives,
    Speed,
    SuperSpeed,
    Stations,
}

impl HudField {
    const ALL: [HudField; 4] = [
        HudField::Lives,
        HudField::Speed,
        HudField::SuperSpeed,
        HudField::Stations,
    ];

    /// Text for this line; the super-speed line is blank in normal flight.
    pub fn text(self, hud: &HudReadout) -> String {
        match self {
            HudField::Lives => format!("Lives: {}", hud.lives),
            HudField::Speed => format!("Speed: {}", hud.speed.round() as i64),
            HudField::SuperSpeed if hud.super_speed => "Super Speed Activated!".to_string(),
            HudField::SuperSpeed => String::new(),
            HudField::Stations => {
                format!("Stations: {}/{}", hud.stations_visited, hud.total_stations)
            }
        }
    }

    fn color(self) -> Color {
        match self {
            HudField::Lives => Color::srgb(1.0, 0.45, 0.45),
            HudField::Speed => Color::srgb(0.0, 1.0, 1.0),
            HudField::SuperSpeed => Color::srgb(1.0, 0.65, 0.1),
            HudField::Stations => Color::srgb(0.95, 0.88, 0.45),
        }
    }
}

/// Root node of the status overlay currently on screen.
#[derive(Component)]
pub struct StatusOverlay;

// ── Startup: HUD ──────────────────────────────────────────────────────────────

/// Spawn the HUD column in the top-left corner.
pub fn setup_hud(mut commands: Commands, config: Res<FlightConfig>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            for field in HudField::ALL {
                parent.spawn((
                    field,
                    Text::new(""),
                    TextFont {
                        font_size: config.hud_font_size,
                        ..default()
                    },
                    TextColor(field.color()),
                ));
            }
        });
}

// ── Update: HUD text ──────────────────────────────────────────────────────────

/// Rewrite the HUD lines whenever the readout changes.
pub fn hud_display_system(hud: Res<HudReadout>, mut q_text: Query<(&HudField, &mut Text)>) {
    if !hud.is_changed() {
        return;
    }
    for (field, mut text) in q_text.iter_mut() {
        let next = field.text(&hud);
        if text.0 != next {
            text.0 = next;
        }
    }
}

// ── Update: status overlay ────────────────────────────────────────────────────

/// Title and accent colour of the overlay for `status`; `None` while running.
pub fn overlay_title(status: GameStatus) -> Option<(&'static str, Color)> {
    match status {
        GameStatus::Running => None,
        GameStatus::Paused => Some(("Paused", Color::srgb(0.55, 0.85, 1.0))),
        GameStatus::Lost => Some(("Game Over", Color::srgb(1.0, 0.22, 0.22))),
        GameStatus::Won => Some(("You Win!", Color::srgb(0.35, 1.0, 0.45))),
    }
}

/// Swap the overlay card whenever the status changes.
pub fn status_overlay_system(
    mut commands: Commands,
    hud: Res<HudReadout>,
    q_overlay: Query<Entity, With<StatusOverlay>>,
    mut shown: Local<Option<GameStatus>>,
) {
    if *shown == Some(hud.status) {
        return;
    }
    *shown = Some(hud.status);

    for entity in q_overlay.iter() {
        commands.entity(entity).despawn();
    }
    let Some((title, accent)) = overlay_title(hud.status) else {
        return;
    };
    info!("Showing overlay: {title}");

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            ZIndex(300),
            StatusOverlay,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.04, 0.08)),
                    BorderColor::all(accent),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(accent),
                    ));
                    card.spawn((
                        Text::new(format!(
                            "Stations: {}/{}   Lives: {}",
                            hud.stations_visited, hud.total_stations, hud.lives
                        )),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.75, 0.80)),
                    ));
                    if hud.status == GameStatus::Paused {
                        card.spawn((
                            Text::new("Press P to resume"),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.75, 0.75, 0.80)),
                        ));
                    }
                });
        });
}
