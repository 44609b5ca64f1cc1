//! Headless end-to-end scenarios driven through [`Scene::tick`].
//!
//! No Bevy app, window or physics engine is involved: the scene runs the
//! same flight, governor, collision and game-state rules the game uses, with
//! its own integrator and overlap test, so every run here is deterministic.
//!
//! Covered scenarios:
//! 1. Asteroid strikes end the run, one tick at a time or all at once;
//!    later contacts are ignored.
//! 2. A sustained overlap costs exactly one life; re-touching costs another.
//! 3. Visiting every station heals and wins, one by one or together;
//!    visited stations go inert.
//! 4. Pause freezes the scene; terminal states ignore the pause key.
//! 5. Super speed overrides spin and the speed caps.
//! 6. Normal-regime caps and the hard map edge.

use bevy::math::Vec2;
use refuel::config::FlightConfig;
use refuel::flight::ControlKeys;
use refuel::game_state::GameStatus;
use refuel::kinematics::KinematicBody;
use refuel::scene::{AsteroidId, Scene};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CENTRE: Vec2 = Vec2::new(2500.0, 2500.0);
const FAR_STATION: Vec2 = Vec2::new(200.0, 200.0);
const DT: f32 = 1.0 / 60.0;

fn cfg() -> FlightConfig {
    FlightConfig::default()
}

fn ship() -> KinematicBody {
    KinematicBody::at(CENTRE, cfg().ship_collider_size)
}

fn rock(offset: Vec2) -> KinematicBody {
    KinematicBody::at(CENTRE + offset, cfg().asteroid_collider_size)
}

fn idle() -> ControlKeys {
    ControlKeys::default()
}

fn forward() -> ControlKeys {
    ControlKeys {
        forward: true,
        ..Default::default()
    }
}

fn pause() -> ControlKeys {
    ControlKeys {
        toggle_pause: true,
        ..Default::default()
    }
}

/// Scene with the ship in the centre, the given rocks and stations, and no
/// other bodies.
fn scene(rocks: Vec<KinematicBody>, stations: Vec<Vec2>) -> Scene {
    Scene::from_parts(cfg(), ship(), rocks, stations, 42)
}

// ── Lives and loss ────────────────────────────────────────────────────────────

/// Six rocks touching the ship at once: the fifth hit ends the run and the
/// sixth (plus the station in reach) changes nothing.
#[test]
fn fifth_hit_loses_and_later_contacts_are_ignored() {
    let rocks = vec![
        rock(Vec2::new(20.0, 0.0)),
        rock(Vec2::new(-20.0, 0.0)),
        rock(Vec2::new(0.0, 20.0)),
        rock(Vec2::new(0.0, -20.0)),
        rock(Vec2::new(15.0, 15.0)),
        rock(Vec2::new(-15.0, -15.0)),
    ];
    let mut s = scene(rocks, vec![CENTRE, FAR_STATION]);

    let report = s.tick(idle(), 0.0);

    assert_eq!(report.impacts.len(), 5);
    assert_eq!(report.impacts[4].1.lives_left, 0);
    assert!(report.visits.is_empty());
    assert_eq!(s.status(), GameStatus::Lost);
    assert_eq!(s.tracker().lives(), 0);
    assert!(!s.stations()[0].visited);
    // The sixth rock was never flung.
    assert_eq!(s.asteroids()[5].body.linvel, Vec2::ZERO);

    let after = s.tick(forward(), DT);
    assert!(after.frozen);
}

/// Five separate strikes on five ticks count lives down one at a time; the
/// run only ends on the last one and a station touched afterwards is ignored.
#[test]
fn lives_count_down_one_strike_per_tick() {
    let station = CENTRE + Vec2::new(0.0, 600.0);
    let mut s = scene(vec![rock(Vec2::new(0.0, -20.0))], vec![station, FAR_STATION]);

    for expected_lives in (0..5).rev() {
        let touching = s.ship.body.position + Vec2::new(0.0, -20.0);
        if let Some(a) = s.asteroid_mut(AsteroidId(0)) {
            a.body.position = touching;
            a.body.linvel = Vec2::ZERO;
        }
        let report = s.tick(idle(), 0.0);
        assert_eq!(report.impacts.len(), 1);
        assert_eq!(report.impacts[0].1.lives_left, expected_lives);
        assert_eq!(s.tracker().lives(), expected_lives);

        if expected_lives > 0 {
            assert_eq!(s.status(), GameStatus::Running);
            // Pull the rock clear so the next touch is a fresh contact.
            let clear = s.ship.body.position + Vec2::new(0.0, -400.0);
            if let Some(a) = s.asteroid_mut(AsteroidId(0)) {
                a.body.position = clear;
                a.body.linvel = Vec2::ZERO;
            }
            assert!(s.tick(idle(), 0.0).impacts.is_empty());
        }
    }
    assert_eq!(s.status(), GameStatus::Lost);

    s.ship.body.position = station;
    let after = s.tick(idle(), 0.0);
    assert!(after.frozen);
    assert!(after.visits.is_empty());
    assert!(!s.stations()[0].visited);
    assert_eq!(s.tracker().stations_visited(), 0);
    assert_eq!(s.status(), GameStatus::Lost);
}

#[test]
fn sustained_overlap_costs_one_life_per_touch() {
    let mut s = scene(vec![rock(Vec2::new(0.0, -20.0))], vec![FAR_STATION]);

    assert_eq!(s.tick(idle(), 0.0).impacts.len(), 1);
    // dt = 0: the bodies have new velocities but have not moved apart.
    for _ in 0..3 {
        assert!(s.tick(idle(), 0.0).impacts.is_empty());
    }
    assert_eq!(s.tracker().lives(), 4);

    // Separate, then touch again.
    if let Some(a) = s.asteroid_mut(AsteroidId(0)) {
        a.body.position = CENTRE + Vec2::new(0.0, -400.0);
        a.body.linvel = Vec2::ZERO;
    }
    assert!(s.tick(idle(), 0.0).impacts.is_empty());
    let touching = s.ship.body.position + Vec2::new(0.0, -20.0);
    if let Some(a) = s.asteroid_mut(AsteroidId(0)) {
        a.body.position = touching;
    }
    assert_eq!(s.tick(idle(), 0.0).impacts.len(), 1);
    assert_eq!(s.tracker().lives(), 3);
}

#[test]
fn strike_flings_rock_and_recoils_ship() {
    // Rock directly "above" the ship in map space (smaller y).
    let mut s = scene(vec![rock(Vec2::new(0.0, -20.0))], vec![FAR_STATION]);
    let report = s.tick(idle(), 0.0);

    let (_, impact) = report.impacts[0];
    assert!((impact.angle.to_degrees() + 90.0).abs() < 1e-3);
    assert!(impact.spin.abs() <= 100.0 && impact.spin.fract() == 0.0);

    let rock = s.asteroids()[0].body;
    assert!((rock.linvel - Vec2::new(0.0, -200.0)).length() < 1e-3);
    assert!((s.ship.body.linvel - Vec2::new(0.0, 50.0)).length() < 1e-3);
}

// ── Stations and win ──────────────────────────────────────────────────────────

#[test]
fn visiting_every_station_heals_and_wins() {
    let rocks = vec![rock(Vec2::new(20.0, 0.0))];
    let stations = vec![CENTRE + Vec2::new(40.0, 0.0), CENTRE - Vec2::new(40.0, 0.0)];
    let mut s = scene(rocks, stations);

    let report = s.tick(idle(), 0.0);

    // The strike lands first, then both stations refuel.
    assert_eq!(report.impacts.len(), 1);
    assert_eq!(report.visits.len(), 2);
    assert!(report.visits[1].1.won);
    assert_eq!(s.status(), GameStatus::Won);
    assert_eq!(s.tracker().lives(), 5);
    assert_eq!(s.tracker().stations_visited(), 2);
    assert!(s.tick(forward(), DT).frozen);
}

/// Two stations reached on separate ticks: the first heals and keeps the run
/// going, the second wins it.
#[test]
fn stations_visited_one_by_one_heal_then_win() {
    let station_a = CENTRE + Vec2::new(0.0, 300.0);
    let station_b = CENTRE + Vec2::new(600.0, 0.0);
    let mut s = scene(vec![rock(Vec2::new(0.0, -20.0))], vec![station_a, station_b]);

    assert_eq!(s.tick(idle(), 0.0).impacts.len(), 1);
    assert_eq!(s.tracker().lives(), 4);
    assert_eq!(s.tracker().stations_visited(), 0);

    s.ship.body.position = station_a;
    let first = s.tick(idle(), 0.0);
    assert_eq!(first.visits.len(), 1);
    assert_eq!(first.visits[0].1.stations_visited, 1);
    assert!(!first.visits[0].1.won);
    assert_eq!(s.tracker().lives(), 5);
    assert_eq!(s.status(), GameStatus::Running);

    s.ship.body.position = station_b;
    let second = s.tick(idle(), 0.0);
    assert_eq!(second.visits.len(), 1);
    assert!(second.visits[0].1.won);
    assert_eq!(s.tracker().stations_visited(), 2);
    assert_eq!(s.status(), GameStatus::Won);
}

#[test]
fn visited_station_is_inert() {
    let mut s = scene(vec![], vec![CENTRE, FAR_STATION]);

    assert_eq!(s.tick(idle(), 0.0).visits.len(), 1);
    assert!(s.stations()[0].visited);
    for _ in 0..5 {
        assert!(s.tick(idle(), DT).visits.is_empty());
    }
    assert_eq!(s.tracker().stations_visited(), 1);
    assert_eq!(s.status(), GameStatus::Running);

    let hud = s.hud();
    assert_eq!((hud.stations_visited, hud.total_stations), (1, 2));
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_everything_until_resumed() {
    let mut drifting = rock(Vec2::new(800.0, 0.0));
    drifting.linvel = Vec2::new(30.0, 0.0);
    let mut s = scene(vec![drifting], vec![FAR_STATION]);

    assert!(s.tick(pause(), DT).frozen);
    assert_eq!(s.status(), GameStatus::Paused);
    let ship_before = s.ship.body;
    let rock_before = s.asteroids()[0].body;

    // Holding P does not re-toggle; thrust is ignored while paused.
    for _ in 0..10 {
        let keys = ControlKeys {
            forward: true,
            toggle_pause: true,
            ..Default::default()
        };
        assert!(s.tick(keys, DT).frozen);
    }
    assert_eq!(s.ship.body, ship_before);
    assert_eq!(s.asteroids()[0].body, rock_before);

    assert!(s.tick(idle(), DT).frozen);
    let resumed = s.tick(pause(), DT);
    assert!(!resumed.frozen);
    assert_eq!(s.status(), GameStatus::Running);
    assert!(s.asteroids()[0].body.position.x > rock_before.position.x);
}

#[test]
fn pause_key_is_ignored_after_the_run_ends() {
    let rocks = (0..5)
        .map(|i| rock(Vec2::new(-20.0 + 10.0 * i as f32, 20.0)))
        .collect();
    let mut s = scene(rocks, vec![FAR_STATION]);
    s.tick(idle(), 0.0);
    assert_eq!(s.status(), GameStatus::Lost);

    s.tick(pause(), DT);
    assert_eq!(s.status(), GameStatus::Lost);
}

// ── Flight ────────────────────────────────────────────────────────────────────

#[test]
fn super_speed_pins_velocity_and_ignores_spin() {
    let mut s = scene(vec![], vec![FAR_STATION]);
    s.ship.body.angvel = 40.0;

    let toggle = ControlKeys {
        toggle_super_speed: true,
        left: true,
        ..Default::default()
    };
    s.tick(toggle, 0.0);
    assert!(s.hud().super_speed);
    assert_eq!(s.ship.body.angvel, 0.0);

    // Nose up: straight ahead is −y in map space.
    s.tick(idle(), 0.0);
    assert!((s.ship.body.linvel - Vec2::new(0.0, -1000.0)).length() < 1e-2);
    assert!(s.ship.body.speed() > cfg().max_speed);

    // Release then press again to drop back to normal flight.
    s.tick(
        ControlKeys {
            toggle_super_speed: true,
            ..Default::default()
        },
        0.0,
    );
    assert!(!s.hud().super_speed);
}

#[test]
fn forward_thrust_is_capped() {
    let mut s = scene(vec![], vec![FAR_STATION]);
    for _ in 0..30 {
        s.tick(forward(), DT);
        assert!(s.ship.body.speed() <= cfg().max_speed + 1e-3);
    }
    assert!((s.ship.body.speed() - cfg().max_speed).abs() < 1e-3);
    assert!((s.hud().speed - cfg().max_speed).abs() < 1e-3);

    // Coasting keeps the speed under the cap and bleeds it off.
    let before = s.ship.body.speed();
    s.tick(idle(), DT);
    assert!(s.ship.body.speed() < before);
}

#[test]
fn ship_stops_at_the_map_edge() {
    let mut s = scene(vec![], vec![FAR_STATION]);
    s.ship.body.position = Vec2::new(2500.0, 5.0);
    for _ in 0..20 {
        s.tick(forward(), DT);
        let p = s.ship.body.position;
        assert!(p.y >= 0.0 && p.y <= 5000.0);
    }
    assert_eq!(s.ship.body.position.y, 0.0);
    // Thrust rebuilds velocity each tick; the clamp removes it again.
    assert!(s.ship.body.linvel.y <= 0.0);
}
