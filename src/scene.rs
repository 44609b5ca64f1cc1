//! Headless scene: an arena of ship, asteroids and stations driven through
//! the complete per-tick pipeline without an engine.
//!
//! Entities are addressed by stable indices ([`AsteroidId`], [`StationId`])
//! so a single resolver call can mutate two entities without aliasing.
//! The scene supplies its own collaborators: linear Euler integration and a
//! brute-force axis-aligned overlap detector.
//!
//! ## Tick order
//!
//! 1. sample keys, derive toggle edges
//! 2. pause toggle (the only thing processed while paused)
//! 3. super-speed toggle
//! 4. flight controller → speed governor
//! 5. integrate every moving body
//! 6. clamp the ship into the map
//! 7. collect overlaps → contact-starts → resolver
//!
//! The field generators ([`random_asteroid`], [`random_station`]) are shared
//! with the Bevy spawn systems so both use the same placement rules.

use crate::collision::{
    resolve_asteroid_pair, resolve_ship_asteroid, resolve_ship_station, AsteroidImpact,
    ContactTracker, StationVisit,
};
use crate::config::FlightConfig;
use crate::flight::{steer, ControlInput, ControlKeys, FlightRegime};
use crate::game_state::{GameStatus, GameTracker, HudReadout};
use crate::governor::{clamp_to_bounds, govern_speed, MapBounds};
use crate::kinematics::KinematicBody;
use bevy::math::Vec2;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsteroidId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// An overlapping pair, normalised so each physical pair has one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    ShipAsteroid(AsteroidId),
    ShipStation(StationId),
    /// Always stored with the lower id first.
    AsteroidPair(AsteroidId, AsteroidId),
}

impl Contact {
    pub fn asteroid_pair(a: AsteroidId, b: AsteroidId) -> Self {
        if a <= b {
            Contact::AsteroidPair(a, b)
        } else {
            Contact::AsteroidPair(b, a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipState {
    pub body: KinematicBody,
    pub regime: FlightRegime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidState {
    pub body: KinematicBody,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationState {
    /// Immovable: velocities stay zero.
    pub body: KinematicBody,
    pub visited: bool,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub impacts: Vec<(AsteroidId, AsteroidImpact)>,
    pub visits: Vec<(StationId, StationVisit)>,
    /// The pipeline was skipped because the run was paused or over.
    pub frozen: bool,
}

/// Complete single-scene simulation state.
pub struct Scene {
    pub ship: ShipState,
    asteroids: Vec<AsteroidState>,
    stations: Vec<StationState>,
    tracker: GameTracker,
    input: ControlInput,
    contacts: ContactTracker<Contact>,
    bounds: MapBounds,
    cfg: FlightConfig,
    rng: StdRng,
}

impl Scene {
    /// Build a scene from explicit parts.  The station count becomes the
    /// win target.
    pub fn from_parts(
        cfg: FlightConfig,
        ship: KinematicBody,
        asteroids: Vec<KinematicBody>,
        stations: Vec<Vec2>,
        seed: u64,
    ) -> Self {
        let stations: Vec<StationState> = stations
            .into_iter()
            .map(|p| StationState {
                body: KinematicBody::at(p, cfg.station_collider_size),
                visited: false,
            })
            .collect();
        let tracker = GameTracker::new(cfg.max_lives, stations.len() as u32);
        Self {
            ship: ShipState {
                body: ship,
                regime: FlightRegime::Normal,
            },
            asteroids: asteroids
                .into_iter()
                .map(|body| AsteroidState { body })
                .collect(),
            stations,
            tracker,
            input: ControlInput::default(),
            contacts: ContactTracker::default(),
            bounds: MapBounds::from_config(&cfg),
            cfg,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Randomised field with the configured asteroid and station counts and
    /// the ship at rest in the map centre.
    pub fn generate(cfg: FlightConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let asteroids = (0..cfg.asteroid_count)
            .map(|_| random_asteroid(&mut rng, &cfg))
            .collect();
        let stations = (0..cfg.station_count)
            .map(|_| random_station(&mut rng, &cfg).position)
            .collect();
        let ship = KinematicBody::at(
            MapBounds::from_config(&cfg).center(),
            cfg.ship_collider_size,
        );
        Self::from_parts(cfg, ship, asteroids, stations, rng.gen())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn tracker(&self) -> &GameTracker {
        &self.tracker
    }

    pub fn status(&self) -> GameStatus {
        self.tracker.status()
    }

    pub fn asteroids(&self) -> &[AsteroidState] {
        &self.asteroids
    }

    pub fn stations(&self) -> &[StationState] {
        &self.stations
    }

    pub fn asteroid_mut(&mut self, id: AsteroidId) -> Option<&mut AsteroidState> {
        self.asteroids.get_mut(id.0)
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout::capture(
            &self.tracker,
            self.ship.body.speed(),
            self.ship.regime.is_super_speed(),
        )
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance the scene by one tick of `dt` seconds.
    pub fn tick(&mut self, keys: ControlKeys, dt: f32) -> TickReport {
        self.input.sample(keys);

        if self.input.pause_pressed && !self.tracker.is_terminal() {
            let status = self.tracker.toggle_pause();
            info!("Simulation {:?}", status);
        }
        if !self.tracker.is_running() {
            return TickReport {
                frozen: true,
                ..Default::default()
            };
        }

        if self.input.super_speed_pressed {
            self.ship.regime = self.ship.regime.toggled();
        }
        steer(&mut self.ship.body, &self.input.keys, self.ship.regime, &self.cfg);
        govern_speed(&mut self.ship.body, &self.input.keys, self.ship.regime, &self.cfg);

        self.ship.body.integrate(dt);
        for asteroid in &mut self.asteroids {
            asteroid.body.integrate(dt);
        }
        clamp_to_bounds(&mut self.ship.body, &self.bounds);

        let overlaps = self.detect_overlaps();
        for contact in &overlaps {
            if let Contact::AsteroidPair(a, b) = *contact {
                let (first, second) = pair_mut(&mut self.asteroids, a.0, b.0);
                resolve_asteroid_pair(&mut first.body, &mut second.body, self.cfg.asteroid_restitution);
            }
        }

        let mut report = TickReport::default();
        for contact in self.contacts.begin_tick(overlaps) {
            match contact {
                Contact::ShipAsteroid(id) => {
                    let asteroid = &mut self.asteroids[id.0];
                    if let Some(impact) = resolve_ship_asteroid(
                        &mut self.ship.body,
                        &mut asteroid.body,
                        &mut self.tracker,
                        &mut self.rng,
                        &self.cfg,
                    ) {
                        report.impacts.push((id, impact));
                    }
                }
                Contact::ShipStation(id) => {
                    let station = &mut self.stations[id.0];
                    if let Some(visit) = resolve_ship_station(&mut station.visited, &mut self.tracker) {
                        report.visits.push((id, visit));
                    }
                }
                Contact::AsteroidPair(..) => {}
            }
        }

        match self.tracker.status() {
            GameStatus::Lost => info!("Game over: all lives lost"),
            GameStatus::Won => info!(
                "Run complete: {}/{} stations visited",
                self.tracker.stations_visited(),
                self.tracker.total_stations()
            ),
            _ => {}
        }
        report
    }

    /// Every overlapping pair this tick, in a stable order.  Visited stations
    /// are inert and never reported.
    fn detect_overlaps(&self) -> Vec<Contact> {
        let ship = &self.ship.body;
        let mut overlaps = Vec::new();
        for (i, asteroid) in self.asteroids.iter().enumerate() {
            if ship.overlaps(&asteroid.body) {
                overlaps.push(Contact::ShipAsteroid(AsteroidId(i)));
            }
        }
        for (i, station) in self.stations.iter().enumerate() {
            if !station.visited && ship.overlaps(&station.body) {
                overlaps.push(Contact::ShipStation(StationId(i)));
            }
        }
        for i in 0..self.asteroids.len() {
            for j in (i + 1)..self.asteroids.len() {
                if self.asteroids[i].body.overlaps(&self.asteroids[j].body) {
                    overlaps.push(Contact::asteroid_pair(AsteroidId(i), AsteroidId(j)));
                }
            }
        }
        overlaps
    }
}

/// Two distinct mutable elements of one slice.  `i < j` is required.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

// ── Field generation ──────────────────────────────────────────────────────────

/// Uniform-random asteroid: position anywhere in the map plus the spawn
/// overhang, integer drift velocity and integer spin.
pub fn random_asteroid<R: Rng + ?Sized>(rng: &mut R, cfg: &FlightConfig) -> KinematicBody {
    let overhang = cfg.asteroid_spawn_overhang;
    let position = Vec2::new(
        rng.gen_range(-overhang..=cfg.map_width + overhang),
        rng.gen_range(-overhang..=cfg.map_height + overhang),
    );
    let drift = cfg.asteroid_drift_range;
    let spin = cfg.asteroid_spin_range;
    KinematicBody {
        linvel: Vec2::new(
            rng.gen_range(-drift..=drift) as f32,
            rng.gen_range(-drift..=drift) as f32,
        ),
        angvel: rng.gen_range(-spin..=spin) as f32,
        ..KinematicBody::at(position, cfg.asteroid_collider_size)
    }
}

/// Uniform-random station position kept `station_spawn_margin` inside the map.
/// Overlap between stations is not prevented.
pub fn random_station<R: Rng + ?Sized>(rng: &mut R, cfg: &FlightConfig) -> KinematicBody {
    let margin = cfg.station_spawn_margin;
    let position = Vec2::new(
        rng.gen_range(margin..=cfg.map_width - margin),
        rng.gen_range(margin..=cfg.map_height - margin),
    );
    KinematicBody::at(position, cfg.station_collider_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_field_respects_placement_rules() {
        let cfg = FlightConfig::default();
        let scene = Scene::generate(cfg.clone(), 11);
        assert_eq!(scene.asteroids().len(), cfg.asteroid_count);
        assert_eq!(scene.stations().len(), cfg.station_count);
        assert_eq!(scene.tracker().total_stations(), cfg.station_count as u32);

        for a in scene.asteroids() {
            assert!(a.body.position.x >= -100.0 && a.body.position.x <= 5100.0);
            assert!(a.body.linvel.x.abs() <= 50.0 && a.body.linvel.y.abs() <= 50.0);
            assert!(a.body.angvel.abs() <= 100.0);
        }
        for s in scene.stations() {
            assert!(s.body.position.x >= 100.0 && s.body.position.x <= 4900.0);
            assert!(s.body.position.y >= 100.0 && s.body.position.y <= 4900.0);
            assert_eq!(s.body.linvel, Vec2::ZERO);
        }
        assert_eq!(scene.ship.body.position, Vec2::new(2500.0, 2500.0));
    }

    #[test]
    fn same_seed_same_field() {
        let a = Scene::generate(FlightConfig::default(), 5);
        let b = Scene::generate(FlightConfig::default(), 5);
        assert_eq!(a.asteroids(), b.asteroids());
        assert_eq!(a.stations(), b.stations());
    }

    #[test]
    fn asteroid_pair_key_is_unordered() {
        assert_eq!(
            Contact::asteroid_pair(AsteroidId(4), AsteroidId(1)),
            Contact::asteroid_pair(AsteroidId(1), AsteroidId(4))
        );
    }

    #[test]
    fn pair_mut_returns_both_elements() {
        let mut v = vec![1, 2, 3, 4];
        let (a, b) = pair_mut(&mut v, 1, 3);
        std::mem::swap(a, b);
        assert_eq!(v, vec![1, 4, 3, 2]);
    }
}
