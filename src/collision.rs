//! Collision resolver: contact-start detection and the response rules for
//! ship × asteroid, ship × station and asteroid × asteroid overlaps.
//!
//! ## Contact-start
//!
//! Broad-phase detection reports every pair that overlaps *this* tick.  A
//! sustained overlap must only be answered once, so [`ContactTracker`]
//! compares the current overlap set against the previous tick's and passes
//! on only the pairs that are new.  A pair that separates and touches again
//! counts as a new contact.
//!
//! ## Response rules
//!
//! | Contact           | Effect                                                        |
//! |-------------------|---------------------------------------------------------------|
//! | Ship × Asteroid   | −1 life; asteroid flung away at bounce speed with random spin; ship recoils |
//! | Ship × Station    | first visit only: lives reset, visited +1, station goes inert; last one wins |
//! | Asteroid × Asteroid | equal-mass impulse along the centre line (engine default in the live game) |
//!
//! Every resolver checks the tracker first, so contacts that arrive after
//! the run has ended (even later in the same tick) change nothing.

use crate::config::FlightConfig;
use crate::game_state::GameTracker;
use crate::kinematics::KinematicBody;
use bevy::math::Vec2;
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

// ── Contact-start tracking ────────────────────────────────────────────────────

/// Remembers last tick's overlapping pairs and reports only new ones.
#[derive(Debug, Clone)]
pub struct ContactTracker<K> {
    previous: HashSet<K>,
}

impl<K> Default for ContactTracker<K> {
    fn default() -> Self {
        Self {
            previous: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> ContactTracker<K> {
    /// Replace the remembered overlap set with `overlaps` and return the pairs
    /// that were not overlapping last tick, in the order they were reported.
    pub fn begin_tick<I>(&mut self, overlaps: I) -> Vec<K>
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = HashSet::new();
        let mut started = Vec::new();
        for key in overlaps {
            if current.insert(key) && !self.previous.contains(&key) {
                started.push(key);
            }
        }
        self.previous = current;
        started
    }

    /// Drop a pair from the remembered set, e.g. when one side goes inert.
    pub fn forget(&mut self, key: &K) {
        self.previous.remove(key);
    }

    /// Pairs currently remembered as overlapping.
    pub fn active(&self) -> impl Iterator<Item = &K> {
        self.previous.iter()
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.previous.contains(key)
    }
}

// ── Ship × Asteroid ───────────────────────────────────────────────────────────

/// Outcome of a ship striking an asteroid; drives the one-shot hit cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidImpact {
    /// Ship → asteroid angle (radians, map space).
    pub angle: f32,
    /// Spin (deg/s) assigned to the asteroid.
    pub spin: f32,
    /// Lives left after the hit.
    pub lives_left: i32,
}

/// Apply the ship × asteroid response.  Returns `None` if the run is not
/// `Running`, in which case nothing is changed.
pub fn resolve_ship_asteroid<R: Rng + ?Sized>(
    ship: &mut KinematicBody,
    asteroid: &mut KinematicBody,
    tracker: &mut GameTracker,
    rng: &mut R,
    cfg: &FlightConfig,
) -> Option<AsteroidImpact> {
    if !tracker.lose_life() {
        return None;
    }

    let delta = asteroid.position - ship.position;
    let angle = delta.y.atan2(delta.x);
    let away = Vec2::new(angle.cos(), angle.sin());

    asteroid.linvel = away * cfg.asteroid_bounce_speed;
    let spin = rng.gen_range(-cfg.asteroid_spin_range..=cfg.asteroid_spin_range) as f32;
    asteroid.angvel = spin;
    ship.linvel = -away * cfg.ship_recoil_speed;

    debug!(
        "ship struck asteroid at {:.1}°; lives left {}",
        angle.to_degrees(),
        tracker.lives()
    );

    Some(AsteroidImpact {
        angle,
        spin,
        lives_left: tracker.lives(),
    })
}

// ── Ship × Station ────────────────────────────────────────────────────────────

/// Outcome of a first visit to a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationVisit {
    pub stations_visited: u32,
    /// This visit completed the run.
    pub won: bool,
}

/// Apply the ship × station response.  Already-visited stations and
/// non-running states return `None` and change nothing.
pub fn resolve_ship_station(visited: &mut bool, tracker: &mut GameTracker) -> Option<StationVisit> {
    if *visited || !tracker.visit_station() {
        return None;
    }
    *visited = true;

    debug!(
        "station visited ({}/{})",
        tracker.stations_visited(),
        tracker.total_stations()
    );

    Some(StationVisit {
        stations_visited: tracker.stations_visited(),
        won: tracker.is_terminal(),
    })
}

// ── Asteroid × Asteroid ───────────────────────────────────────────────────────

/// Equal-mass impulse along the line between centres.
///
/// Only approaching pairs are changed; coincident centres have no defined
/// normal and are left alone.  `restitution` of 1.0 swaps the normal
/// velocity components exactly.
pub fn resolve_asteroid_pair(a: &mut KinematicBody, b: &mut KinematicBody, restitution: f32) {
    let normal = (b.position - a.position).normalize_or_zero();
    if normal == Vec2::ZERO {
        return;
    }
    let closing = (b.linvel - a.linvel).dot(normal);
    if closing >= 0.0 {
        return;
    }
    let impulse = -(1.0 + restitution) * closing * 0.5;
    a.linvel -= normal * impulse;
    b.linvel += normal * impulse;
}
