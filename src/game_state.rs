//! Game state tracker: lives, station progress and the overall run status.
//!
//! ```text
//! Running ──[lives ≤ 0]──────────────▶ Lost   (terminal)
//! Running ──[visited == total]───────▶ Won    (terminal)
//! Running ◀──────[pause toggle]──────▶ Paused
//! ```
//!
//! Every mutation is a no-op unless the status allows it, so callers do not
//! need to pre-check the status before forwarding an event.

use bevy::prelude::*;

/// Overall run status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Running,
    Paused,
    /// All lives lost.
    Lost,
    /// Every station visited.
    Won,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Lost | GameStatus::Won)
    }
}

/// Lives, station counters and status for the current run.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameTracker {
    lives: i32,
    max_lives: i32,
    stations_visited: u32,
    total_stations: u32,
    status: GameStatus,
}

impl GameTracker {
    pub fn new(max_lives: i32, total_stations: u32) -> Self {
        Self {
            lives: max_lives,
            max_lives,
            stations_visited: 0,
            total_stations,
            status: GameStatus::Running,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn lives(&self) -> i32 {
        self.lives
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn stations_visited(&self) -> u32 {
        self.stations_visited
    }

    #[inline]
    pub fn total_stations(&self) -> u32 {
        self.total_stations
    }

    /// Lives remain.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Paused or terminal: no integration, steering or collision response.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        !self.is_running()
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Flip between `Running` and `Paused`.  Returns the new status.
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            terminal => terminal,
        };
        self.status
    }

    /// Take one life.  Reaching zero ends the run as `Lost`.
    /// Returns `false` (and changes nothing) unless running.
    pub fn lose_life(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.lives -= 1;
        if self.lives <= 0 {
            self.status = GameStatus::Lost;
        }
        true
    }

    /// Count a first visit to a station: full heal, and `Won` once every
    /// station has been visited.  Returns `false` (and changes nothing)
    /// unless running.
    pub fn visit_station(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.lives = self.max_lives;
        self.stations_visited += 1;
        if self.stations_visited >= self.total_stations {
            self.status = GameStatus::Won;
        }
        true
    }
}

/// Read-only snapshot handed to the presentation layer once per tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HudReadout {
    pub lives: i32,
    pub speed: f32,
    pub super_speed: bool,
    pub status: GameStatus,
    pub stations_visited: u32,
    pub total_stations: u32,
}

impl HudReadout {
    pub fn capture(tracker: &GameTracker, speed: f32, super_speed: bool) -> Self {
        Self {
            lives: tracker.lives(),
            speed,
            super_speed,
            status: tracker.status(),
            stations_visited: tracker.stations_visited(),
            total_stations: tracker.total_stations(),
        }
    }
}

/// Run condition: the simulation tick pipeline should execute.
pub fn simulation_running(tracker: Res<GameTracker>) -> bool {
    tracker.is_running()
}
