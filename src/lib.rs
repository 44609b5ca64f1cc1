//! Refuel: an arcade space-flight game built with Bevy and Rapier2D.
//!
//! The ship threads an asteroid field in search of refuelling stations.
//! Each asteroid strike costs a life; each first station visit restores
//! every life and counts toward the win.
//!
//! The flight and collision rules live in plain, engine-free modules
//! ([`kinematics`], [`flight`], [`governor`], [`collision`], [`game_state`])
//! that work in map space (y down, clockwise rotation, spin in degrees/s).
//! [`scene`] drives them as a headless, deterministic tick loop; the Bevy
//! systems in [`ship`], [`asteroid`], [`station`] and [`simulation`] drive the
//! same rules on top of Rapier, converting through [`frame`].

pub mod asteroid;
pub mod asteroid_rendering;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod flight;
pub mod frame;
pub mod game_state;
pub mod governor;
pub mod graphics;
pub mod kinematics;
pub mod rendering;
pub mod scene;
pub mod ship;
pub mod simulation;
pub mod station;
