//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only as the `dt` argument of `tick`
//! - Randomness enters only through a `RandomSource`
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, avatar_collects_orb, avatar_hits_obstacle};
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use state::{Avatar, GameState, Obstacle, Orb, RunStatus};
pub use tick::{TickOutcome, TickReport, spawn_obstacle, spawn_orb, tick};
