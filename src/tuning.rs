//! Data-driven game balance
//!
//! Every number that shapes how a run plays lives here so that a JSON blob
//! can override it without a rebuild. Defaults are the shipped balance.

use serde::{Deserialize, Serialize};

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    pub avatar_width: f32,
    pub avatar_height: f32,
    /// Keyboard nudge is `avatar_speed * 8` pixels per key press
    pub avatar_speed: f32,
    /// Distance of the avatar's top edge from the bottom of the field
    pub avatar_bottom_offset: f32,
    /// Fraction of the remaining distance to target covered per time unit
    pub avatar_damping: f32,
    /// Inward shrink of the avatar hitbox on every side
    pub hitbox_margin: f32,

    // === Obstacles ===
    pub obstacle_min_width: f32,
    pub obstacle_max_width: f32,
    pub obstacle_height: f32,
    pub obstacle_base_speed: f32,
    pub obstacle_speed_increment: f32,
    /// Ticks between spawns at level 0
    pub obstacle_base_cadence: u32,
    /// Ticks removed from the cadence per difficulty level
    pub obstacle_cadence_step: u32,
    pub obstacle_min_cadence: u32,

    // === Orbs ===
    pub orb_radius: f32,
    /// Spawn probability per time unit
    pub orb_spawn_chance: f32,
    pub orb_speed: f32,
    pub orb_points: u64,
    pub orb_pulse_step: f32,

    // === Difficulty ===
    pub difficulty_interval: u64,
    pub max_level: u32,

    // === Scoring ===
    /// ~1 point per second at 60 fps
    pub points_per_unit: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            avatar_width: 40.0,
            avatar_height: 40.0,
            avatar_speed: 8.0,
            avatar_bottom_offset: 100.0,
            avatar_damping: 0.3,
            hitbox_margin: 4.0,

            obstacle_min_width: 30.0,
            obstacle_max_width: 80.0,
            obstacle_height: 20.0,
            obstacle_base_speed: 3.0,
            obstacle_speed_increment: 0.15,
            obstacle_base_cadence: 60,
            obstacle_cadence_step: 3,
            obstacle_min_cadence: 15,

            orb_radius: 15.0,
            orb_spawn_chance: 0.02,
            orb_speed: 2.0,
            orb_points: 20,
            orb_pulse_step: 0.1,

            difficulty_interval: 500,
            max_level: 20,

            points_per_unit: 0.017,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Difficulty level reached after `elapsed_ticks`, in `[1, max_level]`
    pub fn level_for(&self, elapsed_ticks: u64) -> u32 {
        let interval = self.difficulty_interval.max(1);
        let level = 1u64.saturating_add(elapsed_ticks / interval);
        level.min(self.max_level.max(1) as u64) as u32
    }

    /// Ticks between obstacle spawns at `level` (never below the floor, never zero)
    pub fn spawn_cadence(&self, level: u32) -> u32 {
        self.obstacle_base_cadence
            .saturating_sub(self.obstacle_cadence_step.saturating_mul(level))
            .max(self.obstacle_min_cadence)
            .max(1)
    }

    /// Fall speed given to obstacles spawned at `level`
    pub fn obstacle_speed(&self, level: u32) -> f32 {
        self.obstacle_base_speed + self.obstacle_speed_increment * level as f32
    }
}
