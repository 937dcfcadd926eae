//! Game state and core simulation types
//!
//! One `GameState` owns the avatar, every falling entity and the run
//! counters. Nothing here is global, so any number of runs can exist side by
//! side (tests lean on that heavily).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// No run in progress, waiting for `start`
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended on an obstacle hit
    GameOver,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Playing => "playing",
            RunStatus::GameOver => "gameOver",
        }
    }
}

/// The player's avatar. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub size: Vec2,
    /// Desired x written by input, approached a little every tick
    pub target_x: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.avatar_width, tuning.avatar_height),
            target_x: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Largest x that keeps the avatar inside a field of `field_width`
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.size.x).max(0.0)
    }

    /// Center horizontally, sit `bottom_offset` above the bottom edge, stop moving
    pub fn place_at_start(&mut self, field: Vec2, bottom_offset: f32) {
        self.pos.x = (field.x / 2.0 - self.size.x / 2.0).max(0.0);
        self.pos.y = field.y - bottom_offset;
        self.target_x = self.pos.x;
    }

    /// Ease toward `target_x` by `damping` of the remaining gap per time unit
    pub fn approach_target(&mut self, damping: f32, dt: f32) {
        let dx = self.target_x - self.pos.x;
        self.pos.x += dx * (damping * dt).min(1.0);
    }
}

/// A falling bar the avatar must avoid. `pos` is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per time unit, fixed at spawn
    pub speed: f32,
}

impl Obstacle {
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A bonus orb. `pos` is its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Drives the visual pulse only
    pub pulse_phase: f32,
}

/// Complete state of one engine instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: RunStatus,
    pub score: u64,
    /// Fractional points not yet credited to `score`
    pub score_carry: f32,
    /// Difficulty level in `[1, max_level]`
    pub level: u32,
    pub elapsed_ticks: u64,
    /// Play-field size in pixels (width, height)
    pub field: Vec2,
    pub avatar: Avatar,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
}

impl GameState {
    /// Create an idle state for a field of `width` x `height`
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let field = Vec2::new(width, height);
        let mut avatar = Avatar::new(tuning);
        avatar.place_at_start(field, tuning.avatar_bottom_offset);
        Self {
            status: RunStatus::Idle,
            score: 0,
            score_carry: 0.0,
            level: 1,
            elapsed_ticks: 0,
            field,
            avatar,
            obstacles: Vec::new(),
            orbs: Vec::new(),
        }
    }

    /// Wipe run counters and entities, recenter the avatar and begin playing
    pub fn begin_run(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.score_carry = 0.0;
        self.level = 1;
        self.elapsed_ticks = 0;
        self.obstacles.clear();
        self.orbs.clear();
        self.avatar.size = Vec2::new(tuning.avatar_width, tuning.avatar_height);
        self.avatar.place_at_start(self.field, tuning.avatar_bottom_offset);
        self.status = RunStatus::Playing;
    }

    /// Change field bounds without resetting the run
    pub fn resize(&mut self, width: f32, height: f32, tuning: &Tuning) {
        self.field = Vec2::new(width, height);
        let max_x = self.avatar.max_x(width);
        self.avatar.pos.y = height - tuning.avatar_bottom_offset;
        self.avatar.pos.x = self.avatar.pos.x.clamp(0.0, max_x);
        self.avatar.target_x = self.avatar.pos.x;
    }

    pub fn is_playing(&self) -> bool {
        self.status == RunStatus::Playing
    }
}
