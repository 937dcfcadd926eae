//! Variable-timestep simulation tick
//!
//! `dt` is measured in time units: multiples of the nominal frame interval.
//! Everything that moves or accrues is scaled by it so a 30 fps device plays
//! the same game as a 120 fps one.

use glam::Vec2;

use super::collision::{avatar_collects_orb, avatar_hits_obstacle};
use super::rng::RandomSource;
use super::state::{GameState, Obstacle, Orb, RunStatus};
use crate::tuning::Tuning;

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// State wasn't `Playing`, nothing changed
    Skipped,
    /// Run continues
    Running,
    /// Avatar hit an obstacle, run is over
    Collided,
}

/// Summary of a single tick for the lifecycle controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// New difficulty level, if it changed this tick
    pub level_up: Option<u32>,
    pub orbs_collected: u32,
}

impl TickReport {
    fn new(outcome: TickOutcome) -> Self {
        Self {
            outcome,
            level_up: None,
            orbs_collected: 0,
        }
    }
}

/// Advance the run by `dt` time units (clamped to `[0, 2]`)
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    dt: f32,
    rng: &mut dyn RandomSource,
) -> TickReport {
    if state.status != RunStatus::Playing {
        return TickReport::new(TickOutcome::Skipped);
    }
    let dt = crate::clamp_delta(dt);
    let mut report = TickReport::new(TickOutcome::Running);

    state.elapsed_ticks += 1;

    // Survival points, fractional remainder carried to the next tick
    state.score_carry += tuning.points_per_unit * dt;
    let whole = state.score_carry.floor();
    state.score += whole as u64;
    state.score_carry -= whole;

    let level = tuning.level_for(state.elapsed_ticks).max(state.level);
    if level != state.level {
        log::debug!("Difficulty level {} -> {}", state.level, level);
        state.level = level;
        report.level_up = Some(level);
    }

    state.avatar.approach_target(tuning.avatar_damping, dt);

    let cadence = tuning.spawn_cadence(state.level) as u64;
    if state.elapsed_ticks % cadence == 0 {
        spawn_obstacle(state, tuning, rng);
    }

    if rng.unit() < tuning.orb_spawn_chance * dt {
        spawn_orb(state, tuning, rng);
    }

    let floor_y = state.field.y;

    // Obstacles: fall, leave, or end the run
    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.y += obstacle.speed * dt;
        if obstacle.pos.y > floor_y {
            state.obstacles.remove(i);
            continue;
        }
        if avatar_hits_obstacle(&state.avatar, &state.obstacles[i], tuning.hitbox_margin) {
            state.status = RunStatus::GameOver;
            report.outcome = TickOutcome::Collided;
            return report;
        }
        i += 1;
    }

    // Orbs: fall, pulse, leave, or get collected
    let mut i = 0;
    while i < state.orbs.len() {
        let orb = &mut state.orbs[i];
        orb.pos.y += orb.speed * dt;
        orb.pulse_phase += tuning.orb_pulse_step * dt;
        if orb.pos.y > floor_y + orb.radius {
            state.orbs.remove(i);
            continue;
        }
        if avatar_collects_orb(&state.avatar, &state.orbs[i]) {
            state.score += tuning.orb_points;
            state.orbs.remove(i);
            report.orbs_collected += 1;
            continue;
        }
        i += 1;
    }

    report
}

/// Drop a new obstacle just above the top edge at the current level's speed
pub fn spawn_obstacle(state: &mut GameState, tuning: &Tuning, rng: &mut dyn RandomSource) {
    let span = (tuning.obstacle_max_width - tuning.obstacle_min_width).max(0.0);
    let width = tuning.obstacle_min_width + rng.unit() * span;
    let x = rng.unit() * (state.field.x - width).max(0.0);

    state.obstacles.push(Obstacle {
        pos: Vec2::new(x, -tuning.obstacle_height),
        size: Vec2::new(width, tuning.obstacle_height),
        speed: tuning.obstacle_speed(state.level),
    });
}

/// Drop a new orb just above the top edge, fully inside the field horizontally
pub fn spawn_orb(state: &mut GameState, tuning: &Tuning, rng: &mut dyn RandomSource) {
    let r = tuning.orb_radius;
    let x = r + rng.unit() * (state.field.x - r * 2.0).max(0.0);
    let phase = rng.unit() * std::f32::consts::TAU;

    state.orbs.push(Orb {
        pos: Vec2::new(x, -r),
        radius: r,
        speed: tuning.orb_speed,
        pulse_phase: phase,
    });
}
