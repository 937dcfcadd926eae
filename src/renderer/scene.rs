//! Frame geometry
//!
//! Pure functions from game state to a triangle list. No GPU, no mutation:
//! the same state always produces the same frame.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Avatar, GameState, Obstacle, Orb};
use crate::tuning::Tuning;

/// Background grid spacing in pixels
const GRID_SIZE: f32 = 40.0;
/// Grid scroll in pixels per tick
const GRID_SCROLL: f32 = 0.5;
const CIRCLE_SEGMENTS: u32 = 32;
const OBSTACLE_GLOW: f32 = 15.0;
const AVATAR_GLOW: f32 = 20.0;
const HIGHLIGHT_HEIGHT: f32 = 3.0;

/// Full gameplay frame
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        64 + state.orbs.len() * CIRCLE_SEGMENTS as usize * 12 + state.obstacles.len() * 48,
    );

    background(&mut out, state.field);
    if settings.grid_enabled() {
        grid(&mut out, state.field, state.elapsed_ticks);
    }
    for orb in &state.orbs {
        draw_orb(&mut out, orb, settings.pulse_enabled());
    }
    for obstacle in &state.obstacles {
        draw_obstacle(&mut out, obstacle, settings.glow_enabled());
    }
    draw_avatar(&mut out, &state.avatar, settings.glow_enabled());

    out
}

/// Pre-run frame: background and a static avatar preview at the center.
/// The preview always glows; nothing on it moves.
pub fn build_idle_frame(field: Vec2, tuning: &Tuning) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(64);
    background(&mut out, field);

    let mut preview = Avatar::new(tuning);
    preview.pos = Vec2::new(field.x / 2.0 - tuning.avatar_width / 2.0, field.y / 2.0);
    draw_avatar_body(&mut out, &preview, true);

    out
}

/// Drawn orb radius for a pulse phase
pub fn orb_draw_radius(orb: &Orb, pulse: bool) -> f32 {
    let scale = if pulse {
        1.0 + orb.pulse_phase.sin() * 0.2
    } else {
        1.0
    };
    orb.radius * scale
}

/// y positions of the scrolling grid lines
pub fn grid_lines(height: f32, elapsed_ticks: u64) -> impl Iterator<Item = f32> {
    let offset = (elapsed_ticks as f32 * GRID_SCROLL) % GRID_SIZE;
    (0..)
        .map(move |i| offset + i as f32 * GRID_SIZE)
        .take_while(move |y| *y < height)
}

fn background(out: &mut Vec<Vertex>, field: Vec2) {
    shapes::gradient_rect(
        out,
        Vec2::ZERO,
        field,
        colors::rgba(colors::BACKGROUND, 1.0),
        colors::rgba(colors::DARK_GRAY, 1.0),
    );
}

fn grid(out: &mut Vec<Vertex>, field: Vec2, elapsed_ticks: u64) {
    let color = colors::rgba(colors::PRIMARY, 0.05);
    for y in grid_lines(field.y, elapsed_ticks) {
        shapes::hline(out, y, 0.0, field.x, 1.0, color);
    }
}

fn draw_orb(out: &mut Vec<Vertex>, orb: &Orb, pulse: bool) {
    let radius = orb_draw_radius(orb, pulse);
    shapes::radial_gradient(
        out,
        orb.pos,
        radius * 2.0,
        &[
            (0.0, colors::rgba(colors::ACCENT, 1.0)),
            (0.5, colors::rgba(colors::ACCENT, 0.3)),
            (1.0, colors::transparent(colors::ACCENT)),
        ],
        CIRCLE_SEGMENTS,
    );
    shapes::circle(
        out,
        orb.pos,
        radius * 0.6,
        colors::rgba(colors::ACCENT, 1.0),
        CIRCLE_SEGMENTS,
    );
}

fn draw_obstacle(out: &mut Vec<Vertex>, obstacle: &Obstacle, glow: bool) {
    let min = obstacle.pos;
    let max = obstacle.pos + obstacle.size;
    let danger = colors::rgba(colors::DANGER, 1.0);

    if glow {
        shapes::halo(out, &shapes::rect_outline(min, max), OBSTACLE_GLOW, colors::rgba(colors::DANGER, 0.6));
    }
    shapes::rect(out, min, max, danger);
    shapes::rect(
        out,
        min,
        Vec2::new(max.x, min.y + HIGHLIGHT_HEIGHT.min(obstacle.size.y)),
        colors::rgba(colors::WHITE, 0.3),
    );
}

fn draw_avatar(out: &mut Vec<Vertex>, avatar: &Avatar, glow: bool) {
    draw_avatar_body(out, avatar, glow);
    shapes::circle(
        out,
        avatar.center(),
        avatar.size.x * 0.15,
        colors::rgba(colors::WHITE, 1.0),
        CIRCLE_SEGMENTS / 2,
    );
}

fn draw_avatar_body(out: &mut Vec<Vertex>, avatar: &Avatar, glow: bool) {
    if glow {
        shapes::halo(
            out,
            &shapes::diamond_outline(avatar.pos, avatar.size),
            AVATAR_GLOW,
            colors::rgba(colors::PRIMARY, 0.7),
        );
    }
    shapes::diamond(out, avatar.pos, avatar.size, colors::rgba(colors::PRIMARY, 1.0));
}
