//! Input translation
//!
//! Raw keyboard, mouse and touch events all collapse into one signal: the
//! avatar's `target_x`. The simulation only ever reads that field.

use crate::sim::{Avatar, RunStatus};
use crate::tuning::Tuning;

/// Horizontal nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Platform-neutral input event. `x` is in play-field pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Direction),
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    /// Pointer released or left the surface
    PointerUp,
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    /// Touch ended or was cancelled
    TouchEnd,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Drag-relative steering: the avatar follows the finger's displacement
/// from where the drag began, not its absolute position.
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f32,
    avatar_start_x: f32,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Forget any drag in progress (new run, teardown)
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// Apply `event`, updating `avatar.target_x`. Ignored unless playing.
    /// Returns the new target if it changed.
    pub fn handle(
        &mut self,
        event: InputEvent,
        avatar: &mut Avatar,
        field_width: f32,
        status: RunStatus,
        tuning: &Tuning,
    ) -> Option<f32> {
        if status != RunStatus::Playing {
            if matches!(event, InputEvent::PointerUp | InputEvent::TouchEnd) {
                self.drag = None;
            }
            return None;
        }

        let max_x = avatar.max_x(field_width);
        let target = match event {
            InputEvent::Key(direction) => {
                let step = tuning.avatar_speed * 8.0;
                match direction {
                    Direction::Left => (avatar.pos.x - step).max(0.0),
                    Direction::Right => (avatar.pos.x + step).min(max_x),
                }
            }
            InputEvent::PointerDown { x } | InputEvent::TouchStart { x } => {
                self.drag = Some(Drag {
                    start_x: x,
                    avatar_start_x: avatar.pos.x,
                });
                return None;
            }
            InputEvent::PointerMove { x } | InputEvent::TouchMove { x } => {
                let drag = self.drag?;
                (drag.avatar_start_x + (x - drag.start_x)).clamp(0.0, max_x)
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.drag = None;
                return None;
            }
        };

        avatar.target_x = target;
        Some(target)
    }
}
