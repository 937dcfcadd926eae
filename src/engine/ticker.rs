//! Tick scheduling
//!
//! A `TickSource` decides *whether* frames are being delivered; the engine
//! decides what a frame does. Browsers drive frames from
//! `requestAnimationFrame`, tests and the headless binary drive them by hand.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::FRAME_MS;

/// Something that delivers frames to the engine until stopped
pub trait TickSource {
    /// Begin delivering frames. No-op if already running.
    fn start(&mut self);
    /// Stop delivering frames. Idempotent; no frame may arrive afterwards.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Caller-driven ticks. Clones share the running flag so a test can watch
/// the engine start and stop its scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    running: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times scheduling was (re)started
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self) {
        if !self.running.get() {
            self.running.set(true);
            self.starts.set(self.starts.get() + 1);
        }
    }

    fn stop(&mut self) {
        self.running.set(false);
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Converts frame timestamps (ms) into clamped time units
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next frame counts as one nominal unit
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Time units elapsed since the previous call
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let units = match self.last_ms {
            Some(last) => ((now_ms - last) / FRAME_MS) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        crate::clamp_delta(units)
    }
}
