//! Neon Dodge - An endless neon dodger arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `renderer`: Frame geometry and the WebGPU pipeline that presents it
//! - `engine`: Run lifecycle, tick scheduling and host callbacks
//! - `input`: Pointer/touch/keyboard to avatar target translation
//! - `persistence`: Best score storage
//! - `platform`: Host capabilities (share, haptics, favorites)
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod error;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{Callbacks, Engine, EngineParts};
pub use error::{EngineError, RenderError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Display name used in share text and logs
    pub const APP_NAME: &str = "NEON DODGE";
    pub const APP_TAGLINE: &str = "Dodge. Survive. Score.";
    /// Link appended to shared scores when the host doesn't provide one
    pub const SHARE_URL: &str = "http://localhost:3000";

    /// Nominal frame interval in milliseconds (one time unit, ~60 Hz)
    pub const FRAME_MS: f64 = 16.67;
    /// Upper bound on a single tick's time units (tab suspension, stalls)
    pub const MAX_DELTA_UNITS: f32 = 2.0;
    pub const MIN_DELTA_UNITS: f32 = 0.0;

    /// Storage keys
    pub const BEST_SCORE_KEY: &str = "neondodge_best_score";
    pub const HAPTICS_KEY: &str = "neondodge_haptics";
}

/// Clamp a raw time-unit delta into the range the simulation accepts
#[inline]
pub fn clamp_delta(units: f32) -> f32 {
    if units.is_nan() {
        return consts::MIN_DELTA_UNITS;
    }
    units.clamp(consts::MIN_DELTA_UNITS, consts::MAX_DELTA_UNITS)
}
