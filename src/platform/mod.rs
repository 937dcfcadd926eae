//! Platform abstraction layer
//!
//! Host-provided capabilities the engine calls but never implements:
//! - Score sharing (social cast or clipboard fallback)
//! - Add-to-favorites
//! - Haptic pulses
//! - Mini-app environment detection
//!
//! Every capability reports an explicit outcome instead of failing. An
//! unavailable capability looks exactly like a declined one.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::BrowserHost;

use crate::consts::{APP_NAME, SHARE_URL};

/// Vibration intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStrength {
    Light,
    Medium,
    Heavy,
}

impl HapticStrength {
    /// Pulse length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        match self {
            HapticStrength::Light => 10,
            HapticStrength::Medium => 25,
            HapticStrength::Heavy => 50,
        }
    }
}

/// How a score share was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMethod {
    /// Composed as a post in the host social client
    Cast,
    /// Copied to the clipboard
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOutcome {
    pub success: bool,
    pub method: ShareMethod,
}

impl ShareOutcome {
    pub fn failed() -> Self {
        Self {
            success: false,
            method: ShareMethod::Clipboard,
        }
    }
}

/// Receives a share outcome once the host has finished (or given up)
pub type ShareDone = Box<dyn FnOnce(ShareOutcome)>;

/// Capabilities offered by whatever hosts the game
pub trait HostCapabilities {
    /// Tell the host the game is ready to show; returns whether we're in a mini-app host
    fn ready(&mut self) -> bool {
        false
    }

    fn is_mini_app(&self) -> bool {
        false
    }

    /// Hosts may finish later; `done` runs exactly once either way
    fn share_score(&mut self, _score: u64, done: ShareDone) {
        done(ShareOutcome::failed());
    }

    fn add_to_favorites(&mut self) -> bool {
        false
    }

    /// Returns true if a pulse was actually triggered
    fn haptic(&mut self, _strength: HapticStrength) -> bool {
        false
    }
}

/// No host at all (native, tests). Every capability is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostCapabilities for NoHost {}

/// Text posted or copied when sharing a score
pub fn share_text(score: u64) -> String {
    format!(
        "🚀 I scored {} in {APP_NAME}! Can you beat me?",
        format_thousands(score)
    )
}

/// Share text plus link, as copied to the clipboard
pub fn share_message(score: u64) -> String {
    format!("{}\n{SHARE_URL}", share_text(score))
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
