//! Player preferences
//!
//! Haptics are a stored choice; reduced motion follows the host's
//! accessibility preference and is never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::HAPTICS_KEY;
use crate::persistence::{KeyValueStore, read_or_none, write_best_effort};

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // === Accessibility ===
    /// Reduced motion (no scrolling grid, no orb pulse, no glow blur)
    pub reduced_motion: bool,

    // === Feedback ===
    /// Vibrate on run start, level-up and game over
    pub haptics_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            haptics_enabled: true,
        }
    }
}

impl Settings {
    /// Scrolling background grid
    pub fn grid_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Orb size pulsing
    pub fn pulse_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Soft glow halos around obstacles and the avatar
    pub fn glow_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Load stored preferences; anything missing or garbled keeps its default
    pub fn load(store: &dyn KeyValueStore, reduced_motion: bool) -> Self {
        let haptics_enabled = read_or_none(store, HAPTICS_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
            .unwrap_or(true);
        Self {
            reduced_motion,
            haptics_enabled,
        }
    }

    /// Persist stored preferences (best effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        write_best_effort(store, HAPTICS_KEY, &self.haptics_enabled.to_string());
        log::info!("Settings saved");
    }
}
