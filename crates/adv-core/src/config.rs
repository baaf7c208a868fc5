//! Generation settings

use serde::{Deserialize, Serialize};

use crate::error::AdventureError;
use crate::repair::{DEFAULT_ROOM_CAP, RepairOptions};
use crate::rng::new_seed;

/// Fewest rooms a generation request may ask for
pub const MIN_ROOMS: usize = 6;
/// Most rooms a generation request may ask for
pub const MAX_ROOMS: usize = 40;
pub const DEFAULT_ROOMS: usize = 24;
pub const DEFAULT_TITLE: &str = "Untitled Adventure";
pub const DEFAULT_THEME: &str = "ruins";

/// Everything needed to generate one adventure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub title: String,
    /// Requested room count before capping
    pub rooms: usize,
    /// Fixed seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub theme: String,
    pub cap: usize,
    pub reconnect_after_cap: bool,
    pub lore: Option<String>,
    pub style_guide: Option<Vec<String>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            rooms: DEFAULT_ROOMS,
            seed: None,
            theme: DEFAULT_THEME.to_string(),
            cap: DEFAULT_ROOM_CAP,
            reconnect_after_cap: false,
            lore: None,
            style_guide: None,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AdventureError> {
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&self.rooms) {
            return Err(AdventureError::RoomCountOutOfRange {
                requested: self.rooms,
                min: MIN_ROOMS,
                max: MAX_ROOMS,
            });
        }
        self.repair_options().validate()
    }

    pub fn repair_options(&self) -> RepairOptions {
        RepairOptions {
            cap: self.cap,
            reconnect_after_cap: self.reconnect_after_cap,
        }
    }

    /// The configured seed, or a freshly drawn one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(new_seed)
    }
}
