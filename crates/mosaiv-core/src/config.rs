use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Application configuration, persisted as JSON next to the executable's
/// config directory. Missing or unreadable files fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Viewport bounds the display scaler targets.
    pub max_display_width: u32,
    pub max_display_height: u32,
    /// Hard upper bound on the mosaic cell count, before the per-image
    /// density bound is applied.
    pub cell_count_cap: u32,
    /// Initial slider position for a freshly loaded image.
    pub default_cell_count: u32,
    /// Byte budget for decoded images held by the engine. `None` means
    /// unbounded.
    #[serde(default)]
    pub image_store_limit: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_display_width: 1280,
            max_display_height: 720,
            cell_count_cap: 4096,
            default_cell_count: 256,
            // Two 4K frames: enough for a source plus its working copy.
            image_store_limit: Some(2 * 3840 * 2160 * 4),
        }
    }
}

impl AppConfig {
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config load failed ({e}), using defaults");
                Self::default()
            }
        }
    }
}
