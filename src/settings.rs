//! Game settings and preferences
//!
//! Read from a JSON file at startup: `$FLAPPY_SETTINGS` if set, otherwise
//! `flappy.json` in the working directory. Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ticks per second
    pub target_fps: u32,
    /// Fixed RNG seed; `None` picks a random one per launch
    pub seed: Option<u64>,
    /// Directory holding `sprites/` and `audio/`
    pub asset_dir: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Window ===
    /// Integer scale of the 288x512 playfield
    pub window_scale: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            seed: None,
            asset_dir: PathBuf::from("assets"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            window_scale: 1,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "FLAPPY_SETTINGS";
    /// Default settings file name
    const FILE_NAME: &'static str = "flappy.json";

    /// Load settings from the configured file, falling back to defaults
    pub fn load() -> Self {
        let path = std::env::var_os(Self::ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME));
        Self::load_from(&path)
    }

    /// Load settings from `path`; unreadable or malformed files give defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse and sanitize settings JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(1, 240);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.window_scale = self.window_scale.clamp(1, 4);
        self
    }
}
