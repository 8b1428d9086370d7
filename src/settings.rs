//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::LaunchDirection;

/// Invalid or unreadable settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board {width}x{height} is smaller than {min}x{min}")]
    BoardTooSmall { width: i32, height: i32, min: i32 },
    #[error("board {width}x{height} is larger than {max}x{max}")]
    BoardTooLarge { width: i32, height: i32, max: i32 },
    #[error("tick period must be at least one frame")]
    ZeroTickPeriod,
    #[error("sound set {0} does not exist")]
    UnknownSoundSet(u8),
    #[error("could not write settings: {0}")]
    Storage(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Board width in cells, wall ring included
    pub board_width: i32,
    /// Board height in cells, wall ring included
    pub board_height: i32,
    /// Engine frames between simulation ticks
    pub tick_frames: u32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === Spawning ===
    /// Direction for new beads
    pub launch_direction: LaunchDirection,

    // === Visual Effects ===
    /// Border marquee lights
    pub marquee: bool,

    // === Audio ===
    /// Active sound set (0-based)
    pub sound_set: u8,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            tick_frames: TICK_FRAMES,
            seed: None,

            launch_direction: LaunchDirection::Random,

            marquee: true,

            sound_set: 0,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the settings describe a playable board
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = (self.board_width, self.board_height);
        if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
            return Err(SettingsError::BoardTooSmall {
                width,
                height,
                min: MIN_BOARD_SIZE,
            });
        }
        if width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
            return Err(SettingsError::BoardTooLarge {
                width,
                height,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.tick_frames == 0 {
            return Err(SettingsError::ZeroTickPeriod);
        }
        if self.sound_set >= SOUND_SETS {
            return Err(SettingsError::UnknownSoundSet(self.sound_set));
        }
        Ok(())
    }

    /// Seconds between simulation ticks
    pub fn tick_period(&self) -> f32 {
        tick_period(self.tick_frames)
    }

    /// Screen size in cells: the board plus the control panel below it
    pub fn screen_size(&self) -> (i32, i32) {
        (self.board_width, self.board_height + SCREEN_EXTRA_ROWS)
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "bead_bounce_settings";

    /// Serialize and hand `(key, json)` to `write`
    pub fn write_with<E: std::fmt::Debug>(
        &self,
        write: impl FnOnce(&str, &str) -> Result<(), E>,
    ) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        write(Self::STORAGE_KEY, &json).map_err(|e| SettingsError::Storage(format!("{:?}", e)))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.write_with(|key, json| storage.set_item(key, json)) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
