//! Game settings
//!
//! Persisted as JSON: LocalStorage in the browser, a file on native.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::renderer::Color;

/// Tunable parameters for the ship and the frame loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ship ===
    /// Pixels moved per frame while a direction is held
    pub speed: f32,
    pub ship_width: f32,
    pub ship_height: f32,
    /// Gap between ship and bottom edge at spawn
    pub spawn_margin: f32,

    // === Look ===
    /// CSS hex colour painted behind the ship
    pub background: String,
    /// Remote image used as the ship sprite
    pub sprite_url: String,

    // === Shot ===
    /// Space bar raises an alert
    pub shot_enabled: bool,
    pub shot_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            background: BACKGROUND_COLOR.to_owned(),
            sprite_url: SPRITE_URL.to_owned(),

            shot_enabled: true,
            shot_message: SHOT_MESSAGE.to_owned(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(Error::InvalidSettings(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        for (name, value) in [("ship_width", self.ship_width), ("ship_height", self.ship_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.spawn_margin.is_finite() {
            return Err(Error::InvalidSettings("spawn_margin must be finite".into()));
        }
        self.background_color()?;
        Ok(())
    }

    /// Parsed background colour
    pub fn background_color(&self) -> Result<Color> {
        self.background.parse()
    }

    /// Resolve settings from whatever LocalStorage held. The flag is true
    /// when the stored copy is missing or unusable and should be rewritten.
    pub fn from_stored(json: Option<&str>) -> (Self, bool) {
        let Some(json) = json else {
            log::info!("No stored settings, using defaults");
            return (Self::default(), true);
        };
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from LocalStorage");
                (settings, false)
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                (Self::default(), true)
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "shipyard_arcade_settings";

    /// Load settings from LocalStorage (WASM only). Missing or invalid
    /// entries are replaced with the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("LocalStorage unavailable, using default settings");
            return Self::default();
        };

        let stored = storage.get_item(Self::STORAGE_KEY).ok().flatten();
        let (settings, rewrite) = Self::from_stored(stored.as_deref());
        if rewrite {
            settings.save(&storage);
        }
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, storage: &web_sys::Storage) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:?}", e),
        }
    }
}
