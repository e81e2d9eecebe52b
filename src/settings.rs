//! Game settings and preferences
//!
//! Stored as JSON. Every field has a default, so a partial file (or no file
//! at all) still gives a complete `Settings`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{CONTROLLER_DEADZONE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::Result;
use crate::highscores;

/// Default settings file name
pub const DEFAULT_PATH: &str = "sb-arcade.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: i32,
    pub window_height: i32,
    /// Start in desktop fullscreen
    pub fullscreen: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// TrueType font used for all text
    pub font_path: PathBuf,
    /// Point size the font is opened at (text is scaled when drawn)
    pub font_size: u16,

    // === Half-Pong ===
    pub highscore_path: PathBuf,

    // === Controller ===
    /// Stick values inside +/- this are ignored
    pub controller_dead_zone: i16,
    /// Platformer stick acceleration relative to the keyboard
    pub controller_sensitivity: f64,

    // === Platformer ===
    /// Custom level pack (JSON); built-in levels when unset
    pub platformer_levels: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            fullscreen: false,

            show_fps: true,
            font_path: PathBuf::from("resources/FreeSans.ttf"),
            font_size: 120,

            highscore_path: PathBuf::from(highscores::DEFAULT_PATH),

            controller_dead_zone: CONTROLLER_DEADZONE,
            controller_sensitivity: 0.5,

            platformer_levels: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file gives the defaults; a file
    /// that doesn't parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values the games can't work with
    fn sanitized(mut self) -> Self {
        self.window_width = self.window_width.max(1);
        self.window_height = self.window_height.max(1);
        self.controller_dead_zone = self.controller_dead_zone.max(0);
        if self.controller_sensitivity.is_nan() || self.controller_sensitivity <= 0.0 {
            log::warn!(
                "controller_sensitivity {} is not positive, using default",
                self.controller_sensitivity
            );
            self.controller_sensitivity = Self::default().controller_sensitivity;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sb-arcade-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("settings.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch("settings-missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch("settings-partial");
        std::fs::write(&path, r#"{"window_width": 1024, "show_fps": false}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.window_width, 1024);
        assert!(!settings.show_fps);
        assert_eq!(settings.window_height, SCREEN_HEIGHT);
        assert_eq!(settings.highscore_path, PathBuf::from("halfpong.save"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let path = scratch("settings-invalid");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_save_round_trip_and_sanitize() {
        let path = scratch("settings-save");
        let mut settings = Settings::default();
        settings.controller_sensitivity = -2.0;
        settings.platformer_levels = Some(PathBuf::from("levels.json"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.controller_sensitivity, 0.5);
        assert_eq!(loaded.platformer_levels, Some(PathBuf::from("levels.json")));
    }
}
