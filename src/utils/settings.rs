//! User settings, stored as ~/.lander-ext/settings.json.

use super::persistence;
use crate::core::constants::*;
use crate::game::Difficulty;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

/// Missing fields take their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub sound: bool,
    /// Tilt applied while a steering key is held.
    pub tilt_step_degrees: f32,
    /// How long a steering key counts as held after its last repeat.
    pub tilt_hold_ms: u64,
    pub frame_interval_ms: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Directory holding `level<N>.txt`.
    pub assets_dir: PathBuf,
    pub maze_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            sound: true,
            tilt_step_degrees: KEY_TILT_DEGREES,
            tilt_hold_ms: TILT_HOLD_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            assets_dir: PathBuf::from("assets"),
            maze_level: 1,
        }
    }
}

impl Settings {
    /// Load from ~/.lander-ext/, falling back to defaults.
    pub fn load() -> Self {
        match persistence::app_path(SETTINGS_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("settings unavailable, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let settings: Self = persistence::load_json_or_default(path);
        settings.sanitized()
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&persistence::app_path(SETTINGS_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        persistence::save_json(path, self)
    }

    /// Clamp values that would stall the loop or break the canvas.
    pub fn sanitized(mut self) -> Self {
        self.frame_interval_ms = self.frame_interval_ms.clamp(1, 1_000);
        self.canvas_width = self.canvas_width.max(1);
        self.canvas_height = self.canvas_height.max(1);
        if !self.tilt_step_degrees.is_finite() {
            self.tilt_step_degrees = KEY_TILT_DEGREES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lander_settings_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound);
        assert_eq!(settings.frame_interval_ms, FRAME_INTERVAL_MS);
        assert_eq!(settings.maze_level, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_file("partial.json");
        fs::write(&path, r#"{ "sound": false, "difficulty": "Hard" }"#).expect("write");
        let settings = Settings::load_from(&path);
        assert!(!settings.sound);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.canvas_width, DEFAULT_CANVAS_WIDTH);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_sanitize_clamps() {
        let settings = Settings {
            frame_interval_ms: 0,
            canvas_height: 0,
            tilt_step_degrees: f32::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.frame_interval_ms, 1);
        assert_eq!(settings.canvas_height, 1);
        assert!((settings.tilt_step_degrees - KEY_TILT_DEGREES).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_roundtrip() {
        let path = temp_file("roundtrip.json");
        let settings = Settings {
            difficulty: Difficulty::Medium,
            maze_level: 2,
            ..Settings::default()
        };
        settings.save_to(&path).expect("save");
        assert_eq!(Settings::load_from(&path), settings);
        fs::remove_file(path).ok();
    }
}
