//! Game configuration (window, input, audio). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Touch-look sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub touch_sensitivity: f32,
    /// Master audio volume 0.0-1.0.
    #[serde(default = "default_volume")]
    pub master_volume: f64,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_volume() -> f64 {
    0.8
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            touch_sensitivity: default_sensitivity(),
            master_volume: default_volume(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. Missing or invalid files fall back
    /// to defaults (logged at warn).
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: GameConfig = ron::from_str("(window_width: 1920)").unwrap();
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 720);
        assert_eq!(config.touch_sensitivity, 1.0);
        assert_eq!(config.master_volume, 0.8);
    }
}
