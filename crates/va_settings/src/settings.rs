use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::defaults::*;

/// Viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Stroke/text color for new annotations.
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Seconds an annotation stays visible past its timestamp.
    #[serde(default = "default_time_window_seconds")]
    pub time_window_seconds: f64,

    /// Bypass the visibility filter and show every annotation.
    #[serde(default = "default_show_all_annotations")]
    pub show_all_annotations: bool,

    /// Persist immediately when a comment is submitted.
    #[serde(default = "default_autosave_on_comment")]
    pub autosave_on_comment: bool,

    /// Maximum undo/redo depth.
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Base URL of the annotation persistence service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory the settings file lives under.
    #[serde(default = "default_config_path")]
    pub config_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            time_window_seconds: default_time_window_seconds(),
            show_all_annotations: default_show_all_annotations(),
            autosave_on_comment: default_autosave_on_comment(),
            history_depth: default_history_depth(),
            api_base_url: default_api_base_url(),
            config_path: default_config_path(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        PathBuf::from(default_config_path()).join(".vidmark")
    }

    fn primary_settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from disk.
    ///
    /// Falls back to defaults (and persists them) if loading fails.
    pub fn load() -> Self {
        let primary = Self::primary_settings_path();

        if let Ok(content) = fs::read_to_string(&primary)
            && let Ok(settings) = serde_json::from_str::<Settings>(&content)
        {
            return settings;
        }

        let default_settings = Self::default();
        let _ = default_settings.save();
        default_settings
    }

    /// Save settings to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::settings_dir();
        fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::primary_settings_path(), content)?;
        Ok(())
    }
}
