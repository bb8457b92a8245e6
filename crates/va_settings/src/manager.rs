use std::sync::{Arc, RwLock};

use crate::Settings;

/// Unified config manager.
pub struct ConfigManager {
    settings: Arc<RwLock<Settings>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new config manager (loads settings once and caches them).
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    /// Create a config manager around pre-built settings (tests, embedding).
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Get a snapshot copy of current settings.
    pub fn get(&self) -> Settings {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Get the shared settings reference.
    pub fn get_shared(&self) -> Arc<RwLock<Settings>> {
        Arc::clone(&self.settings)
    }

    /// Reload settings from disk.
    pub fn reload(&mut self) {
        let new_settings = Settings::load();
        if let Ok(mut guard) = self.settings.write() {
            *guard = new_settings;
        }
    }

    // Convenience accessors.

    #[inline]
    pub fn default_color(&self) -> String {
        self.get().default_color
    }

    #[inline]
    pub fn time_window_seconds(&self) -> f64 {
        self.get().time_window_seconds
    }

    #[inline]
    pub fn show_all_annotations(&self) -> bool {
        self.get().show_all_annotations
    }

    #[inline]
    pub fn autosave_on_comment(&self) -> bool {
        self.get().autosave_on_comment
    }

    #[inline]
    pub fn history_depth(&self) -> usize {
        self.get().history_depth
    }

    #[inline]
    pub fn api_base_url(&self) -> String {
        self.get().api_base_url
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn accessors_reflect_wrapped_settings() {
        let mut settings = super::Settings::default();
        settings.default_color = "#123456".to_string();
        settings.history_depth = 10;

        let manager = super::ConfigManager::with_settings(settings);
        assert_eq!(manager.default_color(), "#123456");
        assert_eq!(manager.history_depth(), 10);
        assert_eq!(manager.time_window_seconds(), 3.0);
    }
}
