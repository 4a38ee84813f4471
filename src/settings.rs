//! Player settings and preferences
//!
//! Persisted as JSON in LocalStorage, separate from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::palette::SkinColors;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 600,
            QualityPreset::High => 2000,
        }
    }

    /// Stars in the background field
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 250,
            QualityPreset::Medium => 600,
            QualityPreset::High => 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (explosions, sparkles, collect streams)
    pub particles: bool,
    /// Screen shake when the climber is hit
    pub screen_shake: bool,
    /// Nebulae, backdrop planets, comets and UFOs
    pub background_effects: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Player ===
    /// Skin name ("earth", "mars", ...) or a custom `#rrggbb` color
    #[serde(default = "default_skin")]
    pub skin: String,
    #[serde(default)]
    pub player_name: String,
}

fn default_skin() -> String {
    "earth".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            background_effects: true,
            reduced_motion: false,
            skin: default_skin(),
            player_name: String::new(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the decorative backdrop for performance
        if preset == QualityPreset::Low {
            self.background_effects = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Player planet colors for the configured skin
    pub fn skin_colors(&self) -> SkinColors {
        SkinColors::resolve(&self.skin)
    }

    /// Name recorded on the leaderboard
    pub fn display_name(&self) -> &str {
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() { "Player" } else { trimmed }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "space_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
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

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {:?}", e),
            },
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Skin, WHITE};

    #[test]
    fn test_particles_off_means_zero_cap() {
        let mut s = Settings::default();
        assert_eq!(s.max_particles(), 600);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut s = Settings::default();
        assert!(s.effective_screen_shake());
        s.reduced_motion = true;
        assert!(!s.effective_screen_shake());
    }

    #[test]
    fn test_low_preset_drops_backdrop() {
        let s = Settings::from_preset(QualityPreset::Low);
        assert!(!s.background_effects);
        assert_eq!(s.quality.star_count(), 250);
    }

    #[test]
    fn test_display_name_defaults() {
        let mut s = Settings::default();
        assert_eq!(s.display_name(), "Player");
        s.player_name = "  Vega ".to_string();
        assert_eq!(s.display_name(), "Vega");
    }

    #[test]
    fn test_json_roundtrip_keeps_skin() {
        let mut s = Settings::default();
        s.skin = "lava".to_string();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.skin, "lava");
        assert_eq!(back.skin_colors(), SkinColors::from(Skin::Lava));
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
    }

    #[test]
    fn test_unknown_skin_paints_white() {
        let json = r#"{"quality":"High","particles":true,"screen_shake":true,
            "background_effects":true,"reduced_motion":false,"skin":"pluto"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.skin_colors().body, WHITE);
        assert_eq!(s.player_name, "");
    }

    #[test]
    fn test_missing_skin_defaults_to_earth() {
        let json = r#"{"quality":"Low","particles":false,"screen_shake":true,
            "background_effects":false,"reduced_motion":true}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.skin_colors(), SkinColors::from(Skin::Earth));
        assert_eq!(s.max_particles(), 0);
    }
}
