//! Panel settings — recognition configuration and per-utterance voice
//! parameters.

use serde::{Deserialize, Serialize};

/// Settings applied to the recognition engine at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognitionSettings {
    pub continuous: bool,
    pub interim_results: bool,
    /// BCP 47 language tag; `None` lets the engine pick.
    pub lang: Option<String>,
    /// Restart the engine when it ends on its own while still listening.
    pub auto_restart: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            lang: None,
            auto_restart: true,
        }
    }
}

pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 10.0;
pub const MAX_PITCH: f32 = 2.0;

/// Voice parameters copied into every utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UtteranceSettings {
    pub lang: Option<String>,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for UtteranceSettings {
    fn default() -> Self {
        Self {
            lang: None,
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl UtteranceSettings {
    /// Bound rate, pitch and volume to what synthesis engines accept.
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let bound = |v: f32, lo: f32, hi: f32, fallback: f32| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        Self {
            lang: self.lang.clone(),
            voice: self.voice.clone(),
            rate: bound(self.rate, MIN_RATE, MAX_RATE, defaults.rate),
            pitch: bound(self.pitch, 0.0, MAX_PITCH, defaults.pitch),
            volume: bound(self.volume, 0.0, 1.0, defaults.volume),
        }
    }
}

/// Full panel configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub recognition: RecognitionSettings,
    pub synthesis: UtteranceSettings,
}

impl PanelConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_continuous_with_interim_results() {
        let config = PanelConfig::default();
        assert!(config.recognition.continuous);
        assert!(config.recognition.interim_results);
        assert!(config.recognition.auto_restart);
        assert_eq!(config.synthesis.rate, 1.0);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config =
            PanelConfig::from_json(r#"{"recognition":{"lang":"en-US"},"synthesis":{"rate":1.5}}"#)
                .unwrap();
        assert_eq!(config.recognition.lang.as_deref(), Some("en-US"));
        assert!(config.recognition.continuous);
        assert_eq!(config.synthesis.rate, 1.5);
        assert_eq!(config.synthesis.volume, 1.0);
    }

    #[test]
    fn from_json_empty_object() {
        assert_eq!(PanelConfig::from_json("{}").unwrap(), PanelConfig::default());
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(PanelConfig::from_json("not json").is_err());
    }

    #[test]
    fn clamped_bounds_values() {
        let settings = UtteranceSettings {
            rate: 50.0,
            pitch: -1.0,
            volume: f32::NAN,
            ..Default::default()
        };
        let c = settings.clamped();
        assert_eq!(c.rate, MAX_RATE);
        assert_eq!(c.pitch, 0.0);
        assert_eq!(c.volume, 1.0);
    }
}
