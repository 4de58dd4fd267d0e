//! Bot settings loaded from `config/settings.json`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bobber::motion::{DEFAULT_MIN_SAMPLES, DEFAULT_THRESHOLD_MULTIPLIER};
use crate::bobber::MotionEvaluator;
use crate::error::SettingsError;
use crate::utils::keybinds::resolve_key;
use crate::utils::path::get_data_dir;

/// Settings structure. Every field falls back to its default, so a settings
/// file only needs the options it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_title: String,
    pub capture_delay_ms: u64,
    pub cast_delay_ms: u64,
    pub pull_settle_delay_ms: u64,
    pub post_pull_delay_ms: u64,
    pub timeout_grace_ms: u64,
    pub cooldown_ms: u64,
    pub min_history_samples: usize,
    pub threshold_multiplier: f64,
    pub cast_key: String,
    pub key_hold_ms: u64,
    pub click_y_offset: i32,
    pub window_lookup_retries: u32,
    pub window_lookup_delay_ms: u64,
    pub template_path: PathBuf,
    pub match_threshold: f32,
    pub show_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "World of Warcraft".to_string(),
            capture_delay_ms: 20,
            cast_delay_ms: 1000,
            pull_settle_delay_ms: 500,
            post_pull_delay_ms: 5000,
            timeout_grace_ms: 3000,
            cooldown_ms: 1000,
            min_history_samples: DEFAULT_MIN_SAMPLES,
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            cast_key: "1".to_string(),
            key_hold_ms: 100,
            click_y_offset: 32,
            window_lookup_retries: 3,
            window_lookup_delay_ms: 100,
            template_path: PathBuf::from("images").join("bobber.png"),
            match_threshold: 0.7,
            show_overlay: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::info!("[CONFIG] No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse settings from JSON text, filling unspecified options with defaults
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Reject values the cycle cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.window_title.trim().is_empty() {
            return Err(invalid("window_title", "must not be empty"));
        }
        if self.min_history_samples == 0 {
            return Err(invalid("min_history_samples", "must be at least 1"));
        }
        if !self.threshold_multiplier.is_finite() || self.threshold_multiplier <= 0.0 {
            return Err(invalid(
                "threshold_multiplier",
                format!("must be a positive number, got {}", self.threshold_multiplier),
            ));
        }
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(invalid(
                "match_threshold",
                format!("must be in (0, 1], got {}", self.match_threshold),
            ));
        }
        if self.window_lookup_retries == 0 {
            return Err(invalid("window_lookup_retries", "must be at least 1"));
        }
        if resolve_key(&self.cast_key).is_none() {
            return Err(invalid(
                "cast_key",
                format!("unknown key '{}'", self.cast_key),
            ));
        }
        Ok(())
    }

    /// Template path resolved against the data directory when relative
    pub fn resolved_template_path(&self) -> PathBuf {
        if self.template_path.is_absolute() {
            self.template_path.clone()
        } else {
            get_data_dir().join(&self.template_path)
        }
    }

    pub fn motion_evaluator(&self) -> MotionEvaluator {
        MotionEvaluator::new(self.min_history_samples, self.threshold_multiplier)
    }

    pub fn capture_delay(&self) -> Duration {
        Duration::from_millis(self.capture_delay_ms)
    }

    pub fn cast_delay(&self) -> Duration {
        Duration::from_millis(self.cast_delay_ms)
    }

    pub fn pull_settle_delay(&self) -> Duration {
        Duration::from_millis(self.pull_settle_delay_ms)
    }

    pub fn post_pull_delay(&self) -> Duration {
        Duration::from_millis(self.post_pull_delay_ms)
    }

    pub fn timeout_grace(&self) -> Duration {
        Duration::from_millis(self.timeout_grace_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    pub fn window_lookup_delay(&self) -> Duration {
        Duration::from_millis(self.window_lookup_delay_ms)
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        name,
        reason: reason.into(),
    }
}
