//! Error types shared across the bot

use thiserror::Error;

/// Invalid geometric construction
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("expansion must be a finite, non-negative distance (got {0})")]
    InvalidExpansion(f64),
}

/// Failures while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failures while grabbing a frame from the game window
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The target window could not be located after every lookup attempt.
    #[error("target window '{0}' not found")]
    WindowNotFound(String),
    #[error("screen capture failed: {0}")]
    Failed(String),
}

impl CaptureError {
    /// Whether the failure should stop the bot instead of skipping a frame
    pub fn is_fatal(&self) -> bool {
        matches!(self, CaptureError::WindowNotFound(_))
    }
}

/// Detector failure; treated as "nothing found" for the frame
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to load detector template {path}: {reason}")]
    Template { path: String, reason: String },
    #[error("detection failed: {0}")]
    Inference(String),
}

/// Synthetic input failure
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to initialise input backend: {0}")]
    Backend(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("input injection failed: {0}")]
    Injection(String),
    #[error("input injection is not supported on this platform")]
    Unsupported,
}

/// Errors that end the supervisory loop
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Input(#[from] InputError),
}
