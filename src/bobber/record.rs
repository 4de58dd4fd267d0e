//! Timestamped bobber observation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geometry::Rect;

/// One successful detection of the bobber
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BobberInfo {
    pub observed_at: DateTime<Utc>,
    pub bbox: Rect,
}

impl BobberInfo {
    /// Record a detection made at `now`. The box is stored as given.
    pub fn observe(bbox: Rect, now: DateTime<Utc>) -> Self {
        Self {
            observed_at: now,
            bbox,
        }
    }

    /// Time elapsed since this observation, clamped at zero
    pub fn age(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.observed_at).to_std().unwrap_or_default()
    }
}

impl std::fmt::Display for BobberInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bobber {} center {} at {}",
            self.bbox,
            self.bbox.center(),
            self.observed_at.to_rfc3339()
        )
    }
}
