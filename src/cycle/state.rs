//! Cycle states, outcomes and session counters

use std::time::Duration;

use serde::Serialize;

use crate::bobber::BobberInfo;

/// Where a cast cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CycleState {
    Casting,
    Sampling,
    Acting,
    TimedOut,
}

impl CycleState {
    /// Get human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            CycleState::Casting => "Casting fishing line...",
            CycleState::Sampling => "Waiting for fish to bite...",
            CycleState::Acting => "Bite detected, pulling",
            CycleState::TimedOut => "Bobber lost, recasting",
        }
    }
}

/// How a cast cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A bite was detected and the pull click was sent
    Caught {
        bobber: BobberInfo,
        ratio: f64,
        /// Screen position of the click
        click: (i32, i32),
        /// Ratios accumulated before the bite
        samples: usize,
    },
    /// The bobber went unseen for the whole grace period
    TimedOut {
        samples: usize,
        unseen_for: Duration,
    },
}

impl CycleOutcome {
    pub fn final_state(&self) -> CycleState {
        match self {
            CycleOutcome::Caught { .. } => CycleState::Acting,
            CycleOutcome::TimedOut { .. } => CycleState::TimedOut,
        }
    }
}

/// Session statistics, kept in memory only
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub catches: u32,
    pub timeouts: u32,
    pub rate: f64,
}

impl SessionStats {
    pub fn cycles(&self) -> u32 {
        self.catches + self.timeouts
    }

    /// Count a finished cycle
    pub fn record(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Caught { .. } => self.catches += 1,
            CycleOutcome::TimedOut { .. } => self.timeouts += 1,
        }
        let total = self.cycles();
        self.rate = if total > 0 {
            (self.catches as f64 / total as f64) * 100.0
        } else {
            0.0
        };
    }

    /// Stats as a JSON string for the log
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "catches": self.catches,
            "timeouts": self.timeouts,
            "rate": format!("{:.2}", self.rate)
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use chrono::Utc;

    fn caught() -> CycleOutcome {
        CycleOutcome::Caught {
            bobber: BobberInfo::observe(Rect::new(0.0, 0.0, 10.0, 10.0), Utc::now()),
            ratio: 15.0,
            click: (5, -27),
            samples: 5,
        }
    }

    fn timed_out() -> CycleOutcome {
        CycleOutcome::TimedOut {
            samples: 0,
            unseen_for: Duration::from_secs(3),
        }
    }

    #[test]
    fn test_stats_rate() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.rate, 0.0);
        stats.record(&caught());
        stats.record(&caught());
        stats.record(&caught());
        stats.record(&timed_out());
        assert_eq!(stats.catches, 3);
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.cycles(), 4);
        assert_eq!(stats.rate, 75.0);
        assert!(stats.to_json().contains("\"rate\":\"75.00\""));
    }

    #[test]
    fn test_final_state() {
        assert_eq!(caught().final_state(), CycleState::Acting);
        assert_eq!(timed_out().final_state(), CycleState::TimedOut);
    }
}
