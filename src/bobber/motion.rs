//! Motion significance detection
//!
//! Each new detection is compared to the previous one and reduced to a
//! scalar "distance ratio": how far the box centre moved, as a percentage of
//! the height of the box covering both detections. Idle bobbing produces a
//! small, fairly steady ratio. A bite makes the bobber dip sharply, which
//! shows up as a ratio several times larger than the cycle's running mean.

use crate::geometry::{distance, Rect};

/// Default number of ratios needed before a bite can be reported
pub const DEFAULT_MIN_SAMPLES: usize = 5;
/// Default multiple of the running mean that counts as a bite
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 6.0;

/// Normalised movement between two consecutive detections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRatio {
    /// Centre distance over union height, in percent. Drives decisions.
    pub vertical: f64,
    /// Centre distance over union width, in percent. Reported only.
    pub horizontal: f64,
}

impl MotionRatio {
    /// Compare `previous` and `current` detections.
    ///
    /// A union box with zero (or otherwise unusable) extent on an axis gives
    /// a ratio of 0 on that axis instead of an infinite value.
    pub fn between(previous: &Rect, current: &Rect) -> Self {
        let union = previous.union(current);
        let center_dist = distance(&previous.center(), &current.center());

        Self {
            vertical: percent_of(center_dist, union.height()),
            horizontal: percent_of(center_dist, union.width()),
        }
    }

    /// The value fed to the significance check
    pub fn value(&self) -> f64 {
        self.vertical
    }
}

fn percent_of(numerator: f64, extent: f64) -> f64 {
    if !(extent.is_finite() && extent > 0.0) || !numerator.is_finite() {
        return 0.0;
    }
    numerator / extent * 100.0
}

/// Decides whether a ratio stands out from the cycle's history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvaluator {
    min_samples: usize,
    threshold_multiplier: f64,
}

impl MotionEvaluator {
    pub fn new(min_samples: usize, threshold_multiplier: f64) -> Self {
        Self {
            min_samples,
            threshold_multiplier,
        }
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub fn threshold_multiplier(&self) -> f64 {
        self.threshold_multiplier
    }

    /// Arithmetic mean of the whole history, `None` when empty
    pub fn baseline(history: &[f64]) -> Option<f64> {
        if history.is_empty() {
            return None;
        }
        Some(history.iter().sum::<f64>() / history.len() as f64)
    }

    /// True iff enough history exists and `current` exceeds
    /// `mean(history) * threshold_multiplier`.
    pub fn is_significant(&self, current: f64, history: &[f64]) -> bool {
        if history.len() < self.min_samples {
            return false;
        }
        let Some(mean) = Self::baseline(history) else {
            return false;
        };

        tracing::debug!("[MOTION] check ratio={:.3}, avg={:.3}", current, mean);

        if current > mean * self.threshold_multiplier {
            tracing::info!(
                "[MOTION] Something happened! ratio={:.3}, avg={:.3}",
                current,
                mean
            );
            return true;
        }
        false
    }
}

impl Default for MotionEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLES, DEFAULT_THRESHOLD_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_never_triggers() {
        let eval = MotionEvaluator::default();
        for len in 0..DEFAULT_MIN_SAMPLES {
            let history = vec![1.0; len];
            assert!(!eval.is_significant(1e9, &history), "len {}", len);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let eval = MotionEvaluator::default();
        let history = [1.0, 1.0, 1.0, 1.0, 1.0];
        assert!(eval.is_significant(7.0, &history));
        assert!(!eval.is_significant(6.0, &history));
        // Same arguments, same answer
        assert!(eval.is_significant(7.0, &history));
        assert!(!eval.is_significant(6.0, &history));
    }

    #[test]
    fn test_mean_covers_whole_history() {
        let eval = MotionEvaluator::default();
        // mean = 2.0 -> threshold 12.0
        let history = [0.0, 0.0, 0.0, 0.0, 0.0, 6.0, 6.0, 4.0];
        assert_eq!(MotionEvaluator::baseline(&history), Some(2.0));
        assert!(eval.is_significant(12.5, &history));
        assert!(!eval.is_significant(12.0, &history));
    }

    #[test]
    fn test_custom_configuration() {
        let eval = MotionEvaluator::new(2, 3.0);
        assert!(!eval.is_significant(100.0, &[1.0]));
        assert!(eval.is_significant(3.5, &[1.0, 1.0]));
    }

    #[test]
    fn test_ratio_identical_boxes_is_zero() {
        let b = Rect::new(100.0, 100.0, 120.0, 130.0);
        let union = b.union(&b);
        assert_eq!(union.height(), b.height());
        let ratio = MotionRatio::between(&b, &b);
        assert_eq!(ratio.vertical, 0.0);
        assert_eq!(ratio.horizontal, 0.0);
    }

    #[test]
    fn test_ratio_vertical_dip() {
        let prev = Rect::new(0.0, 0.0, 10.0, 10.0);
        let cur = Rect::new(0.0, 10.0, 10.0, 20.0);
        // centres 10 apart, union height 20 -> 50%, union width 10 -> 100%
        let ratio = MotionRatio::between(&prev, &cur);
        assert_eq!(ratio.vertical, 50.0);
        assert_eq!(ratio.horizontal, 100.0);
        assert_eq!(ratio.value(), 50.0);
    }

    #[test]
    fn test_ratio_zero_height_union_falls_back() {
        let prev = Rect::new(0.0, 5.0, 10.0, 5.0);
        let cur = Rect::new(4.0, 5.0, 14.0, 5.0);
        let ratio = MotionRatio::between(&prev, &cur);
        assert_eq!(ratio.vertical, 0.0);
        assert!(ratio.horizontal.is_finite());
        assert!(ratio.horizontal > 0.0);
    }
}
