//! Bobber observations and motion analysis

pub mod motion;
pub mod record;

pub use motion::{MotionEvaluator, MotionRatio};
pub use record::BobberInfo;
