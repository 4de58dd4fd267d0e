//! Fishing cycle: casting, sampling and pulling

pub mod fishing_cycle;
pub mod state;

pub use fishing_cycle::{CycleConfig, FishingBot};
pub use state::{CycleOutcome, CycleState, SessionStats};
