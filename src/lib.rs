//! Bobber Sentinel - auto fishing bot
//!
//! Watches the fishing bobber in the game window, tracks how far it moves
//! between frames and right-clicks it when the movement jumps well above the
//! cast's running average (a bite). Screen capture, detection, input and the
//! debug overlay sit behind traits so the cycle can run against test doubles.

pub mod bobber;
pub mod cycle;
pub mod error;
pub mod geometry;
pub mod input;
pub mod screen_reader;
pub mod utils;
pub mod window;

// Re-exports for convenience
pub use bobber::{BobberInfo, MotionEvaluator, MotionRatio};
pub use cycle::{CycleConfig, CycleOutcome, CycleState, FishingBot, SessionStats};
pub use error::BotError;
pub use geometry::{distance, Point, Rect};
pub use input::{EnigoInjector, InputInjector};
pub use screen_reader::{DebugOverlay, Detector, Frame, FrameSource, ScreenService, TracingOverlay};
pub use utils::{path::get_data_dir, Clock, Settings, SystemClock};
pub use window::WindowHandle;
