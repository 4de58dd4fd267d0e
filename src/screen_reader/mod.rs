//! Screen reader module for capturing frames and locating the bobber

pub mod detector;
pub mod overlay;
pub mod screen_service;

pub use detector::Detector;
#[cfg(feature = "vision")]
pub use detector::TemplateDetector;
#[cfg(feature = "vision")]
pub use overlay::OpenCvOverlay;
pub use overlay::{DebugOverlay, TracingOverlay};
pub use screen_service::{Frame, FrameSource, Region, ScreenService};
