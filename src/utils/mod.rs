//! Configuration, key names, paths and time

pub mod clock;
pub mod keybinds;
pub mod path;
pub mod settings;

pub use clock::{Clock, SystemClock};
pub use settings::Settings;
