//! Digital Signal Processing
//!
//! Pure signal processing over sample windows. No I/O dependencies.

pub mod dft;
pub mod stats;
pub mod window;

pub use dft::ToneAnalyzer;
pub use stats::{level_stats, LevelStats};
pub use window::Window;
