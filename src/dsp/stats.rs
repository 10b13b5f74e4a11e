//! Signal level statistics

use super::window::Window;

/// Mean and standard deviation of a window's sample levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub mean: f64,
    pub deviation: f64,
}

/// Compute the mean level and its standard deviation (square root of the
/// mean squared deviation) over the buffered samples.
pub fn level_stats(window: &Window) -> LevelStats {
    let n = window.len();
    if n == 0 {
        return LevelStats {
            mean: 0.0,
            deviation: 0.0,
        };
    }

    let mean = window.iter().map(f64::from).sum::<f64>() / n as f64;
    let variance = window
        .iter()
        .map(|s| {
            let d = f64::from(s) - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;

    LevelStats {
        mean,
        deviation: variance.sqrt(),
    }
}
