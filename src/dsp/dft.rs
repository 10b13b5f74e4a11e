//! Targeted spectral analysis
//!
//! Evaluates the discrete Fourier transform at a fixed set of frequency bins
//! only, instead of computing a full spectrum. Each bin is the response at
//! the whole number of cycles nearest to `frequency × window_seconds`, so a
//! full-spectrum FFT would waste work: the detector needs eight magnitudes
//! per window, nothing more.

use super::window::Window;

/// Per-window magnitude analyzer for a fixed list of target frequencies.
///
/// The per-bin rotation rates are precomputed at construction; `analyze` is
/// a single O(bins × window) pass over the samples.
pub struct ToneAnalyzer {
    /// Angular rate per bin: 2π · round(f · window_seconds)
    omegas: Vec<f64>,
    window_len: usize,
}

impl ToneAnalyzer {
    /// Create an analyzer for `frequencies` (Hz) over windows of
    /// `window_len` samples spanning `window_seconds` seconds.
    pub fn new(frequencies: &[f64], window_seconds: f64, window_len: usize) -> Self {
        let omegas = frequencies
            .iter()
            .map(|f| 2.0 * std::f64::consts::PI * (f * window_seconds).round())
            .collect();
        Self { omegas, window_len }
    }

    /// Compute the magnitude of the windowed signal at each target bin.
    ///
    /// Returns one magnitude per configured frequency, in configuration
    /// order. The window is expected to hold `window_len` samples; both the
    /// relative time `t = i / window_len` and the averaging divisor use the
    /// configured length.
    pub fn analyze(&self, window: &Window) -> Vec<f64> {
        let n = self.window_len as f64;

        self.omegas
            .iter()
            .map(|&omega| {
                let mut sum_cos = 0.0;
                let mut sum_sin = 0.0;
                for (i, sample) in window.iter().enumerate() {
                    let t = i as f64 / n;
                    let (sin_wt, cos_wt) = (omega * t).sin_cos();
                    let s = f64::from(sample);
                    sum_cos += cos_wt * s;
                    sum_sin += sin_wt * s;
                }
                let avg_cos = sum_cos / n;
                let avg_sin = sum_sin / n;
                (avg_cos * avg_cos + avg_sin * avg_sin).sqrt()
            })
            .collect()
    }
}
