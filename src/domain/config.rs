//! Decoder configuration and saved profiles
//!
//! A `DecoderConfig` is the construction-time configuration of one decoder
//! instance. A `DecoderProfile` is a saved profile adding the settings of the
//! line source the host reads samples from (see `profiles` for persistence).

use serde::{Deserialize, Serialize};

use crate::domain::{DtmfError, DtmfResult};

/// Duration of the symbol analysis window, in seconds
pub const SYMBOL_WINDOW_SECONDS: f64 = 0.03;

/// Duration of the pause (silence) detection window, in seconds
pub const PAUSE_WINDOW_SECONDS: f64 = 0.007;

/// Construction-time decoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Line sampling rate, samples per second
    pub sample_rate: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        // Rate of the reference line interface (115200 baud, one byte per frame)
        Self {
            sample_rate: 9615.38,
        }
    }
}

impl DecoderConfig {
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }

    /// Symbol window capacity in samples
    pub fn symbol_window_len(&self) -> usize {
        (self.sample_rate * SYMBOL_WINDOW_SECONDS).round() as usize
    }

    /// Pause window capacity in samples
    pub fn pause_window_len(&self) -> usize {
        (self.sample_rate * PAUSE_WINDOW_SECONDS).round() as usize
    }

    /// Check that the sampling rate yields usable window sizes
    pub fn validate(&self) -> DtmfResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(DtmfError::Config(format!(
                "Sample rate must be a positive number, got {}",
                self.sample_rate
            )));
        }
        if self.pause_window_len() < 1 {
            return Err(DtmfError::Config(format!(
                "Sample rate {} is too low for a {PAUSE_WINDOW_SECONDS}s pause window",
                self.sample_rate
            )));
        }
        Ok(())
    }
}

/// A saved configuration profile for one line setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderProfile {
    /// Profile name (e.g. "Workbench Arduino", "Line Sim")
    pub name: String,
    /// Serial device the host reads samples from
    pub line_port: Option<String>,
    /// Baud rate of the line port
    pub baud_rate: u32,
    /// Line sampling rate, samples per second
    pub sample_rate: f64,
}

impl Default for DecoderProfile {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            line_port: None,
            baud_rate: 115_200,
            sample_rate: DecoderConfig::default().sample_rate,
        }
    }
}

impl DecoderProfile {
    /// The decoder configuration described by this profile
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig::new(self.sample_rate)
    }
}
