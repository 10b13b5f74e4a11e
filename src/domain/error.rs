//! Domain error types

use thiserror::Error;

/// Errors that can occur while configuring or running the decoder.
///
/// Cancellation is not an error: a worker that wakes from a blocked receive
/// because the decoder is stopping simply exits its loop. Noise-rejected
/// windows and majority-vote ties are handled internally and never surface
/// here either.
#[derive(Error, Debug)]
pub enum DtmfError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type alias for decoder operations
pub type DtmfResult<T> = Result<T, DtmfError>;
