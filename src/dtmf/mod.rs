//! DTMF detection
//!
//! Keypad frequency table, per-window symbol matching, the synchronous
//! decoding pipeline, and the threaded decoder harness.

pub mod decoder;
pub mod keymap;
pub mod matcher;
pub mod pipeline;

pub use decoder::DtmfDecoder;
pub use pipeline::DtmfPipeline;
