//! Real-time DTMF decoding for line-level sample streams
//!
//! Turns a continuous stream of unsigned 8-bit samples into decoded keypad
//! characters and handset hook-state events. The host feeds samples through
//! a channel (from a serial line reader, a capture file, a simulator; the
//! decoder does not care) and receives text through a callback.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `dsp/` - Signal processing over sample windows (pure, no I/O)
//! - `dtmf/` - Keypad table, symbol matching, decoding pipeline, and the
//!   two-worker threaded decoder
//! - `profiles` - Saved configuration profiles (JSON on disk)
//!
//! ## Example
//!
//! ```no_run
//! use crossbeam_channel::unbounded;
//! use dialtone::{DecoderConfig, DtmfDecoder};
//!
//! # fn main() -> dialtone::DtmfResult<()> {
//! let (tx, rx) = unbounded();
//! let mut decoder = DtmfDecoder::new(
//!     DecoderConfig::default(),
//!     rx,
//!     Box::new(|text| print!("{text}")),
//! )?;
//! decoder.start()?;
//! // ... the line reader pushes samples into `tx` ...
//! # let _ = tx;
//! decoder.stop()?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod dsp;
pub mod dtmf;
pub mod profiles;

pub use domain::{
    DecoderConfig, DecoderProfile, DtmfError, DtmfResult, HookState, OutputEvent, Sample,
    SymbolHandler, OFF_HOOK_MARKER, ON_HOOK_MARKER,
};
pub use dtmf::DtmfDecoder;
