//! Core domain types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line-level sample type (unsigned 8-bit amplitude, silence centered near 128)
pub type Sample = u8;

/// Marker string delivered to the handler when the handset is lifted
pub const OFF_HOOK_MARKER: &str = "\nOFF-HOOK\n";

/// Marker string delivered to the handler when the handset is put back
pub const ON_HOOK_MARKER: &str = "\nON-HOOK\n";

/// Handset hook state, inferred from the sustained line level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookState {
    OnHook,
    OffHook,
}

/// A finalized detection, queued for asynchronous delivery to the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    /// A decoded keypad character ('0'-'9', 'A'-'D', '*', '#')
    Symbol(char),
    /// Handset lifted (pause-window mean crossed the off-hook threshold)
    OffHook,
    /// Handset replaced (pause-window mean crossed the on-hook threshold)
    OnHook,
}

impl fmt::Display for OutputEvent {
    /// Renders the event exactly as the handler receives it: a single
    /// character for symbols, the literal markers for hook transitions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEvent::Symbol(c) => write!(f, "{c}"),
            OutputEvent::OffHook => f.write_str(OFF_HOOK_MARKER),
            OutputEvent::OnHook => f.write_str(ON_HOOK_MARKER),
        }
    }
}

/// Client callback receiving decoded symbols and hook markers as text.
///
/// Invoked from the output worker thread; may block arbitrarily without
/// stalling detection.
pub type SymbolHandler = Box<dyn FnMut(&str) + Send + 'static>;
