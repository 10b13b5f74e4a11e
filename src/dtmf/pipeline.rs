//! Per-sample decoding state machine
//!
//! Couples the two sliding windows, the pause/hook classifier, the tone
//! analyzer, and the symbol matcher into a synchronous pipeline:
//!
//!   sample → pause window → (silence? flush : migrate to symbol window)
//!          → full symbol window → bin magnitudes → matcher tally
//!
//! The pipeline is synchronous and single-owner: windows, tally, and hook
//! state belong to whoever calls `push_sample`. The threaded harness in
//! `decoder` drives it from the input worker.

use crate::domain::{
    DecoderConfig, HookState, OutputEvent, Sample, SYMBOL_WINDOW_SECONDS,
};
use crate::dsp::{level_stats, ToneAnalyzer, Window};
use crate::dtmf::keymap::TONE_FREQUENCIES;
use crate::dtmf::matcher::SymbolMatcher;

/// Maximum level deviation for a pause window to classify as silence
pub const PAUSE_MAX_DEVIATION: f64 = 1.0;

/// Pause-window mean above which an on-hook handset reads as lifted
pub const OFF_HOOK_LEVEL: f64 = 180.0;

/// Pause-window mean below which an off-hook handset reads as replaced.
/// The wide dead band between the two levels keeps a noisy line from
/// chattering between states.
pub const ON_HOOK_LEVEL: f64 = 20.0;

/// Synchronous decoding core: push samples in, collect events out
pub struct DtmfPipeline {
    pause: Window,
    symbol: Window,
    analyzer: ToneAnalyzer,
    matcher: SymbolMatcher,
    hook: HookState,
}

impl DtmfPipeline {
    /// Build a pipeline for the given configuration.
    ///
    /// The configuration is expected to be validated; window capacities
    /// derive from its sampling rate.
    pub fn new(config: &DecoderConfig) -> Self {
        let symbol_len = config.symbol_window_len();
        Self {
            pause: Window::with_capacity(config.pause_window_len()),
            symbol: Window::with_capacity(symbol_len),
            analyzer: ToneAnalyzer::new(&TONE_FREQUENCIES, SYMBOL_WINDOW_SECONDS, symbol_len),
            matcher: SymbolMatcher::new(),
            hook: HookState::OnHook,
        }
    }

    /// Consume one sample, appending any finalized events to `events`.
    ///
    /// A single sample can produce several events at once (a hook
    /// transition and a flushed symbol), or none at all.
    pub fn push_sample(&mut self, sample: Sample, events: &mut Vec<OutputEvent>) {
        loop {
            if !self.pause.is_full() {
                self.pause.push(sample);
                return;
            }

            if self.classify_pause(events) {
                // A pause closes out the current tone; whatever is still
                // buffered belongs to the finished symbol or to silence
                self.pause.clear();
                self.symbol.clear();
                if let Some(symbol) = self.matcher.flush() {
                    log::debug!("symbol {symbol:?} finalized after pause");
                    events.push(OutputEvent::Symbol(symbol));
                }
            } else {
                self.migrate();
                if self.symbol.is_full() {
                    self.evaluate_symbol_window();
                }
            }
        }
    }

    pub fn hook_state(&self) -> HookState {
        self.hook
    }

    /// Drop buffered samples and the running tally.
    ///
    /// Hook state is preserved: the handset does not move just because the
    /// decoder detaches from the stream.
    pub fn reset(&mut self) {
        self.pause.clear();
        self.symbol.clear();
        self.matcher.flush();
    }

    /// Classify the full pause window as silence or tone, updating hook
    /// state on the way.
    ///
    /// Hysteresis runs on every classification, silent or not: a loud
    /// steady level both trips OFF-HOOK and still counts as silence for
    /// the symbol flush. No transition happens inside the dead band.
    fn classify_pause(&mut self, events: &mut Vec<OutputEvent>) -> bool {
        let stats = level_stats(&self.pause);

        if stats.mean > OFF_HOOK_LEVEL && self.hook == HookState::OnHook {
            self.hook = HookState::OffHook;
            log::info!("handset off hook (mean level {:.1})", stats.mean);
            events.push(OutputEvent::OffHook);
        } else if stats.mean < ON_HOOK_LEVEL && self.hook == HookState::OffHook {
            self.hook = HookState::OnHook;
            log::info!("handset on hook (mean level {:.1})", stats.mean);
            events.push(OutputEvent::OnHook);
        }

        stats.deviation <= PAUSE_MAX_DEVIATION
    }

    /// Move samples from the front of the pause window to the back of the
    /// symbol window, freeing room for new input while the tone continues.
    /// The pause window keeps its newest quarter so silence detection stays
    /// responsive.
    fn migrate(&mut self) {
        let hold = self.pause.capacity() * 3 / 4;
        while self.pause.len() > hold && !self.symbol.is_full() {
            if let Some(sample) = self.pause.pop_front() {
                self.symbol.push(sample);
            }
        }
    }

    /// Analyze the full symbol window, then slide it: the oldest quarter is
    /// discarded so consecutive evaluations overlap instead of tiling.
    fn evaluate_symbol_window(&mut self) {
        let amplitudes = self.analyzer.analyze(&self.symbol);
        self.matcher.observe(amplitudes);

        let hold = self.symbol.capacity() * 3 / 4;
        while self.symbol.len() > hold {
            self.symbol.pop_front();
        }
    }
}
