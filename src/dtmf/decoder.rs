//! Decoder lifecycle and worker loops
//!
//! Two worker threads run between the sample source and the client handler:
//!
//!   samples → input worker (pipeline) → event queue → output worker → handler
//!
//! The output worker exists so a slow or blocking handler never stalls
//! detection. Cancellation rides a dedicated shutdown channel: `stop()`
//! drops its sender, every blocked receive wakes with the disconnected
//! variant, and both loops exit without processing further items. Worker
//! state (the pipeline, the handler) travels back through the join handles
//! so a stop/start cycle reuses it.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender, TryRecvError};

use crate::domain::{
    DecoderConfig, DtmfError, DtmfResult, OutputEvent, Sample, SymbolHandler,
};
use crate::dtmf::pipeline::DtmfPipeline;

/// Asynchronous DTMF decoder: consumes a sample stream, delivers decoded
/// symbols and hook events to a client handler from a separate thread.
pub struct DtmfDecoder {
    config: DecoderConfig,
    samples: Receiver<Sample>,
    shutdown: Option<Sender<()>>,
    input_worker: Option<JoinHandle<DtmfPipeline>>,
    output_worker: Option<JoinHandle<SymbolHandler>>,
    pipeline: Option<DtmfPipeline>,
    handler: Option<SymbolHandler>,
}

impl DtmfDecoder {
    /// Create a decoder reading from `samples` and reporting to `handler`.
    ///
    /// The sending half of `samples` stays with the host (typically a line
    /// reader thread). Nothing runs until [`start`](Self::start).
    pub fn new(
        config: DecoderConfig,
        samples: Receiver<Sample>,
        handler: SymbolHandler,
    ) -> DtmfResult<Self> {
        config.validate()?;
        let pipeline = DtmfPipeline::new(&config);
        Ok(Self {
            config,
            samples,
            shutdown: None,
            input_worker: None,
            output_worker: None,
            pipeline: Some(pipeline),
            handler: Some(handler),
        })
    }

    /// Launch both worker loops. A no-op when already running.
    ///
    /// Buffered windows and the symbol tally start clean on every launch;
    /// hook state carries over from the previous run.
    pub fn start(&mut self) -> DtmfResult<()> {
        if self.input_worker.is_some() {
            return Ok(());
        }

        let mut pipeline = self
            .pipeline
            .take()
            .unwrap_or_else(|| DtmfPipeline::new(&self.config));
        pipeline.reset();

        let handler = self.handler.take().ok_or_else(|| {
            DtmfError::Worker("Handler was lost to a previous worker fault".into())
        })?;

        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let (event_tx, event_rx) = unbounded::<OutputEvent>();

        let samples = self.samples.clone();
        let input_shutdown = shutdown_rx.clone();
        self.input_worker = Some(thread::spawn(move || {
            input_loop(pipeline, samples, event_tx, input_shutdown)
        }));
        self.output_worker = Some(thread::spawn(move || {
            output_loop(handler, event_rx, shutdown_rx)
        }));
        self.shutdown = Some(shutdown_tx);

        log::info!("decoder started ({} samples/s)", self.config.sample_rate);
        Ok(())
    }

    /// Signal cancellation and join both workers. A no-op when not running.
    ///
    /// After this returns, no further handler invocation can happen.
    pub fn stop(&mut self) -> DtmfResult<()> {
        let Some(shutdown) = self.shutdown.take() else {
            return Ok(());
        };
        // Dropping the sender disconnects the shutdown channel; both
        // blocked receives wake with the disconnected variant
        drop(shutdown);

        let mut result = Ok(());
        if let Some(worker) = self.input_worker.take() {
            match worker.join() {
                Ok(pipeline) => self.pipeline = Some(pipeline),
                Err(_) => result = Err(DtmfError::Worker("Input worker panicked".into())),
            }
        }
        if let Some(worker) = self.output_worker.take() {
            match worker.join() {
                Ok(handler) => self.handler = Some(handler),
                Err(_) => result = Err(DtmfError::Worker("Output worker panicked".into())),
            }
        }

        log::info!("decoder stopped");
        result
    }

    pub fn is_running(&self) -> bool {
        self.input_worker.is_some()
    }
}

impl Drop for DtmfDecoder {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// True once the shutdown sender has been dropped
fn cancelled(shutdown: &Receiver<()>) -> bool {
    matches!(shutdown.try_recv(), Err(TryRecvError::Disconnected))
}

/// Input worker: pull samples in arrival order, drive the pipeline, forward
/// finalized events to the output queue.
fn input_loop(
    mut pipeline: DtmfPipeline,
    samples: Receiver<Sample>,
    events: Sender<OutputEvent>,
    shutdown: Receiver<()>,
) -> DtmfPipeline {
    let mut pending = Vec::new();
    'run: while !cancelled(&shutdown) {
        select! {
            recv(shutdown) -> _ => break,
            recv(samples) -> msg => match msg {
                Ok(sample) => {
                    pipeline.push_sample(sample, &mut pending);
                    for event in pending.drain(..) {
                        if events.send(event).is_err() {
                            // Output worker is gone; nothing left to deliver to
                            break 'run;
                        }
                    }
                }
                Err(_) => {
                    log::warn!("sample source disconnected, input worker exiting");
                    break;
                }
            },
        }
    }
    pipeline
}

/// Output worker: pull events in production order and hand them to the
/// client, isolated from detection timing.
fn output_loop(
    mut handler: SymbolHandler,
    events: Receiver<OutputEvent>,
    shutdown: Receiver<()>,
) -> SymbolHandler {
    while !cancelled(&shutdown) {
        select! {
            recv(shutdown) -> _ => break,
            recv(events) -> msg => match msg {
                Ok(event) => deliver(&mut handler, event),
                // Input worker dropped its sender; the stream is over
                Err(_) => break,
            },
        }
    }
    handler
}

/// Invoke the client handler, containing any panic it raises. One faulty
/// callback must not end delivery for the rest of the session.
fn deliver(handler: &mut SymbolHandler, event: OutputEvent) {
    let text = event.to_string();
    if panic::catch_unwind(AssertUnwindSafe(|| handler(&text))).is_err() {
        log::error!("symbol handler panicked on {text:?}, continuing delivery");
    }
}
