//! Periodic report driver

use crate::error::{ReportError, ReportResult};
use crate::registry::StreamSet;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Renders the registered streams into an output sink, either on demand
/// or on a periodic schedule.
pub struct Reporter {
    streams: Arc<StreamSet>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Reporter {
    /// Create a reporter writing to `sink`.
    pub fn new(streams: Arc<StreamSet>, sink: Box<dyn Write + Send>) -> Self {
        Self {
            streams,
            sink: Mutex::new(sink),
        }
    }

    /// Create a reporter writing to stdout.
    pub fn stdout(streams: Arc<StreamSet>) -> Self {
        Self::new(streams, Box::new(io::stdout()))
    }

    /// The stream set this reporter drains.
    pub fn streams(&self) -> &StreamSet {
        &self.streams
    }

    /// Render one report cycle: a header line plus one row per periodic
    /// stream, draining each stream's window.
    ///
    /// The whole cycle is rendered into a private buffer and written to
    /// the sink in one call, so rows from concurrent cycles never
    /// interleave. With no periodic stream registered this is a no-op.
    pub fn report_once(&self) -> ReportResult<()> {
        let periodic = self.streams.periodic();
        let Some(first) = periodic.first() else {
            return Ok(());
        };

        let mut buf = Vec::with_capacity(256);
        first.tracker().write_header(&mut buf)?;
        for stream in &periodic {
            stream.tracker().write_results(&mut buf, stream.name())?;
        }

        let mut sink = self.sink.lock();
        sink.write_all(&buf)?;
        sink.flush()?;
        Ok(())
    }

    /// Spawn the periodic driver on the shortest registered period.
    ///
    /// The driver runs until [`ReporterHandle::shutdown`] is called.
    /// Fails when no registered stream has a periodic cadence.
    pub fn spawn(self: Arc<Self>) -> ReportResult<ReporterHandle> {
        let period = self
            .streams
            .min_period()
            .ok_or(ReportError::NoPeriodicStreams)?;
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let reporter = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately; wait a full period
            // before the first report instead
            ticker.tick().await;
            tracing::info!("latency reporter started, period {:?}", period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tracing::debug!("latency report cycle");
                        if let Err(e) = reporter.report_once() {
                            tracing::warn!("latency report failed: {}", e);
                        }
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            tracing::info!("latency reporter stopping");
                            break;
                        }
                    }
                }
            }
        });

        Ok(ReporterHandle {
            stop: stop_tx,
            task,
        })
    }
}

/// Handle to a spawned periodic driver.
pub struct ReporterHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReporterHandle {
    /// Stop the driver and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}
