//! Named metric streams fanned out from one prototype tracker

use crate::cadence::Cadence;
use crate::error::{ReportError, ReportResult};
use latmark_stats::LatencyTracker;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// One named metric stream.
///
/// Callers keep the `Arc` handed out by [`StreamSet::register`] and record
/// straight into it; the record path touches no registry lock.
pub struct Stream {
    name: String,
    cadence: Cadence,
    tracker: LatencyTracker,
}

impl Stream {
    /// Stream name, used as the row label in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This stream's report cadence.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// The underlying tracker.
    pub fn tracker(&self) -> &LatencyTracker {
        &self.tracker
    }

    /// Record one completed operation according to the stream's cadence:
    /// periodic cadences accumulate, `EveryCall` logs the operation
    /// instead, `Never` drops it.
    pub fn record(&self, elapsed_us: u64, count: u64, success: u64) {
        match self.cadence {
            Cadence::Never => {}
            Cadence::EveryCall => {
                let elapsed_ms = elapsed_us as f64 / 1_000.0;
                if count > 0 {
                    tracing::info!("{}: [{}/{}] took {:.3}ms", self.name, success, count, elapsed_ms);
                } else {
                    tracing::info!("{}: took {:.3}ms", self.name, elapsed_ms);
                }
            }
            _ => self.tracker.record(elapsed_us, count, success),
        }
    }
}

/// An ordered set of named streams sharing one bucket configuration.
///
/// Streams are duplicated from the prototype at registration, so every
/// stream counts independently while rendering an identical table shape.
/// Report rows follow registration order.
pub struct StreamSet {
    prototype: LatencyTracker,
    streams: RwLock<Vec<Arc<Stream>>>,
}

impl StreamSet {
    /// Create an empty set around a prototype tracker.
    pub fn new(prototype: LatencyTracker) -> Self {
        Self {
            prototype,
            streams: RwLock::new(Vec::new()),
        }
    }

    /// Register a stream, duplicating the prototype's configuration.
    pub fn register(&self, name: &str, cadence: Cadence) -> ReportResult<Arc<Stream>> {
        let mut streams = self.streams.write();
        if streams.iter().any(|s| s.name == name) {
            return Err(ReportError::DuplicateStream(name.to_string()));
        }
        let stream = Arc::new(Stream {
            name: name.to_string(),
            cadence,
            tracker: self.prototype.duplicate(),
        });
        streams.push(Arc::clone(&stream));
        Ok(stream)
    }

    /// Look up a stream by name.
    pub fn get(&self, name: &str) -> Option<Arc<Stream>> {
        self.streams.read().iter().find(|s| s.name == name).cloned()
    }

    /// The periodic streams, in registration order.
    pub fn periodic(&self) -> Vec<Arc<Stream>> {
        self.streams
            .read()
            .iter()
            .filter(|s| s.cadence.is_periodic())
            .cloned()
            .collect()
    }

    /// The shortest period over all periodic streams.
    pub fn min_period(&self) -> Option<Duration> {
        self.streams
            .read()
            .iter()
            .filter_map(|s| s.cadence.period())
            .min()
    }

    /// Number of registered streams.
    pub fn len(&self) -> usize {
        self.streams.read().len()
    }

    /// Whether no stream has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.streams.read().is_empty()
    }
}
