//! # latmark-report
//!
//! Named latency streams and the periodic report driver.
//!
//! This crate provides:
//! - Fan-out of one bucket configuration into independently counted,
//!   named streams
//! - Per-stream report cadence, from per-call logging to once a minute
//! - A buffered reporter that renders header + rows in one sink write
//! - A tokio driver running report cycles until shutdown
//!
//! ## Usage
//!
//! ```ignore
//! use latmark_report::{Cadence, Reporter, StreamSet};
//! use latmark_stats::{ExponentialConfig, LatencyTracker};
//! use std::sync::Arc;
//!
//! let prototype = LatencyTracker::exponential(ExponentialConfig::default())?;
//! let streams = Arc::new(StreamSet::new(prototype));
//! let gets = streams.register("gets", Cadence::EverySecond)?;
//!
//! gets.record(elapsed_us, 0, 1);
//!
//! let reporter = Arc::new(Reporter::stdout(streams));
//! let driver = Arc::clone(&reporter).spawn()?;
//! // ... later
//! driver.shutdown().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cadence;
mod error;
mod registry;
mod reporter;

pub use cadence::Cadence;
pub use error::{ReportError, ReportResult};
pub use registry::{Stream, StreamSet};
pub use reporter::{Reporter, ReporterHandle};
