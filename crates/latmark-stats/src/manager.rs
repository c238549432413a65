//! Latency tracker: aggregate statistics composed with a bucket scheme

use crate::aggregate::AggregateStats;
use crate::bucket::BucketScheme;
use crate::column;
use crate::error::StatsResult;
use crate::exponential::{ExponentialBuckets, ExponentialConfig};
use crate::linear::{LinearBuckets, LinearConfig};
use crate::snapshot::TrackerSnapshot;
use std::io::{self, Write};

/// Shared tail of every header line.
const HEADER_SUFFIX: &str = "     avg     min      max  95th%  99th%  count success   recs";

/// One latency metric stream: shared aggregate statistics plus a display
/// bucket scheme, safe to update from any number of threads.
///
/// Recording is lock-free; reporting drains the windowed half of the
/// state and leaves the lifetime half untouched.
pub struct LatencyTracker {
    stats: AggregateStats,
    scheme: Box<dyn BucketScheme>,
}

impl LatencyTracker {
    /// Build a tracker with exponential display buckets.
    pub fn exponential(config: ExponentialConfig) -> StatsResult<Self> {
        Ok(Self::from_scheme(Box::new(ExponentialBuckets::new(config)?)))
    }

    /// Build a tracker with linear display buckets.
    pub fn linear(config: LinearConfig) -> StatsResult<Self> {
        Ok(Self::from_scheme(Box::new(LinearBuckets::new(config)?)))
    }

    /// Build a tracker around an already-constructed scheme.
    pub fn from_scheme(scheme: Box<dyn BucketScheme>) -> Self {
        Self {
            stats: AggregateStats::new(),
            scheme,
        }
    }

    /// Record one completed operation: its elapsed time plus optional
    /// secondary tallies (items processed / items succeeded). Zero deltas
    /// are skipped. Non-blocking, never fails.
    pub fn record(&self, elapsed_us: u64, count: u64, success: u64) {
        self.scheme.observe(elapsed_us);
        self.stats.record(elapsed_us, count, success);
    }

    /// Write the full header line for this tracker's table.
    pub fn write_header(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}{}", self.scheme.header_prefix(), HEADER_SUFFIX)
    }

    /// Write one labeled data row and drain the window.
    ///
    /// Produces nothing when both tallies are zero (nothing worth
    /// reporting has landed since the last drain). Otherwise writes the
    /// scheme's percentage cells followed by windowed average/min/max,
    /// the 95th/99th percentile bucket indices, the window operation
    /// count, and both tallies, then resets all windowed state.
    ///
    /// Not synchronized with concurrent [`record`] calls: samples landing
    /// mid-report fall in either the closing window or the next one,
    /// never both. The row is an approximation that evens out over many
    /// reporting cycles; taking a lock here to make it exact would cost
    /// more than the number is worth.
    ///
    /// [`record`]: LatencyTracker::record
    pub fn write_results(&self, out: &mut dyn Write, label: &str) -> io::Result<()> {
        if self.stats.count() == 0 && self.stats.success() == 0 {
            return Ok(());
        }
        self.scheme.write_row(out, label)?;

        let avg_ms = self.stats.window_avg_us() / 1_000.0;
        let (p95, p99) = self.stats.percentiles();

        column::write_float_cell(out, 8, Some(avg_ms), "ms")?;
        let window_min = self.stats.window_min_us().map(|us| us as f64 / 1_000.0);
        let window_max = self.stats.window_max_us().map(|us| us as f64 / 1_000.0);
        column::write_float_cell(out, 8, window_min, "ms")?;
        column::write_float_cell(out, 9, window_max, "ms")?;
        column::write_int_cell(out, 7, p95, "ms")?;
        column::write_int_cell(out, 7, p99, "ms")?;
        column::write_int_cell(out, 7, self.stats.window_operations(), "")?;
        column::write_int_cell(out, 8, self.stats.success(), "")?;
        column::write_int_cell(out, 7, self.stats.count(), "")?;
        writeln!(out)?;

        self.stats.reset_window();
        Ok(())
    }

    /// Lifetime operation count. Safe to call concurrently with
    /// [`record`].
    ///
    /// [`record`]: LatencyTracker::record
    pub fn operations(&self) -> u64 {
        self.stats.operations()
    }

    /// Lifetime minimum latency in microseconds, if any sample landed.
    pub fn min_us(&self) -> Option<u64> {
        self.stats.min_us()
    }

    /// Lifetime maximum latency in microseconds, if any sample landed.
    pub fn max_us(&self) -> Option<u64> {
        self.stats.max_us()
    }

    /// Secondary "count" tally accumulated since the last drain.
    pub fn count(&self) -> u64 {
        self.stats.count()
    }

    /// Secondary "success" tally accumulated since the last drain.
    pub fn success(&self) -> u64 {
        self.stats.success()
    }

    /// A non-draining summary of the lifetime statistics.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot::from_stats(&self.stats)
    }

    /// A fresh tracker with the same bucket configuration and zeroed
    /// counters, for fanning one configuration out into several
    /// independently counted streams.
    pub fn duplicate(&self) -> Self {
        Self {
            stats: AggregateStats::new(),
            scheme: self.scheme.duplicate(),
        }
    }
}
