//! Lifetime and windowed aggregate statistics
//!
//! Every field is an independent atomic; nothing on the record path takes
//! a lock or allocates. There is no cross-field atomicity: a reader racing
//! a writer can see one counter updated before its sibling. The printed
//! report is an approximation that evens out across cycles, not an
//! instantaneous snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Microseconds per millisecond.
pub(crate) const US_PER_MS: u64 = 1_000;

/// Number of 1ms buckets in the percentile histogram.
const PERCENTILE_BUCKETS: usize = 1_000;

/// Cell value meaning "no sample observed yet". Never escapes the crate:
/// accessors map it to `None`.
const UNSET: u64 = u64::MAX;

/// Shared scalar statistics plus the fine-grained percentile histogram.
///
/// Lifetime counters accumulate from construction and are never reset.
/// Window counters cover the span since the last [`reset_window`] call.
///
/// [`reset_window`]: AggregateStats::reset_window
pub struct AggregateStats {
    /// 1ms-resolution histogram, used only for percentile estimation.
    histogram: Vec<AtomicU64>,
    /// Samples beyond the histogram range. A sample lands in exactly one
    /// of `histogram` or `overflow`, never both.
    overflow: AtomicU64,
    operations: AtomicU64,
    total_latency: AtomicU64,
    window_operations: AtomicU64,
    window_total_latency: AtomicU64,
    min: AtomicU64,
    max: AtomicU64,
    window_min: AtomicU64,
    window_max: AtomicU64,
    count: AtomicU64,
    success: AtomicU64,
}

impl AggregateStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self {
            histogram: (0..PERCENTILE_BUCKETS).map(|_| AtomicU64::new(0)).collect(),
            overflow: AtomicU64::new(0),
            operations: AtomicU64::new(0),
            total_latency: AtomicU64::new(0),
            window_operations: AtomicU64::new(0),
            window_total_latency: AtomicU64::new(0),
            min: AtomicU64::new(UNSET),
            max: AtomicU64::new(UNSET),
            window_min: AtomicU64::new(UNSET),
            window_max: AtomicU64::new(UNSET),
            count: AtomicU64::new(0),
            success: AtomicU64::new(0),
        }
    }

    /// Record one completed operation.
    ///
    /// `count` and `success` are caller-defined secondary tallies (e.g.
    /// items requested / items found in a batch); zero deltas are skipped.
    /// Never blocks and never fails.
    pub fn record(&self, elapsed_us: u64, count: u64, success: u64) {
        let latency_ms = (elapsed_us / US_PER_MS) as usize;
        if latency_ms < self.histogram.len() {
            self.histogram[latency_ms].fetch_add(1, Ordering::Relaxed);
        } else {
            self.overflow.fetch_add(1, Ordering::Relaxed);
        }
        self.operations.fetch_add(1, Ordering::Relaxed);
        self.total_latency.fetch_add(elapsed_us, Ordering::Relaxed);
        self.window_operations.fetch_add(1, Ordering::Relaxed);
        self.window_total_latency.fetch_add(elapsed_us, Ordering::Relaxed);

        if count > 0 {
            self.count.fetch_add(count, Ordering::Relaxed);
        }
        if success > 0 {
            self.success.fetch_add(success, Ordering::Relaxed);
        }

        relax_min(&self.min, elapsed_us);
        relax_max(&self.max, elapsed_us);
        relax_min(&self.window_min, elapsed_us);
        relax_max(&self.window_max, elapsed_us);
    }

    /// Estimate the 95th and 99th percentile, as millisecond bucket
    /// indices, from a single forward walk of the histogram.
    ///
    /// Each threshold is captured at the first bucket where the cumulative
    /// fraction of all recorded operations reaches it; the walk stops as
    /// soon as 0.99 is met. When 0.99 is never reached inside the
    /// histogram range (heavy overflow), the second value stays 0.
    pub fn percentiles(&self) -> (u64, u64) {
        let total = self.operations.load(Ordering::Relaxed) as f64;
        let mut seen: u64 = 0;
        let mut p95 = 0u64;
        let mut p99 = 0u64;
        let mut done95 = false;

        for (i, bucket) in self.histogram.iter().enumerate() {
            seen += bucket.load(Ordering::Relaxed);
            let fraction = seen as f64 / total;
            if !done95 && fraction >= 0.95 {
                p95 = i as u64;
                done95 = true;
            }
            if fraction >= 0.99 {
                p99 = i as u64;
                break;
            }
        }
        (p95, p99)
    }

    /// Reset every windowed counter and both tallies.
    ///
    /// Not synchronized with concurrent [`record`] calls: a sample landing
    /// mid-reset is attributed to either the closing window or the next
    /// one, never both and never neither.
    ///
    /// [`record`]: AggregateStats::record
    pub fn reset_window(&self) {
        self.window_operations.store(0, Ordering::Relaxed);
        self.window_total_latency.store(0, Ordering::Relaxed);
        self.window_min.store(UNSET, Ordering::Relaxed);
        self.window_max.store(UNSET, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
        self.success.store(0, Ordering::Relaxed);
    }

    /// Lifetime operation count.
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// Lifetime latency sum in microseconds.
    pub fn total_latency_us(&self) -> u64 {
        self.total_latency.load(Ordering::Relaxed)
    }

    /// Operations recorded since the last window reset.
    pub fn window_operations(&self) -> u64 {
        self.window_operations.load(Ordering::Relaxed)
    }

    /// Mean latency of the current window, in microseconds.
    pub fn window_avg_us(&self) -> f64 {
        let total = self.window_total_latency.load(Ordering::Relaxed) as f64;
        total / self.window_operations.load(Ordering::Relaxed) as f64
    }

    /// Lifetime minimum latency in microseconds.
    pub fn min_us(&self) -> Option<u64> {
        extremum(&self.min)
    }

    /// Lifetime maximum latency in microseconds.
    pub fn max_us(&self) -> Option<u64> {
        extremum(&self.max)
    }

    /// Minimum latency of the current window, in microseconds.
    pub fn window_min_us(&self) -> Option<u64> {
        extremum(&self.window_min)
    }

    /// Maximum latency of the current window, in microseconds.
    pub fn window_max_us(&self) -> Option<u64> {
        extremum(&self.window_max)
    }

    /// Secondary "count" tally since the last window reset.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Secondary "success" tally since the last window reset.
    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    /// Samples that fell beyond the percentile histogram range.
    pub fn overflow(&self) -> u64 {
        self.overflow.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    fn histogram_sum(&self) -> u64 {
        self.histogram.iter().map(|b| b.load(Ordering::Relaxed)).sum()
    }
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self::new()
    }
}

fn extremum(cell: &AtomicU64) -> Option<u64> {
    match cell.load(Ordering::Relaxed) {
        UNSET => None,
        v => Some(v),
    }
}

/// Lower an extremum cell toward `value` with a plain load/store.
///
/// Deliberately not a compare-and-swap loop: two racing writers may
/// interleave between the load and the store and drop one of the two
/// values, so reported extrema are approximate under contention.
fn relax_min(cell: &AtomicU64, value: u64) {
    let current = cell.load(Ordering::Relaxed);
    if current == UNSET || value < current {
        cell.store(value, Ordering::Relaxed);
    }
}

/// Raise an extremum cell toward `value`; same approximation as
/// [`relax_min`].
fn relax_max(cell: &AtomicU64, value: u64) {
    let current = cell.load(Ordering::Relaxed);
    if current == UNSET || value > current {
        cell.store(value, Ordering::Relaxed);
    }
}
