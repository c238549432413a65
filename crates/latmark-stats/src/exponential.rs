//! Geometrically growing display buckets

use crate::aggregate::US_PER_MS;
use crate::bucket::BucketScheme;
use crate::column;
use crate::error::{ConfigError, StatsResult};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// Configuration for [`ExponentialBuckets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialConfig {
    /// Number of display columns, including the overflow column.
    pub columns: usize,
    /// Bit shift applied between consecutive bucket boundaries.
    pub shift: u32,
    /// Bucket in microseconds instead of milliseconds.
    pub microseconds: bool,
}

impl Default for ExponentialConfig {
    fn default() -> Self {
        Self {
            columns: 7,
            shift: 1,
            microseconds: false,
        }
    }
}

/// Display buckets whose boundaries double (or grow by a larger power of
/// two) from column to column: `<=1`, `>1`, `>2`, `>4`, ...
///
/// The boundary test is inclusive: a sample exactly on a boundary belongs
/// to the bucket owning that boundary, not the next one.
pub struct ExponentialBuckets {
    buckets: Vec<AtomicU64>,
    shift: u32,
    microseconds: bool,
    header: String,
}

impl ExponentialBuckets {
    /// Validate `config` and build a zero-counted scheme.
    pub fn new(config: ExponentialConfig) -> StatsResult<Self> {
        if config.columns < 2 {
            return Err(ConfigError::TooFewColumns(config.columns));
        }
        if config.shift == 0 || config.shift > 63 {
            return Err(ConfigError::ShiftOutOfRange(config.shift));
        }
        Ok(Self {
            buckets: (0..config.columns).map(|_| AtomicU64::new(0)).collect(),
            shift: config.shift,
            microseconds: config.microseconds,
            header: form_header(config.columns, config.shift, config.microseconds),
        })
    }

    /// The configuration this scheme was built with.
    pub fn config(&self) -> ExponentialConfig {
        ExponentialConfig {
            columns: self.buckets.len(),
            shift: self.shift,
            microseconds: self.microseconds,
        }
    }

    #[cfg(test)]
    fn raw_counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect()
    }
}

fn form_header(columns: usize, shift: u32, microseconds: bool) -> String {
    let units = if microseconds { "us" } else { "ms" };
    let mut s = String::with_capacity(64);
    s.push_str("      <=1");
    s.push_str(units);
    s.push_str(" >1");
    s.push_str(units);

    let mut limit: u64 = 1;
    for _ in 2..columns {
        limit <<= shift;
        s.push_str(&format!(" >{}{}", limit, units));
    }
    s
}

impl BucketScheme for ExponentialBuckets {
    fn index_for(&self, elapsed_us: u64) -> usize {
        let mut value = elapsed_us;
        if !self.microseconds {
            value /= US_PER_MS;
        }
        let last = self.buckets.len() - 1;
        let mut limit: u64 = 1;
        for i in 0..last {
            if value <= limit {
                return i;
            }
            limit <<= self.shift;
        }
        last
    }

    fn observe(&self, elapsed_us: u64) {
        self.buckets[self.index_for(elapsed_us)].fetch_add(1, Ordering::Relaxed);
    }

    fn header_prefix(&self) -> &str {
        &self.header
    }

    fn write_row(&self, out: &mut dyn Write, label: &str) -> io::Result<()> {
        // Drain from the top down, folding counts so every cell holds its
        // own count plus everything above it. Bucket 0 stays raw: its
        // "<=1" range already covers everything below it.
        let columns = self.buckets.len();
        let mut cells = vec![0u64; columns];
        let mut above: u64 = 0;
        for i in (1..columns).rev() {
            let count = self.buckets[i].swap(0, Ordering::Relaxed);
            cells[i] = count + above;
            above += count;
        }
        let count = self.buckets[0].swap(0, Ordering::Relaxed);
        cells[0] = count;
        let total = (above + count) as f64;

        column::write_label(out, label)?;
        column::write_percent(out, 1, total, cells[0], 0)?;
        column::write_percent(out, 1, total, cells[1], 0)?;

        let mut limit: i64 = 1;
        for cell in &cells[2..] {
            limit <<= self.shift;
            column::write_percent(out, limit, total, *cell, 0)?;
        }
        Ok(())
    }

    fn duplicate(&self) -> Box<dyn BucketScheme> {
        Box::new(Self {
            buckets: (0..self.buckets.len()).map(|_| AtomicU64::new(0)).collect(),
            shift: self.shift,
            microseconds: self.microseconds,
            header: self.header.clone(),
        })
    }
}
