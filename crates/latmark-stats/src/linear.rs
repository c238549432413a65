//! Unit-width display buckets

use crate::aggregate::US_PER_MS;
use crate::bucket::BucketScheme;
use crate::column;
use crate::error::{ConfigError, StatsResult};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// Configuration for [`LinearBuckets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearConfig {
    /// Number of display columns, including the overflow column.
    pub columns: usize,
    /// Additive growth of the printed boundary labels. Placement is
    /// strictly unit-indexed (one bucket per unit of elapsed time), so a
    /// step above 1 stretches the header labels without moving any
    /// samples; the asymmetry is intentional.
    pub step: u64,
    /// Bucket in microseconds instead of milliseconds.
    pub microseconds: bool,
    /// Fold each bucket's count into every lower column (a survival-style
    /// view) instead of printing raw counts.
    pub cumulative: bool,
    /// Decimal places for the percentage cells.
    pub decimal_places: usize,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            step: 1,
            microseconds: false,
            cumulative: true,
            decimal_places: 0,
        }
    }
}

/// Display buckets one unit of elapsed time wide: a sample's bucket index
/// is its elapsed time in the configured unit, capped at the final
/// (overflow) column.
pub struct LinearBuckets {
    buckets: Vec<AtomicU64>,
    step: u64,
    microseconds: bool,
    cumulative: bool,
    decimal_places: usize,
    header: String,
}

impl LinearBuckets {
    /// Validate `config` and build a zero-counted scheme.
    pub fn new(config: LinearConfig) -> StatsResult<Self> {
        if config.columns < 2 {
            return Err(ConfigError::TooFewColumns(config.columns));
        }
        Ok(Self {
            buckets: (0..config.columns).map(|_| AtomicU64::new(0)).collect(),
            step: config.step,
            microseconds: config.microseconds,
            cumulative: config.cumulative,
            decimal_places: config.decimal_places,
            header: form_header(config),
        })
    }

    /// The configuration this scheme was built with.
    pub fn config(&self) -> LinearConfig {
        LinearConfig {
            columns: self.buckets.len(),
            step: self.step,
            microseconds: self.microseconds,
            cumulative: self.cumulative,
            decimal_places: self.decimal_places,
        }
    }

    #[cfg(test)]
    fn raw_counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect()
    }
}

fn form_header(config: LinearConfig) -> String {
    let units = if config.microseconds { "us" } else { "ms" };
    let width = 6 + column::decimal_pad(config.decimal_places);
    let mut s = String::with_capacity(64);
    s.push('\n');
    s.push_str("       <=1");
    s.push_str(units);
    pad(&mut s, width.saturating_sub(5));
    s.push_str(" >1");
    s.push_str(units);
    pad(&mut s, width.saturating_sub(4 + units.len()));

    let mut limit: u64 = 1;
    for _ in 2..config.columns {
        limit += config.step;
        s.push_str(&format!(" >{}{}", limit, units));
        pad(&mut s, column::decimal_pad(config.decimal_places));
    }
    s
}

fn pad(s: &mut String, count: usize) {
    for _ in 0..count {
        s.push(' ');
    }
}

impl BucketScheme for LinearBuckets {
    fn index_for(&self, elapsed_us: u64) -> usize {
        let mut value = elapsed_us;
        if !self.microseconds {
            value /= US_PER_MS;
        }
        let last = self.buckets.len() - 1;
        if (value as usize) < last {
            value as usize
        } else {
            last
        }
    }

    fn observe(&self, elapsed_us: u64) {
        self.buckets[self.index_for(elapsed_us)].fetch_add(1, Ordering::Relaxed);
    }

    fn header_prefix(&self) -> &str {
        &self.header
    }

    fn write_row(&self, out: &mut dyn Write, label: &str) -> io::Result<()> {
        // Drain from the top down; in cumulative mode each cell folds in
        // everything above it. Bucket 0 stays raw either way.
        let columns = self.buckets.len();
        let mut cells = vec![0u64; columns];
        let mut above: u64 = 0;
        for i in (1..columns).rev() {
            let count = self.buckets[i].swap(0, Ordering::Relaxed);
            cells[i] = if self.cumulative { count + above } else { count };
            above += count;
        }
        let count = self.buckets[0].swap(0, Ordering::Relaxed);
        cells[0] = count;
        let total = (above + count) as f64;

        column::write_label(out, label)?;
        let mut limit: i64 = 0;
        column::write_percent(out, limit - 1, total, cells[0], self.decimal_places)?;
        column::write_percent(out, limit - 1, total, cells[1], self.decimal_places)?;

        for cell in &cells[2..] {
            limit += self.step as i64;
            column::write_percent(out, limit, total, *cell, self.decimal_places)?;
        }
        Ok(())
    }

    fn duplicate(&self) -> Box<dyn BucketScheme> {
        Box::new(Self {
            buckets: (0..self.buckets.len()).map(|_| AtomicU64::new(0)).collect(),
            step: self.step,
            microseconds: self.microseconds,
            cumulative: self.cumulative,
            decimal_places: self.decimal_places,
            header: self.header.clone(),
        })
    }
}
