//! Display-bucket strategy interface

use std::io::{self, Write};

/// A display-bucket policy: where a sample lands and how the drained
/// buckets render as a row of percentage cells.
///
/// Implementations keep one atomic counter per column and must stay
/// non-blocking on the [`observe`] path. Elapsed times beyond the largest
/// boundary always land in the final column.
///
/// [`observe`]: BucketScheme::observe
pub trait BucketScheme: Send + Sync {
    /// Column index for an elapsed time, always in `[0, columns)`.
    fn index_for(&self, elapsed_us: u64) -> usize;

    /// Count one sample into its display bucket.
    fn observe(&self, elapsed_us: u64);

    /// Strategy-specific header cells, written before the shared column
    /// suffix.
    fn header_prefix(&self) -> &str;

    /// Drain every bucket to zero and write the row label plus one
    /// percentage cell per column. No trailing newline; the caller
    /// finishes the line.
    fn write_row(&self, out: &mut dyn Write, label: &str) -> io::Result<()>;

    /// A fresh, identically configured scheme with zeroed counters.
    fn duplicate(&self) -> Box<dyn BucketScheme>;
}
