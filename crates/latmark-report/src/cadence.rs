//! Report cadence

use std::time::Duration;

/// How often a stream's statistics are reported.
///
/// `EveryCall` logs each operation individually instead of accumulating;
/// `Never` drops samples entirely. The remaining variants accumulate and
/// are drained by the periodic driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Log every operation as it completes
    EveryCall,
    /// Report once per second
    EverySecond,
    /// Report every ten seconds
    Every10Seconds,
    /// Report once per minute
    EveryMinute,
    /// Discard samples
    Never,
}

impl Cadence {
    /// The reporting period, if this cadence is periodic.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Cadence::EverySecond => Some(Duration::from_secs(1)),
            Cadence::Every10Seconds => Some(Duration::from_secs(10)),
            Cadence::EveryMinute => Some(Duration::from_secs(60)),
            Cadence::EveryCall | Cadence::Never => None,
        }
    }

    /// Whether samples accumulate for the periodic driver.
    pub fn is_periodic(&self) -> bool {
        self.period().is_some()
    }
}
