//! Snapshot export for programmatic consumers

use crate::aggregate::AggregateStats;
use serde::{Deserialize, Serialize};

/// Point-in-time summary of a tracker's lifetime statistics.
///
/// Reading a snapshot drains nothing; windowed state and display buckets
/// are untouched. Concurrent writers make the fields mutually
/// approximate, not a consistent cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    /// Lifetime operation count
    pub operations: u64,
    /// Lifetime latency sum in microseconds
    pub total_latency_us: u64,
    /// Lifetime mean latency in microseconds (0 when nothing recorded)
    pub avg_us: f64,
    /// Lifetime minimum latency in microseconds
    pub min_us: Option<u64>,
    /// Lifetime maximum latency in microseconds
    pub max_us: Option<u64>,
    /// Estimated 95th percentile millisecond bucket
    pub p95_ms: u64,
    /// Estimated 99th percentile millisecond bucket
    pub p99_ms: u64,
    /// Samples beyond the percentile histogram range
    pub overflow: u64,
}

impl TrackerSnapshot {
    /// Capture a snapshot from live statistics.
    pub fn from_stats(stats: &AggregateStats) -> Self {
        let operations = stats.operations();
        let total_latency_us = stats.total_latency_us();
        let avg_us = if operations == 0 {
            0.0
        } else {
            total_latency_us as f64 / operations as f64
        };
        let (p95_ms, p99_ms) = stats.percentiles();

        Self {
            operations,
            total_latency_us,
            avg_us,
            min_us: stats.min_us(),
            max_us: stats.max_us(),
            p95_ms,
            p99_ms,
            overflow: stats.overflow(),
        }
    }

    /// Export as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export as compact JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
