//! Property checks for bucket placement and counter conservation

use latmark_stats::{
    BucketScheme, ExponentialBuckets, ExponentialConfig, LatencyTracker, LinearBuckets,
    LinearConfig,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn exponential_index_in_range(
        elapsed in any::<u64>(),
        columns in 2usize..16,
        shift in 1u32..5,
    ) {
        let scheme = ExponentialBuckets::new(ExponentialConfig {
            columns,
            shift,
            microseconds: false,
        }).unwrap();
        prop_assert!(scheme.index_for(elapsed) < columns);
    }

    #[test]
    fn exponential_index_monotone(
        a in any::<u64>(),
        b in any::<u64>(),
        shift in 1u32..5,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let scheme = ExponentialBuckets::new(ExponentialConfig {
            columns: 10,
            shift,
            microseconds: true,
        }).unwrap();
        prop_assert!(scheme.index_for(lo) <= scheme.index_for(hi));
    }

    #[test]
    fn linear_index_is_unit_value_below_overflow(
        elapsed_ms in 0u64..64,
        columns in 2usize..64,
    ) {
        let scheme = LinearBuckets::new(LinearConfig {
            columns,
            ..Default::default()
        }).unwrap();
        let index = scheme.index_for(elapsed_ms * 1_000);
        if (elapsed_ms as usize) < columns - 1 {
            prop_assert_eq!(index, elapsed_ms as usize);
        } else {
            prop_assert_eq!(index, columns - 1);
        }
    }

    #[test]
    fn tracker_operations_conserved(
        latencies in proptest::collection::vec(0u64..2_000_000, 1..200),
    ) {
        let tracker = LatencyTracker::exponential(ExponentialConfig::default()).unwrap();
        for &us in &latencies {
            tracker.record(us, 0, 1);
        }
        prop_assert_eq!(tracker.operations(), latencies.len() as u64);

        let snap = tracker.snapshot();
        prop_assert_eq!(snap.min_us, latencies.iter().copied().min());
        prop_assert_eq!(snap.max_us, latencies.iter().copied().max());
        prop_assert_eq!(snap.total_latency_us, latencies.iter().sum::<u64>());
    }

    #[test]
    fn duplicate_streams_do_not_interfere(
        first in proptest::collection::vec(0u64..100_000, 0..50),
        second in proptest::collection::vec(0u64..100_000, 0..50),
    ) {
        let original = LatencyTracker::linear(LinearConfig::default()).unwrap();
        let copy = original.duplicate();
        for &us in &first {
            original.record(us, 0, 1);
        }
        for &us in &second {
            copy.record(us, 0, 1);
        }
        prop_assert_eq!(original.operations(), first.len() as u64);
        prop_assert_eq!(copy.operations(), second.len() as u64);
    }
}
