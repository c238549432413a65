//! End-to-end checks of the printed report format

use latmark_stats::{ExponentialConfig, LatencyTracker, LinearConfig};
use std::sync::Arc;
use std::thread;

fn render_results(tracker: &LatencyTracker, label: &str) -> String {
    let mut buf = Vec::new();
    tracker.write_results(&mut buf, label).unwrap();
    String::from_utf8(buf).unwrap()
}

fn render_header(tracker: &LatencyTracker) -> String {
    let mut buf = Vec::new();
    tracker.write_header(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn linear_cumulative_report() {
    let tracker = LatencyTracker::linear(LinearConfig {
        columns: 5,
        step: 1,
        microseconds: false,
        cumulative: true,
        decimal_places: 0,
    })
    .unwrap();

    tracker.record(500, 0, 1); // 0ms bucket
    tracker.record(1_500, 0, 1); // 1ms bucket
    tracker.record(2_500, 0, 0); // 2ms bucket

    assert_eq!(
        render_header(&tracker),
        "\n       <=1ms  >1ms >2ms >3ms >4ms     avg     min      max  95th%  99th%  count success   recs\n"
    );
    // bucket 1 folds in bucket 2: 2 of 3 samples took more than 1ms
    assert_eq!(
        render_results(&tracker, "gets"),
        "gets     33%   67%  33%   0%   0%   1.5ms   0.5ms    2.5ms    2ms    2ms      3       2      0\n"
    );
}

#[test]
fn linear_raw_report() {
    let tracker = LatencyTracker::linear(LinearConfig {
        columns: 5,
        cumulative: false,
        ..Default::default()
    })
    .unwrap();

    tracker.record(500, 0, 1);
    tracker.record(1_500, 0, 1);
    tracker.record(2_500, 0, 1);

    let row = render_results(&tracker, "puts");
    // raw mode: each cell keeps its own third
    assert!(row.starts_with("puts     33%   33%  33%   0%   0%"));
}

#[test]
fn exponential_report() {
    let tracker = LatencyTracker::exponential(ExponentialConfig::default()).unwrap();

    for _ in 0..5 {
        tracker.record(500, 0, 1);
    }
    for _ in 0..3 {
        tracker.record(2_000, 0, 1);
    }
    for _ in 0..2 {
        tracker.record(3_000, 0, 1);
    }

    assert_eq!(
        render_header(&tracker),
        "      <=1ms >1ms >2ms >4ms >8ms >16ms >32ms     avg     min      max  95th%  99th%  count success   recs\n"
    );
    assert_eq!(
        render_results(&tracker, "batch"),
        "batch   50%  50%  20%   0%   0%    0%    0%   1.4ms   0.5ms    3.0ms    3ms    3ms     10      10      0\n"
    );
}

#[test]
fn second_report_without_input_is_silent() {
    let tracker = LatencyTracker::exponential(ExponentialConfig::default()).unwrap();
    tracker.record(1_000, 0, 1);

    assert!(!render_results(&tracker, "gets").is_empty());
    // the first drain reset the window and both tallies
    assert_eq!(render_results(&tracker, "gets"), "");
    assert_eq!(render_results(&tracker, "gets"), "");
}

#[test]
fn duplicate_matches_a_fresh_instance() {
    let config = LinearConfig {
        columns: 8,
        step: 2,
        microseconds: false,
        cumulative: true,
        decimal_places: 1,
    };
    let original = LatencyTracker::linear(config).unwrap();
    original.record(4_000, 0, 1);

    let copy = original.duplicate();
    let fresh = LatencyTracker::linear(config).unwrap();

    assert_eq!(render_header(&copy), render_header(&fresh));
    assert_eq!(copy.operations(), 0);

    // streams count independently
    copy.record(1_000, 0, 1);
    assert_eq!(original.operations(), 1);
    assert_eq!(copy.operations(), 1);
}

#[test]
fn concurrent_recording_keeps_counts_exact() {
    let tracker = Arc::new(LatencyTracker::exponential(ExponentialConfig::default()).unwrap());

    let mut handles = vec![];
    for t in 0..8u64 {
        let tracker = Arc::clone(&tracker);
        handles.push(thread::spawn(move || {
            for i in 0..5_000u64 {
                tracker.record((t * 5_000 + i) % 40_000, 0, 1);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(tracker.operations(), 40_000);
    let snap = tracker.snapshot();
    assert_eq!(snap.operations, 40_000);
    assert!(snap.min_us.unwrap() <= snap.max_us.unwrap());

    // one drain after the dust settles accounts for every sample
    let row = render_results(&tracker, "gets");
    assert!(row.contains("  40000"));
}
