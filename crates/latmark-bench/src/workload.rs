//! Synthetic operation mix

use latmark_report::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Handles to the per-category streams a worker records into.
#[derive(Clone)]
pub struct WorkerStreams {
    /// Single-record read operations
    pub gets: Arc<Stream>,
    /// Single-record write operations
    pub puts: Arc<Stream>,
    /// Multi-record batch reads; these feed the count/success tallies
    pub batch: Arc<Stream>,
}

/// Drive a randomized 2/2/1 get/put/batch mix until `stop` flips.
pub fn run_worker(streams: &WorkerStreams, seed: u64, stop: &AtomicBool) {
    let mut rng = StdRng::seed_from_u64(seed);
    while !stop.load(Ordering::Relaxed) {
        match rng.gen_range(0..5u32) {
            0 | 1 => streams.gets.record(sample_latency_us(&mut rng), 0, 1),
            2 | 3 => streams.puts.record(sample_latency_us(&mut rng), 0, 1),
            _ => {
                let keys = rng.gen_range(2..12u64);
                let found = rng.gen_range(0..=keys);
                // batches touch several records, so they run longer
                streams
                    .batch
                    .record(sample_latency_us(&mut rng) * 2, keys, found);
            }
        }
        // pace the loop so a short run yields a readable report volume
        thread::sleep(Duration::from_micros(rng.gen_range(50..500)));
    }
}

/// Long-tailed synthetic latency: mostly sub-millisecond with occasional
/// multi-millisecond outliers.
fn sample_latency_us(rng: &mut StdRng) -> u64 {
    match rng.gen_range(0..10u32) {
        0..=6 => rng.gen_range(100..1_000),
        7 | 8 => rng.gen_range(1_000..8_000),
        _ => rng.gen_range(8_000..50_000),
    }
}
