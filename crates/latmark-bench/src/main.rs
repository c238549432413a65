//! latmark workload simulator binary
//!
//! Spawns worker threads that record a synthetic get/put/batch mix into
//! named latency streams while the periodic driver prints reports.

mod cli;
mod workload;

use anyhow::Result;
use cli::{Cli, SchemeArg};
use latmark_report::{Cadence, Reporter, StreamSet};
use latmark_stats::{ExponentialConfig, LatencyTracker, LinearConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use workload::WorkerStreams;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let prototype = match cli.scheme {
        SchemeArg::Exponential => LatencyTracker::exponential(ExponentialConfig {
            columns: cli.columns,
            shift: cli.shift,
            microseconds: cli.microseconds,
        })?,
        SchemeArg::Linear => LatencyTracker::linear(LinearConfig {
            columns: cli.columns,
            step: cli.step,
            microseconds: cli.microseconds,
            cumulative: !cli.raw,
            decimal_places: cli.decimal_places,
        })?,
    };

    let cadence = Cadence::from(cli.cadence);
    let streams = Arc::new(StreamSet::new(prototype));
    let worker_streams = WorkerStreams {
        gets: streams.register("gets", cadence)?,
        puts: streams.register("puts", cadence)?,
        batch: streams.register("batch", cadence)?,
    };

    let reporter = Arc::new(Reporter::stdout(Arc::clone(&streams)));
    let driver = if streams.min_period().is_some() {
        Some(Arc::clone(&reporter).spawn()?)
    } else {
        None
    };

    tracing::info!("running {} workers for {}s", cli.threads, cli.duration);

    let stop = Arc::new(AtomicBool::new(false));
    let workers: Vec<_> = (0..cli.threads)
        .map(|i| {
            let streams = worker_streams.clone();
            let stop = Arc::clone(&stop);
            let seed = cli.seed + i as u64;
            thread::spawn(move || workload::run_worker(&streams, seed, &stop))
        })
        .collect();

    tokio::time::sleep(Duration::from_secs(cli.duration)).await;
    stop.store(true, Ordering::Relaxed);
    for worker in workers {
        let _ = worker.join();
    }

    if let Some(driver) = driver {
        driver.shutdown().await;
    }
    // one last drain so the tail of the run is not lost
    reporter.report_once()?;

    tracing::info!(
        "done: {} gets, {} puts, {} batches",
        worker_streams.gets.tracker().operations(),
        worker_streams.puts.tracker().operations(),
        worker_streams.batch.tracker().operations()
    );
    Ok(())
}
