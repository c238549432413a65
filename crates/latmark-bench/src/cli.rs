//! CLI argument parsing for latmark-bench

use clap::{Parser, ValueEnum};
use latmark_report::Cadence;

/// latmark workload simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "latmark")]
#[command(about = "Drives a synthetic workload through latmark latency reports")]
#[command(version)]
pub struct Cli {
    /// Display bucket scheme
    #[arg(long, value_enum, default_value = "exponential")]
    pub scheme: SchemeArg,

    /// Number of display columns
    #[arg(long, default_value = "7")]
    pub columns: usize,

    /// Bit shift between exponential bucket boundaries
    #[arg(long, default_value = "1")]
    pub shift: u32,

    /// Additive step between linear header labels
    #[arg(long, default_value = "1")]
    pub step: u64,

    /// Bucket in microseconds instead of milliseconds
    #[arg(long, default_value_t = false)]
    pub microseconds: bool,

    /// Print linear buckets raw instead of cumulative
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Decimal places for linear percentage cells
    #[arg(long, default_value = "0")]
    pub decimal_places: usize,

    /// Report cadence
    #[arg(long, value_enum, default_value = "every-second")]
    pub cadence: CadenceArg,

    /// Worker thread count
    #[arg(long, default_value = "5")]
    pub threads: usize,

    /// Run duration in seconds
    #[arg(long, default_value = "5")]
    pub duration: u64,

    /// Base RNG seed; worker i runs on seed + i
    #[arg(long, default_value = "1")]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Which display bucket scheme to build
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeArg {
    /// Boundaries grow geometrically
    Exponential,
    /// Unit-width buckets
    Linear,
}

/// CLI-facing mirror of [`Cadence`]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceArg {
    /// Log each operation instead of accumulating
    EveryCall,
    /// Report once per second
    EverySecond,
    /// Report every ten seconds
    Every10Seconds,
    /// Report once per minute
    EveryMinute,
}

impl From<CadenceArg> for Cadence {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::EveryCall => Cadence::EveryCall,
            CadenceArg::EverySecond => Cadence::EverySecond,
            CadenceArg::Every10Seconds => Cadence::Every10Seconds,
            CadenceArg::EveryMinute => Cadence::EveryMinute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["latmark"]);
        assert_eq!(cli.scheme, SchemeArg::Exponential);
        assert_eq!(cli.columns, 7);
        assert_eq!(cli.shift, 1);
        assert_eq!(cli.step, 1);
        assert!(!cli.microseconds);
        assert!(!cli.raw);
        assert_eq!(cli.decimal_places, 0);
        assert_eq!(cli.cadence, CadenceArg::EverySecond);
        assert_eq!(cli.threads, 5);
        assert_eq!(cli.duration, 5);
        assert_eq!(cli.seed, 1);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_custom_values() {
        let cli = Cli::parse_from([
            "latmark",
            "--scheme", "linear",
            "--columns", "20",
            "--step", "2",
            "--raw",
            "--decimal-places", "1",
            "--cadence", "every-call",
            "--threads", "2",
            "--duration", "10",
            "--log-level", "debug",
        ]);
        assert_eq!(cli.scheme, SchemeArg::Linear);
        assert_eq!(cli.columns, 20);
        assert_eq!(cli.step, 2);
        assert!(cli.raw);
        assert_eq!(cli.decimal_places, 1);
        assert_eq!(cli.cadence, CadenceArg::EveryCall);
        assert_eq!(cli.threads, 2);
        assert_eq!(cli.duration, 10);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_cadence_conversion() {
        assert_eq!(Cadence::from(CadenceArg::EveryCall), Cadence::EveryCall);
        assert_eq!(Cadence::from(CadenceArg::EveryMinute), Cadence::EveryMinute);
    }
}
