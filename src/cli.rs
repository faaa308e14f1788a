//! Command-line surface of `sweep-bench`, declared with `clap` derive.

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Runs a program over every combination of argument values and records
/// how long each run took.
#[derive(Debug, Parser)]
#[command(
    name = "sweep-bench",
    version,
    about = "Benchmark an executable over combinations of argument values.",
    arg_required_else_help = true
)]
pub struct SweepArgs {
    /// Timed runs per combination of arguments.
    #[arg(
        short = 'n',
        long = "repeat",
        default_value_t = 1,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub repeat: usize,

    /// Output CSV file. Named after the axes when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Timing command wrapped around every run.
    #[arg(long, default_value = "/usr/bin/time")]
    pub timer: String,

    /// Format passed to the timing command with `-f`.
    #[arg(long, default_value = "%e")]
    pub timer_format: String,

    /// Run the target directly and read the timing from its own last line.
    #[arg(long)]
    pub no_timer: bool,

    /// The executable to benchmark.
    #[arg(required = true)]
    pub target: String,

    /// One token per argument position: a plain value or a list such as
    /// '["a","b",c]'.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub axes: Vec<String>,
}
