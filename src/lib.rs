pub mod axis;
pub mod cli;
pub mod error;
mod log;
pub mod output;
pub mod product;
pub mod runner;

use axis::Axis;
use cli::SweepArgs;
use error::SweepError;
use output::RecordWriter;
use runner::{BenchmarkHandler, TimedCommand, Timer};
use std::path::PathBuf;
use std::time::Instant;

/// Everything a sweep needs, resolved from the command line before any
/// file is created or any process is launched.
#[derive(Debug)]
pub struct Config {
    pub target: String,
    pub repeat: usize,
    pub axes: Vec<Axis>,
    pub timer: Option<Timer>,
    pub output: PathBuf,
}

impl Config {
    pub fn build(args: SweepArgs) -> Result<Self, SweepError> {
        let axes = axis::parse_axes(args.axes.as_slice())?;
        count_combinations(&axes)?;

        let timer = if args.no_timer {
            None
        } else {
            Some(Timer {
                program: args.timer,
                format: args.timer_format,
            })
        };

        let output = args.output.unwrap_or_else(|| {
            PathBuf::from(output::default_output_name(&axes))
        });

        Ok(Self {
            target: args.target,
            repeat: args.repeat,
            axes,
            timer,
            output,
        })
    }
}

fn count_combinations(axes: &[Axis]) -> Result<usize, SweepError> {
    product::combination_count(axes).ok_or(SweepError::TooManyCombinations {
        num_axes: axes.len(),
    })
}

pub fn run(config: &Config) -> Result<(), SweepError> {
    let begin = Instant::now();
    let num_tuples = count_combinations(&config.axes)?;
    log::show_greeting(&config.target, num_tuples, config.repeat);

    log::output_file_line(&config.output.display().to_string());
    let writer = RecordWriter::create(&config.output)?;
    let executor = TimedCommand::new(&config.target, config.timer.clone());
    let mut handler = BenchmarkHandler::new(executor, writer, config.repeat);

    let handled = runner::run_sweep(&config.axes, &mut handler)?;

    log::show_farewell(handled, handler.rows_written(), begin.elapsed());

    Ok(())
}
