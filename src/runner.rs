use crate::axis::Axis;
use crate::error::SweepError;
use crate::log;
use crate::output::RecordWriter;
use crate::product::{Combinations, ParameterTuple};

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};

/// Anything that is fed the tuples of a sweep, one at a time, in order.
pub trait TupleHandler {
    fn handle(&mut self, tuple: &ParameterTuple) -> Result<(), SweepError>;
}

impl<F> TupleHandler for F
where
    F: FnMut(&ParameterTuple) -> Result<(), SweepError>,
{
    fn handle(&mut self, tuple: &ParameterTuple) -> Result<(), SweepError> {
        self(tuple)
    }
}

/// Drives the handler over the full Cartesian product of the axes and
/// returns how many tuples were handled. The first handler error stops
/// the sweep.
pub fn run_sweep<H: TupleHandler>(
    axes: &[Axis],
    handler: &mut H,
) -> Result<usize, SweepError> {
    let mut handled = 0;
    for tuple in Combinations::new(axes) {
        handler.handle(&tuple)?;
        handled += 1;
    }
    Ok(handled)
}

/// Runs the target program once for a tuple and returns everything it
/// printed.
pub trait Executor {
    fn execute(&mut self, tuple: &ParameterTuple) -> io::Result<String>;

    /// Name of the program that is actually launched, for error reports.
    fn program(&self) -> &str;
}

/// A wrapping command in the style of `/usr/bin/time -f %e`, which runs
/// the target and prints the elapsed time on stderr after it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub program: String,
    pub format: String,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            program: "/usr/bin/time".to_string(),
            format: "%e".to_string(),
        }
    }
}

/// Launches the target program, optionally through a [`Timer`]. Without a
/// timer the target is expected to print its own timing as its last line.
#[derive(Debug, Clone)]
pub struct TimedCommand {
    target: String,
    timer: Option<Timer>,
    target_found: bool,
}

impl TimedCommand {
    pub fn new(target: &str, timer: Option<Timer>) -> Self {
        Self {
            target: target.to_string(),
            timer,
            target_found: false,
        }
    }

    fn command(&self, tuple: &ParameterTuple) -> Command {
        let mut command = match &self.timer {
            Some(timer) => {
                let mut c = Command::new(&timer.program);
                c.arg("-f").arg(&timer.format).arg(&self.target);
                c
            }
            None => Command::new(&self.target),
        };
        command.args(tuple.argv());
        command
    }

    /// A timer that cannot run the target still starts and reports, so the
    /// target is looked up before the first wrapped run.
    fn check_target(&mut self) -> io::Result<()> {
        if self.timer.is_none() || self.target_found {
            return Ok(());
        }
        which::which(&self.target).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("cannot find `{}`: {}", self.target, e),
            )
        })?;
        self.target_found = true;
        Ok(())
    }
}

/// Runs the command with stdout and stderr sharing one pipe, so the text
/// comes back in the order it was printed.
fn capture_interleaved(mut command: Command) -> io::Result<String> {
    let (mut reader, writer) = os_pipe::pipe()?;
    command
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    let mut child = command.spawn()?;
    // the command holds write ends until dropped
    drop(command);
    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;
    // exit status is deliberately ignored
    child.wait()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl Executor for TimedCommand {
    fn execute(&mut self, tuple: &ParameterTuple) -> io::Result<String> {
        self.check_target()?;
        capture_interleaved(self.command(tuple))
    }

    fn program(&self) -> &str {
        match &self.timer {
            Some(timer) => &timer.program,
            None => &self.target,
        }
    }
}

/// The last non-empty line of a run's output, which holds the timing.
pub fn extract_elapsed(output: &str) -> Option<&str> {
    output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Per-tuple handler of a benchmark sweep: prints progress, runs the
/// executor `repeat` times and appends one record per run.
pub struct BenchmarkHandler<E: Executor, W: Write> {
    executor: E,
    writer: RecordWriter<W>,
    repeat: usize,
}

impl<E: Executor, W: Write> BenchmarkHandler<E, W> {
    pub fn new(executor: E, writer: RecordWriter<W>, repeat: usize) -> Self {
        Self {
            executor,
            writer,
            repeat,
        }
    }

    pub fn rows_written(&self) -> usize {
        self.writer.rows_written()
    }
}

impl<E: Executor, W: Write> TupleHandler for BenchmarkHandler<E, W> {
    fn handle(&mut self, tuple: &ParameterTuple) -> Result<(), SweepError> {
        log::tuple_progress(tuple);
        for _ in 0..self.repeat {
            let output = self.executor.execute(tuple).map_err(|source| {
                SweepError::Launch {
                    program: self.executor.program().to_string(),
                    tuple: tuple.join(","),
                    source,
                }
            })?;
            // a run without timing output still gets its row
            let elapsed = extract_elapsed(&output).unwrap_or("");
            self.writer.write_row(tuple, elapsed)?;
        }
        Ok(())
    }
}
