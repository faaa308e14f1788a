use std::io;
use thiserror::Error;

/// Every failure a sweep can end with. Parse-time variants are raised
/// while building the [`crate::Config`], before any file or process is
/// touched. The remaining ones abort a sweep that is already running.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("malformed axis `{token}`: {message}")]
    Parse { token: String, message: String },

    #[error("axis `{token}` has no values")]
    EmptyAxis { token: String },

    #[error("{num_axes} axes have more combinations than can be counted")]
    TooManyCombinations { num_axes: usize },

    #[error("could not launch `{program}` for ({tuple}): {source}")]
    Launch {
        program: String,
        tuple: String,
        #[source]
        source: io::Error,
    },

    #[error("could not open output file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not write result row: {0}")]
    Csv(#[from] csv::Error),
}
