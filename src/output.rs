use crate::axis::Axis;
use crate::error::SweepError;
use crate::product::ParameterTuple;

use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::iter;
use std::path::Path;

const OUTPUT_PREFIX: &str = "benchmark_";
const OUTPUT_EXTENSION: &str = ".csv";

/// File name for a sweep over the given axes: every axis becomes its
/// comma-joined values and the axes are joined with underscores.
pub fn default_output_name(axes: &[Axis]) -> String {
    let labels: Vec<String> = axes.iter().map(|axis| axis.label()).collect();
    format!("{}{}{}", OUTPUT_PREFIX, labels.join("_"), OUTPUT_EXTENSION)
}

/// Appends run records as headerless CSV rows. Every row is flushed as
/// soon as it is written, so an interrupted sweep keeps what it measured.
pub struct RecordWriter<W: Write> {
    out: W,
    builder: WriterBuilder,
    rows_written: usize,
}

impl RecordWriter<File> {
    pub fn create(path: &Path) -> Result<Self, SweepError> {
        let file = File::create(path).map_err(|source| SweepError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn from_writer(out: W) -> Self {
        let mut builder = WriterBuilder::new();
        builder.has_headers(false).quote_style(QuoteStyle::Never);
        Self {
            out,
            builder,
            rows_written: 0,
        }
    }

    /// Writes `value_1,...,value_k,elapsed` followed by a newline.
    pub fn write_row(
        &mut self,
        tuple: &ParameterTuple,
        elapsed: &str,
    ) -> Result<(), SweepError> {
        let row = self.encode(tuple, elapsed)?;
        self.out.write_all(&row).map_err(csv::Error::from)?;
        self.out.flush().map_err(csv::Error::from)?;
        self.rows_written += 1;
        Ok(())
    }

    fn encode(
        &self,
        tuple: &ParameterTuple,
        elapsed: &str,
    ) -> Result<Vec<u8>, SweepError> {
        // csv writes a lone empty field as `""`
        if tuple.is_empty() && elapsed.is_empty() {
            return Ok(b"\n".to_vec());
        }
        let fields = tuple
            .values()
            .iter()
            .map(String::as_str)
            .chain(iter::once(elapsed));
        let mut wtr = self.builder.from_writer(vec![]);
        wtr.write_record(fields)?;
        let row = wtr
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(row)
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::parse_axes;

    fn tuple(values: &[&str]) -> ParameterTuple {
        ParameterTuple::new(values.iter().map(|v| v.to_string()).collect())
    }

    fn written(rows: &[(Vec<&str>, &str)]) -> String {
        let mut wtr = RecordWriter::from_writer(vec![]);
        for (values, elapsed) in rows {
            wtr.write_row(&tuple(values), elapsed).unwrap();
        }
        assert_eq!(wtr.rows_written(), rows.len());
        String::from_utf8(wtr.into_inner()).unwrap()
    }

    #[test]
    fn test_rows_have_values_then_elapsed() {
        let contents =
            written(&[(vec!["1", "x"], "0.01"), (vec!["2", "x"], "0.02")]);
        assert_eq!(contents, "1,x,0.01\n2,x,0.02\n");
    }

    #[test]
    fn test_values_are_not_quoted() {
        let contents = written(&[(vec!["a,b", "say \"hi\""], "1.5")]);
        assert_eq!(contents, "a,b,say \"hi\",1.5\n");
    }

    #[test]
    fn test_empty_tuple_writes_only_elapsed() {
        let contents = written(&[(vec![], "0.30")]);
        assert_eq!(contents, "0.30\n");
    }

    #[test]
    fn test_empty_tuple_without_elapsed_writes_bare_newline() {
        let contents = written(&[(vec![], ""), (vec![], "")]);
        assert_eq!(contents, "\n\n");
    }

    #[test]
    fn test_missing_elapsed_leaves_last_field_empty() {
        let contents = written(&[(vec!["a"], ""), (vec!["", ""], "")]);
        assert_eq!(contents, "a,\n,,\n");
    }

    #[test]
    fn test_default_output_name() {
        let axes =
            parse_axes(&[r#"["1","2"]"#, "x", "[./in/a.txt]"]).unwrap();
        assert_eq!(default_output_name(&axes), "benchmark_1,2_x_.ina.txt.csv");
    }

    #[test]
    fn test_default_output_name_without_axes() {
        assert_eq!(default_output_name(&[]), "benchmark_.csv");
    }

    #[test]
    fn test_create_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        match RecordWriter::create(&path) {
            Err(SweepError::Io { path: reported, .. }) => {
                assert!(reported.ends_with("out.csv"))
            }
            _ => panic!("expected an Io error"),
        }
    }
}
