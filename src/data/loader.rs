// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Loads question/answer rows from a CSV file using the csv crate.
//
// Expected layout:
//   question,answer,source,focus_area
//   What is diabetes?,A chronic condition...,NIH,Diabetes
//
//   - The first row is a header; columns are found by NAME,
//     so their position and any extra columns do not matter
//   - Standard CSV quoting applies (answers often contain commas
//     and newlines)
//   - An empty cell is a missing value
//
// Any problem (missing file, missing column, ragged row) is an
// error: training cannot proceed on a dataset it cannot read.

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};

use crate::domain::traits::{DatasetSource, RawRecord};

pub const QUESTION_COLUMN: &str = "question";
pub const ANSWER_COLUMN:   &str = "answer";

/// Reads raw records from a CSV file on disk.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvLoader {
    fn load_records(&self) -> Result<Vec<RawRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read header row of '{}'", self.path.display()))?
            .clone();

        let question_idx = column_index(&headers, QUESTION_COLUMN, &self.path)?;
        let answer_idx   = column_index(&headers, ANSWER_COLUMN, &self.path)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let record = result.with_context(|| {
                format!("Malformed CSV row {} in '{}'", row + 2, self.path.display())
            })?;

            records.push(RawRecord {
                question: non_empty(record.get(question_idx)),
                answer:   non_empty(record.get(answer_idx)),
            });
        }

        tracing::debug!("Read {} raw rows from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Find a column by exact header name.
fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| anyhow!("Dataset '{}' has no '{}' column", path.display(), name))
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.filter(|s| !s.is_empty()).map(str::to_string)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_reads_columns_by_name() {
        let f = write_csv(
            "source,answer,question\n\
             NIH,\"Sugar, mostly.\",What is diabetes?\n",
        );
        let records = CsvLoader::new(f.path()).load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question.as_deref(), Some("What is diabetes?"));
        assert_eq!(records[0].answer.as_deref(), Some("Sugar, mostly."));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let f = write_csv("question,answer\nWhat is flu?,\n,An answer\n");
        let records = CsvLoader::new(f.path()).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].answer, None);
        assert_eq!(records[1].question, None);
    }

    #[test]
    fn test_quoted_multiline_answer() {
        let f = write_csv("question,answer\nQ1,\"line one\nline two\"\n");
        let records = CsvLoader::new(f.path()).load_records().unwrap();
        assert_eq!(records[0].answer.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLoader::new(dir.path().join("nope.csv")).load_records();
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let f   = write_csv("question,reply\nQ,A\n");
        let err = CsvLoader::new(f.path()).load_records().unwrap_err();
        assert!(err.to_string().contains("answer"));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let f = write_csv("question,answer\nQ,A,extra\n");
        assert!(CsvLoader::new(f.path()).load_records().is_err());
    }
}
