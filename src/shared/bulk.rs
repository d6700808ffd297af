//! Bulk question import
//!
//! Reads a question bank from CSV. The header row must name the columns
//! `topic_id`, `question`, `type`, `options` and `correct_ans`; column order
//! is free and blank lines are skipped.
//!
//! ```rust
//! use revisewise::shared::bulk::parse_questions;
//!
//! let csv = "topic_id,question,type,options,correct_ans\n\
//!            4,Sun is a star?,true-false,,True\n";
//! let rows = parse_questions(csv.as_bytes()).unwrap();
//! assert_eq!(rows[0].topic_id, 4);
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::models::BulkQuestionRow;

/// Columns every file must carry
pub const COLUMNS: [&str; 5] = ["topic_id", "question", "type", "options", "correct_ans"];

#[derive(Debug, Error)]
pub enum BulkError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    /// `line` counts the header as line 1
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },
    #[error("the file contains no questions")]
    Empty,
}

/// Parse every row, stopping at the first bad one.
pub fn parse_questions<R: Read>(source: R) -> Result<Vec<BulkQuestionRow>, BulkError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| row_error(&e, 1))?.clone();
    if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(BulkError::MissingColumn(*missing));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<BulkQuestionRow>().enumerate() {
        let fallback_line = index as u64 + 2;
        let row = record.map_err(|e| row_error(&e, fallback_line))?;
        if row.question.is_empty() {
            return Err(BulkError::Row {
                line: fallback_line,
                message: "question is empty".to_string(),
            });
        }
        if row.correct_ans.is_empty() {
            return Err(BulkError::Row {
                line: fallback_line,
                message: "correct_ans is empty".to_string(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(BulkError::Empty);
    }
    Ok(rows)
}

/// Read and parse a CSV file from disk.
pub fn parse_file(path: &Path) -> Result<Vec<BulkQuestionRow>, BulkError> {
    let file = std::fs::File::open(path).map_err(|source| BulkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_questions(std::io::BufReader::new(file))
}

fn row_error(err: &csv::Error, fallback_line: u64) -> BulkError {
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    };
    BulkError::Row { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::QuestionType;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "topic_id,question,type,options,correct_ans";

    #[test]
    fn test_parses_rows_in_any_column_order() {
        let csv = "question, type ,topic_id,correct_ans,options\n\
                   \"2+2?\",mcq,3,4,\"3,4,5,6\"\n\
                   \n\
                   Sun is a star?,true-false,3,True,\n";
        let rows = parse_questions(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            BulkQuestionRow {
                topic_id: 3,
                question: "2+2?".to_string(),
                kind: QuestionType::Mcq,
                options: "3,4,5,6".to_string(),
                correct_ans: "4".to_string(),
            }
        );
        assert_eq!(rows[1].kind, QuestionType::TrueFalse);
        assert!(rows[1].options.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv = "topic_id,question,type,correct_ans\n1,Q,fill,A\n";
        assert_matches!(parse_questions(csv.as_bytes()), Err(BulkError::MissingColumn("options")));
    }

    #[test]
    fn test_bad_topic_id_reports_line() {
        let csv = format!("{}\n1,Q1,fill,,A\nabc,Q2,fill,,B\n", HEADER);
        let err = parse_questions(csv.as_bytes()).unwrap_err();
        assert_matches!(err, BulkError::Row { line: 3, .. });
    }

    #[test]
    fn test_blank_answer_rejected() {
        let csv = format!("{}\n1,Q1,fill,,\n", HEADER);
        let err = parse_questions(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: correct_ans is empty");
    }

    #[test]
    fn test_header_only_is_empty() {
        assert_matches!(parse_questions(format!("{}\n", HEADER).as_bytes()), Err(BulkError::Empty));
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "5,Capital of France?,short,,Paris").unwrap();

        let rows = parse_file(file.path()).unwrap();
        assert_eq!(rows[0].correct_ans, "Paris");

        let missing = parse_file(Path::new("/nonexistent/questions.csv"));
        assert_matches!(missing, Err(BulkError::Io { .. }));
    }
}
