use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, debug_span, info};

use super::score_string::{parse_score_cell, ScoreMap};
use super::types::{AnswerOption, OptionLabel, Question, QuestionSet};
use crate::error::QuestionSourceError;

/// Columns every question table must have.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "id",
    "prompt",
    "option_A_text",
    "option_A_scores",
    "option_B_text",
    "option_B_scores",
];

/// One row of the question table, as deserialized from CSV.
/// Empty cells come through as `None`.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: Option<String>,
    prompt: Option<String>,
    #[serde(rename = "option_A_text")]
    option_a_text: Option<String>,
    #[serde(rename = "option_A_scores")]
    option_a_scores: Option<String>,
    #[serde(rename = "option_B_text")]
    option_b_text: Option<String>,
    #[serde(rename = "option_B_scores")]
    option_b_scores: Option<String>,
    #[serde(rename = "option_C_text", default)]
    option_c_text: Option<String>,
    #[serde(rename = "option_C_scores", default)]
    option_c_scores: Option<String>,
    #[serde(rename = "option_D_text", default)]
    option_d_text: Option<String>,
    #[serde(rename = "option_D_scores", default)]
    option_d_scores: Option<String>,
}

impl QuestionRow {
    fn cells(&self, label: OptionLabel) -> (Option<&str>, Option<&str>) {
        let (text, scores) = match label {
            OptionLabel::A => (&self.option_a_text, &self.option_a_scores),
            OptionLabel::B => (&self.option_b_text, &self.option_b_scores),
            OptionLabel::C => (&self.option_c_text, &self.option_c_scores),
            OptionLabel::D => (&self.option_d_text, &self.option_d_scores),
        };
        (text.as_deref(), scores.as_deref())
    }
}

/// Load the question table from a CSV file.
///
/// # Errors
///
/// Any error aborts the whole load; no partial question set is produced.
/// Malformed score cells are not errors (see [`super::parse_scores`]).
pub fn load_questions(path: &Path) -> Result<QuestionSet, QuestionSourceError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => QuestionSourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => QuestionSourceError::Open {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let questions = parse_questions(file)?;
    info!(count = questions.len(), path = %path.display(), "loaded questions");
    Ok(questions)
}

/// Parse a question table from any reader.
///
/// Rows may stop early as long as every required column is present; the
/// missing trailing cells count as empty. Rows wider than the header are
/// rejected.
pub fn parse_questions<R: Read>(source: R) -> Result<QuestionSet, QuestionSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(QuestionSourceError::Empty);
    }

    let mut seen = HashSet::new();
    for header in headers.iter() {
        if !seen.insert(header) {
            return Err(QuestionSourceError::DuplicateColumn(header.to_string()));
        }
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !seen.contains(**col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(QuestionSourceError::MissingColumns(missing));
    }

    let scores_columns: HashSet<OptionLabel> = OptionLabel::ALL
        .into_iter()
        .filter(|label| seen.contains(label.scores_column()))
        .collect();

    // Fields a row needs to reach its last required column
    let needed = headers
        .iter()
        .collect::<Vec<_>>()
        .into_iter()
        .rposition(|h| REQUIRED_COLUMNS.contains(&h))
        .map_or(0, |i| i + 1);

    let mut questions = QuestionSet::new();
    for (index, result) in reader.records().enumerate() {
        let mut record = result?;
        // Line number in the source, header is line 1
        let line = record
            .position()
            .map_or(index + 2, |pos| pos.line() as usize);

        if record.len() > headers.len() {
            return Err(QuestionSourceError::LongRow {
                row: line,
                found: record.len(),
                expected: headers.len(),
            });
        }
        if record.len() < needed {
            return Err(QuestionSourceError::ShortRow {
                row: line,
                found: record.len(),
                needed,
            });
        }

        // Missing trailing cells read as empty
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: QuestionRow = record.deserialize(Some(&headers))?;

        let question = build_question(row, line, &scores_columns)?;
        let id = question.id.clone();
        if !questions.insert(question) {
            return Err(QuestionSourceError::DuplicateId { row: line, id });
        }
    }

    if questions.is_empty() {
        return Err(QuestionSourceError::NoQuestions);
    }

    Ok(questions)
}

fn build_question(
    row: QuestionRow,
    line: usize,
    scores_columns: &HashSet<OptionLabel>,
) -> Result<Question, QuestionSourceError> {
    let id = coerce_id(row.id.as_deref(), line)?;
    let prompt = match row.prompt.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => {
            return Err(QuestionSourceError::RowValidation {
                row: line,
                column: "prompt",
                value: row.prompt.clone().unwrap_or_default(),
                reason: "prompt must be non-empty text",
            })
        }
    };

    let _span = debug_span!("question", id = %id).entered();

    let mut options = BTreeMap::new();
    for label in OptionLabel::ALL {
        let (text, scores_cell) = row.cells(label);

        let text = match text {
            Some(t) if !t.is_empty() => t.to_string(),
            _ if label.is_required() => String::new(),
            _ => continue,
        };

        let scores = if label.is_required() || scores_columns.contains(&label) {
            parse_score_cell(scores_cell)
        } else {
            debug!(option = %label, "no scores column, option awards no points");
            ScoreMap::new()
        };

        options.insert(label, AnswerOption { text, scores });
    }

    Ok(Question {
        id,
        prompt,
        options,
    })
}

/// Coerce an id cell to its string form. Integer ids are canonicalized,
/// so `"007"` and `"7"` name the same question.
fn coerce_id(raw: Option<&str>, line: usize) -> Result<String, QuestionSourceError> {
    let raw = raw.unwrap_or_default();
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(QuestionSourceError::RowValidation {
            row: line,
            column: "id",
            value: raw.to_string(),
            reason: "id must not be empty",
        });
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n.to_string());
    }

    if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(QuestionSourceError::RowValidation {
            row: line,
            column: "id",
            value: raw.to_string(),
            reason: "id must be a string or an integer",
        });
    }

    Ok(trimmed.to_string())
}
