//! Error types for loading quiz data and exporting results.
//!
//! Loader errors are never propagated out of `QuizModel::load`; they are
//! logged and kept on the model so callers can explain why it is not ready.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce the career profile catalog.
#[derive(Debug, Error)]
pub enum ProfileSourceError {
    #[error("profile config not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("profile config at {} is empty", path.display())]
    Empty { path: PathBuf },

    #[error("profile config at {} is malformed: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("profile config at {} has no 'career_profiles' field", path.display())]
    MissingKey { path: PathBuf },

    #[error("'career_profiles' in {} is empty", path.display())]
    NoProfiles { path: PathBuf },

    #[error("failed to read profile config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to produce the question set. Any of these leaves the set empty.
#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("question table not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("question table is empty")]
    Empty,

    #[error("failed to open question table at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("question table is malformed: {0}")]
    Malformed(#[source] csv::Error),

    #[error("question table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("question table has duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("row {row}: invalid {column} '{value}': {reason}")]
    RowValidation {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("row {row}: has {found} fields, the required columns need {needed}")]
    ShortRow {
        row: usize,
        found: usize,
        needed: usize,
    },

    #[error("row {row}: has {found} fields, the header has only {expected}")]
    LongRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("row {row}: duplicate question id '{id}'")]
    DuplicateId { row: usize, id: String },

    #[error("question table has a header but no questions")]
    NoQuestions,

    #[error("failed to read question table: {0}")]
    Read(#[source] csv::Error),
}

/// Any loader-level failure, recorded on the model.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Profiles(#[from] ProfileSourceError),

    #[error(transparent)]
    Questions(#[from] QuestionSourceError),
}

/// Failure to append a submission to the results log.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("respondent name must not be empty")]
    EmptyName,

    #[error("failed to read results log at {}: {source}", path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write results log at {}: {source}", path.display())]
    WriteLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for QuestionSourceError {
    fn from(err: csv::Error) -> Self {
        if matches!(err.kind(), csv::ErrorKind::Io(_)) {
            QuestionSourceError::Read(err)
        } else {
            QuestionSourceError::Malformed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_all() {
        let err = QuestionSourceError::MissingColumns(vec![
            "prompt".to_string(),
            "option_B_scores".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "question table is missing required columns: prompt, option_B_scores"
        );
    }

    #[test]
    fn test_csv_error_kept_as_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = QuestionSourceError::from(csv::Error::from(io));
        assert!(matches!(err, QuestionSourceError::Read(_)));

        let source = err.source().expect("csv error should be the source");
        assert!(source.downcast_ref::<csv::Error>().is_some());
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err: LoadError = ProfileSourceError::MissingKey {
            path: PathBuf::from("config.json"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "profile config at config.json has no 'career_profiles' field"
        );
    }
}
