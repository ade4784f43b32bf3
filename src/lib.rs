//! Rule-based career quiz scoring.
//!
//! Questions come from a CSV table and career profiles from a JSON document.
//! Each answer option awards integer points to careers; a submission's points
//! are summed per career and the best matches are ranked.

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod output;
pub mod quiz;
pub mod scoring;
pub mod take;

pub use error::{ExportError, LoadError, ProfileSourceError, QuestionSourceError};
pub use loader::{OptionLabel, ProfileCatalog, Question, QuestionSet};
pub use quiz::QuizModel;
pub use scoring::{calculate_scores, get_recommendations, Answers, Recommendation, ScoreTable};
