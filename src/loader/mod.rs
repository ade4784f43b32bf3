pub mod profiles;
pub mod questions;
pub mod score_string;
pub mod types;

pub use profiles::{load_profiles, parse_profiles, PROFILES_KEY};
pub use questions::{load_questions, parse_questions, REQUIRED_COLUMNS};
pub use score_string::{parse_score_cell, parse_scores, ScoreMap};
pub use types::{
    AnswerOption, InvalidOptionLabel, OptionLabel, ProfileCatalog, Question, QuestionSet,
};
