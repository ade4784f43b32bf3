pub mod engine;
pub mod recommend;

pub use engine::{
    calculate_scores, score_answers, AnswerContribution, Answers, ScoreReport, ScoreTable,
    SkipReason, SkippedAnswer,
};
pub use recommend::{get_recommendations, Recommendation, DEFAULT_TOP_N, UNKNOWN_CAREER};
