use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

use crate::loader::{OptionLabel, ProfileCatalog, QuestionSet};

/// Question id -> chosen option label, as submitted.
pub type Answers = IndexMap<String, String>;

/// Career id -> accumulated points, in profile catalog order.
pub type ScoreTable = IndexMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerContribution {
    pub question_id: String,
    pub label: OptionLabel,
    /// Points that landed on a catalog career, in option order.
    pub applied: Vec<(String, i64)>,
    /// Careers the option scores that are not in the catalog.
    pub dropped: Vec<String>,
}

impl AnswerContribution {
    pub fn total(&self) -> i64 {
        self.applied.iter().map(|(_, p)| p).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownQuestion,
    InvalidLabel,
    MissingOption,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownQuestion => f.write_str("unknown question id"),
            SkipReason::InvalidLabel => f.write_str("invalid option label"),
            SkipReason::MissingOption => f.write_str("question has no such option"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAnswer {
    pub question_id: String,
    pub label: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub scores: ScoreTable,
    pub contributions: Vec<AnswerContribution>,
    pub skipped: Vec<SkippedAnswer>,
}

/// Accumulate points for every catalog career from a set of answers.
///
/// Any subset of answers is accepted, including none. Answers naming an
/// unknown question or an option the question does not have are logged and
/// contribute nothing. Points for careers outside the catalog are dropped.
pub fn calculate_scores(
    answers: &Answers,
    questions: &QuestionSet,
    profiles: &ProfileCatalog,
) -> ScoreTable {
    score_answers(answers, questions, profiles).scores
}

/// Same as [`calculate_scores`], keeping a per-answer breakdown.
pub fn score_answers(
    answers: &Answers,
    questions: &QuestionSet,
    profiles: &ProfileCatalog,
) -> ScoreReport {
    let mut scores: ScoreTable = profiles.ids().map(|id| (id.to_string(), 0)).collect();
    let mut contributions = Vec::new();
    let mut skipped = Vec::new();

    for (question_id, answer) in answers {
        let mut skip = |reason: SkipReason| {
            warn!(question_id = %question_id, answer = %answer, "skipping answer: {}", reason);
            skipped.push(SkippedAnswer {
                question_id: question_id.clone(),
                label: answer.clone(),
                reason,
            });
        };

        let Some(question) = questions.get(question_id) else {
            skip(SkipReason::UnknownQuestion);
            continue;
        };

        let Ok(label) = answer.parse::<OptionLabel>() else {
            skip(SkipReason::InvalidLabel);
            continue;
        };

        let Some(option) = question.option(label) else {
            skip(SkipReason::MissingOption);
            continue;
        };

        let mut contribution = AnswerContribution {
            question_id: question_id.clone(),
            label,
            applied: Vec::new(),
            dropped: Vec::new(),
        };

        for (career, &points) in &option.scores {
            match scores.get_mut(career) {
                Some(total) => {
                    *total += points;
                    contribution.applied.push((career.clone(), points));
                }
                None => {
                    debug!(
                        question_id = %question_id,
                        career = %career,
                        "career not in catalog, points dropped"
                    );
                    contribution.dropped.push(career.clone());
                }
            }
        }

        contributions.push(contribution);
    }

    ScoreReport {
        scores,
        contributions,
        skipped,
    }
}
