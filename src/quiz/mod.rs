pub mod validation;

pub use validation::{lint_quiz, validate_quiz};

use std::path::Path;
use tracing::{error, info, warn};

use crate::error::LoadError;
use crate::loader::{load_profiles, load_questions, ProfileCatalog, QuestionSet};
use crate::scoring::{self, Answers, Recommendation, ScoreReport, ScoreTable};

/// Loaded profiles and questions. Read-only once built.
#[derive(Debug, Default)]
pub struct QuizModel {
    profiles: ProfileCatalog,
    questions: QuestionSet,
    load_errors: Vec<LoadError>,
}

impl QuizModel {
    /// Load both sources. Failures are logged and recorded, never returned:
    /// a source that fails to load leaves its collection empty. Check
    /// [`QuizModel::is_ready`] before scoring.
    pub fn load(profiles_path: &Path, questions_path: &Path) -> Self {
        let mut load_errors = Vec::new();

        let profiles = load_profiles(profiles_path).unwrap_or_else(|e| {
            error!("{}", e);
            load_errors.push(LoadError::from(e));
            ProfileCatalog::default()
        });

        let questions = load_questions(questions_path).unwrap_or_else(|e| {
            error!("{}", e);
            load_errors.push(LoadError::from(e));
            QuestionSet::default()
        });

        let model = Self {
            profiles,
            questions,
            load_errors,
        };

        if model.is_ready() {
            info!(
                profiles = model.profiles.len(),
                questions = model.questions.len(),
                "quiz data loaded"
            );
        } else {
            warn!("questions or career profiles failed to load");
        }

        model
    }

    pub fn from_parts(profiles: ProfileCatalog, questions: QuestionSet) -> Self {
        Self {
            profiles,
            questions,
            load_errors: Vec::new(),
        }
    }

    /// True when both questions and profiles are non-empty.
    pub fn is_ready(&self) -> bool {
        !self.profiles.is_empty() && !self.questions.is_empty()
    }

    pub fn profiles(&self) -> &ProfileCatalog {
        &self.profiles
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn load_errors(&self) -> &[LoadError] {
        &self.load_errors
    }

    pub fn calculate_scores(&self, answers: &Answers) -> ScoreTable {
        scoring::calculate_scores(answers, &self.questions, &self.profiles)
    }

    pub fn score_answers(&self, answers: &Answers) -> ScoreReport {
        scoring::score_answers(answers, &self.questions, &self.profiles)
    }

    pub fn get_recommendations(&self, scores: &ScoreTable, top_n: usize) -> Vec<Recommendation> {
        scoring::get_recommendations(scores, &self.profiles, top_n)
    }

    /// Required question ids with no answer, in required order.
    ///
    /// `required = None` requires every loaded question. The scoring engine
    /// itself accepts any subset of answers; this is for callers that want a
    /// complete quiz before scoring.
    pub fn missing_answers<'a>(
        &'a self,
        answers: &Answers,
        required: Option<&'a [String]>,
    ) -> Vec<&'a str> {
        let answered = |id: &str| answers.get(id).is_some_and(|a| !a.trim().is_empty());

        match required {
            Some(ids) => ids
                .iter()
                .map(String::as_str)
                .filter(|id| !answered(*id))
                .collect(),
            None => self
                .questions
                .iter()
                .map(|q| q.id.as_str())
                .filter(|id| !answered(*id))
                .collect(),
        }
    }
}
