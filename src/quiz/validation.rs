use std::collections::HashSet;

use super::QuizModel;
use crate::error::LoadError;

/// Check that a loaded quiz can be taken.
/// Returns all problems at once (not just the first).
pub fn validate_quiz(
    model: &QuizModel,
    required_questions: Option<&[String]>,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut profiles_failed = false;
    let mut questions_failed = false;
    for load_error in model.load_errors() {
        match load_error {
            LoadError::Profiles(_) => profiles_failed = true,
            LoadError::Questions(_) => questions_failed = true,
        }
        errors.push(load_error.to_string());
    }

    // A recorded load error already explains an empty collection
    if model.profiles().is_empty() && !profiles_failed {
        errors.push("career_profiles: no career profiles loaded".to_string());
    }

    if model.questions().is_empty() && !questions_failed {
        errors.push("questions: no questions loaded".to_string());
    }

    // Required ids can only be checked against a loaded question set
    if let Some(required) = required_questions {
        if !model.questions().is_empty() {
            for (i, id) in required.iter().enumerate() {
                if model.questions().get(id).is_none() {
                    errors.push(format!(
                        "required_questions[{}]: no question with id '{}'",
                        i, id
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings about how questions and profiles fit together.
pub fn lint_quiz(model: &QuizModel) -> Vec<String> {
    let mut findings = Vec::new();
    let mut rewarded = HashSet::new();

    for question in model.questions() {
        for (label, option) in &question.options {
            for (career, &points) in &option.scores {
                if !model.profiles().contains(career) {
                    findings.push(format!(
                        "question {} option {}: career '{}' is not in career_profiles",
                        question.id, label, career
                    ));
                } else if points > 0 {
                    rewarded.insert(career.as_str());
                }
            }
        }
    }

    if !model.questions().is_empty() {
        for (id, name) in model.profiles().iter() {
            if !rewarded.contains(id) {
                findings.push(format!(
                    "career '{}' ({}) never receives positive points",
                    id, name
                ));
            }
        }
    }

    findings
}
