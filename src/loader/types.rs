use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::score_string::ScoreMap;

/// Career identifier -> display name, in the order the source declares them.
///
/// The order matters: it breaks ties between equal scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ProfileCatalog(IndexMap<String, String>);

impl ProfileCatalog {
    pub fn new(profiles: IndexMap<String, String>) -> Self {
        Self(profiles)
    }

    pub fn name(&self, career_id: &str) -> Option<&str> {
        self.0.get(career_id).map(String::as_str)
    }

    pub fn contains(&self, career_id: &str) -> bool {
        self.0.contains_key(career_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Option label. Only `A` through `D` exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    /// Whether every question must carry this option.
    pub fn is_required(&self) -> bool {
        matches!(self, OptionLabel::A | OptionLabel::B)
    }

    pub fn text_column(&self) -> &'static str {
        match self {
            OptionLabel::A => "option_A_text",
            OptionLabel::B => "option_B_text",
            OptionLabel::C => "option_C_text",
            OptionLabel::D => "option_D_text",
        }
    }

    pub fn scores_column(&self) -> &'static str {
        match self {
            OptionLabel::A => "option_A_scores",
            OptionLabel::B => "option_B_scores",
            OptionLabel::C => "option_C_scores",
            OptionLabel::D => "option_D_scores",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid option label '{0}' (expected A, B, C or D)")]
pub struct InvalidOptionLabel(pub String);

impl FromStr for OptionLabel {
    type Err = InvalidOptionLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(InvalidOptionLabel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub scores: ScoreMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: BTreeMap<OptionLabel, AnswerOption>,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> Option<&AnswerOption> {
        self.options.get(&label)
    }
}

/// Questions in source order, with an id index built as they are inserted.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question. Returns `false` and leaves the set untouched when a
    /// question with the same id is already present.
    pub fn insert(&mut self, question: Question) -> bool {
        if self.by_id.contains_key(&question.id) {
            return false;
        }
        self.by_id.insert(question.id.clone(), self.questions.len());
        self.questions.push(question);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
