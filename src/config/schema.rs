use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::DEFAULT_TOP_N;

/// Application configuration.
///
/// Every field is optional in the file; missing fields take the defaults
/// below.
///
/// Example YAML:
/// ```yaml
/// profiles: data/config.json
/// questions: data/question.csv
/// top_n: 3
/// results_log: results.csv
/// required_questions: [Q1, Q2, Q3]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON document holding `career_profiles`
    #[serde(default = "default_profiles")]
    pub profiles: PathBuf,

    /// CSV question table
    #[serde(default = "default_questions")]
    pub questions: PathBuf,

    /// Number of recommendations to show
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// CSV file submissions are appended to
    #[serde(default = "default_results_log")]
    pub results_log: PathBuf,

    /// Question ids that must be answered before scoring.
    /// When absent, every loaded question is required.
    #[serde(default)]
    pub required_questions: Option<Vec<String>>,
}

fn default_profiles() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_questions() -> PathBuf {
    PathBuf::from("question.csv")
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_results_log() -> PathBuf {
    PathBuf::from("results.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            questions: default_questions(),
            top_n: default_top_n(),
            results_log: default_results_log(),
            required_questions: None,
        }
    }
}
