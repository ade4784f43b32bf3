
use super::engine::ScoreTable;
use crate::loader::ProfileCatalog;

/// Number of recommendations returned when the caller does not ask otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// Display name used for a career id the catalog does not know.
pub const UNKNOWN_CAREER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub career_id: String,
    pub name: String,
    pub score: i64,
}

/// Rank careers by score, highest first, and keep the first `top_n`.
///
/// The sort is stable, so careers with equal scores keep the order of the
/// score table, which is the catalog's declared order for tables built by
/// [`super::calculate_scores`]. Fewer careers than `top_n` returns them all.
pub fn get_recommendations(
    scores: &ScoreTable,
    profiles: &ProfileCatalog,
    top_n: usize,
) -> Vec<Recommendation> {
    let mut ranked: Vec<(&String, i64)> = scores.iter().map(|(id, &s)| (id, s)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(career_id, score)| Recommendation {
            career_id: career_id.clone(),
            name: profiles
                .name(career_id)
                .unwrap_or(UNKNOWN_CAREER)
                .to_string(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> ProfileCatalog {
        vec![
            ("swe", "Software Engineer"),
            ("pm", "Project Manager"),
            ("qa", "QA Engineer"),
            ("data", "Data Scientist"),
        ]
        .into_iter()
        .collect()
    }

    fn table(pairs: &[(&str, i64)]) -> ScoreTable {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_top_n() {
        let scores = table(&[("swe", 2), ("pm", 7), ("qa", -1), ("data", 4)]);
        let recs = get_recommendations(&scores, &profiles(), DEFAULT_TOP_N);
        assert_eq!(
            names(&recs),
            vec!["Project Manager", "Data Scientist", "Software Engineer"]
        );
        assert_eq!(recs[0].score, 7);
        assert_eq!(recs[0].career_id, "pm");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let scores = table(&[("swe", 3), ("pm", 5), ("qa", 3), ("data", 3)]);
        let recs = get_recommendations(&scores, &profiles(), 4);
        assert_eq!(
            names(&recs),
            vec![
                "Project Manager",
                "Software Engineer",
                "QA Engineer",
                "Data Scientist"
            ]
        );
    }

    #[test]
    fn test_all_zero_returns_catalog_order() {
        let scores = table(&[("swe", 0), ("pm", 0), ("qa", 0), ("data", 0)]);
        let recs = get_recommendations(&scores, &profiles(), 2);
        assert_eq!(names(&recs), vec!["Software Engineer", "Project Manager"]);
    }

    #[test]
    fn test_top_n_larger_than_catalog() {
        let scores = table(&[("swe", 1), ("pm", 2)]);
        let recs = get_recommendations(&scores, &profiles(), 10);
        assert_eq!(recs.len(), 2);
        assert_eq!(names(&recs), vec!["Project Manager", "Software Engineer"]);
    }

    #[test]
    fn test_top_n_zero() {
        let scores = table(&[("swe", 1)]);
        assert!(get_recommendations(&scores, &profiles(), 0).is_empty());
    }

    #[test]
    fn test_unknown_career_gets_sentinel_name() {
        let scores = table(&[("mystery", 9), ("swe", 1)]);
        let recs = get_recommendations(&scores, &profiles(), 1);
        assert_eq!(recs[0].name, UNKNOWN_CAREER);
        assert_eq!(recs[0].score, 9);
    }

    #[test]
    fn test_empty_table() {
        assert!(get_recommendations(&ScoreTable::new(), &profiles(), 3).is_empty());
    }
}
