use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::loader::{ProfileCatalog, Question, QuestionSet};
use crate::scoring::{Recommendation, ScoreReport, ScoreTable};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a point value with an explicit sign ("+3", "-1", "0")
pub fn format_points(points: i64) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

/// Format recommendations as a ranked list
/// Format: " 1. {name}  ({score})"
pub fn format_recommendations(recs: &[Recommendation], use_colors: bool) -> String {
    if recs.is_empty() {
        return "No recommendations.".to_string();
    }

    let name_width = recs.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);

    recs.iter()
        .enumerate()
        .map(|(idx, rec)| {
            let index_str = format!("{:>2}.", idx + 1);
            let name_padded = format!("{:<width$}", rec.name, width = name_width);
            let score_str = format!("({})", rec.score);

            if use_colors {
                format!(
                    "{} {}  {}",
                    index_str.dimmed(),
                    name_padded.bold(),
                    score_str.dimmed()
                )
            } else {
                format!("{} {}  {}", index_str, name_padded, score_str)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format recommendations as tab-separated values for scripting
/// Columns: rank, career_id, name, score (no headers, no colors)
pub fn format_tsv(recs: &[Recommendation]) -> String {
    recs.iter()
        .enumerate()
        .map(|(idx, rec)| {
            format!("{}\t{}\t{}\t{}", idx + 1, rec.career_id, rec.name, rec.score)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the full score table, in table order, for verbose mode
pub fn format_score_table(
    scores: &ScoreTable,
    profiles: &ProfileCatalog,
    use_colors: bool,
) -> String {
    let rows: Vec<(&str, &str, i64)> = scores
        .iter()
        .map(|(id, &score)| (id.as_str(), profiles.name(id).unwrap_or(id.as_str()), score))
        .collect();

    let name_width = rows.iter().map(|(_, n, _)| n.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|(id, name, score)| {
            let name_padded = format!("{:<width$}", name, width = name_width);
            let score_str = format!("{:>5}", score);
            if use_colors {
                format!("  {}  {}  {}", name_padded, score_str.bold(), id.dimmed())
            } else {
                format!("  {}  {}  {}", name_padded, score_str, id)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format how each answer contributed, plus answers that were skipped
pub fn format_breakdown(report: &ScoreReport, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for contribution in &report.contributions {
        let points = if contribution.applied.is_empty() {
            "no points".to_string()
        } else {
            contribution
                .applied
                .iter()
                .map(|(career, p)| format!("{} {}", career, format_points(*p)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut line = format!(
            "  {} -> {}: {}",
            contribution.question_id, contribution.label, points
        );
        if !contribution.dropped.is_empty() {
            line.push_str(&format!(" (ignored: {})", contribution.dropped.join(", ")));
        }
        lines.push(line);
    }

    for skipped in &report.skipped {
        let line = format!(
            "  {} -> {}: skipped, {}",
            skipped.question_id, skipped.label, skipped.reason
        );
        if use_colors {
            lines.push(line.yellow().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format a single question with its options on separate lines
pub fn format_question(question: &Question, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(question.options.len() + 1);

    if use_colors {
        lines.push(format!(
            "{} {}",
            format!("[{}]", question.id).cyan(),
            question.prompt.bold()
        ));
    } else {
        lines.push(format!("[{}] {}", question.id, question.prompt));
    }

    for (label, option) in &question.options {
        lines.push(format!("    {}. {}", label, option.text));
    }

    lines.join("\n")
}

/// Format questions one line each: id, option count and prompt truncated to
/// the terminal width
pub fn format_question_list(questions: &QuestionSet, use_colors: bool) -> String {
    if questions.is_empty() {
        return "No questions loaded.".to_string();
    }

    let term_width = get_terminal_width();
    let id_width = questions.iter().map(|q| q.id.chars().count()).max().unwrap_or(0);

    questions
        .iter()
        .map(|q| {
            let id_padded = format!("{:<width$}", q.id, width = id_width);
            let labels: String = q.options.keys().map(|l| l.as_str()).collect();
            let labels_padded = format!("{:<4}", labels);

            // id + 2 spaces + 4 label chars + 2 spaces
            let fixed_width = id_width + 8;
            let prompt = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&q.prompt, width - fixed_width)
                }
                Some(_) => truncate_text(&q.prompt, 20),
                None => q.prompt.clone(),
            };

            if use_colors {
                format!("{}  {}  {}", id_padded.cyan(), labels_padded.dimmed(), prompt)
            } else {
                format!("{}  {}  {}", id_padded, labels_padded, prompt)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_questions;
    use crate::scoring::{score_answers, Answers};

    fn rec(id: &str, name: &str, score: i64) -> Recommendation {
        Recommendation {
            career_id: id.to_string(),
            name: name.to_string(),
            score,
        }
    }

    fn questions() -> QuestionSet {
        let csv = "id,prompt,option_A_text,option_A_scores,option_B_text,option_B_scores,option_C_text,option_C_scores\n\
                   Q1,Pick a task,Write code,swe:3,Plan sprint,pm:5;ghost:1,,\n\
                   Q2,Pick a tool,IDE,swe:1,Gantt chart,pm:2,Spreadsheet,data:2\n";
        parse_questions(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_format_recommendations_empty() {
        assert_eq!(format_recommendations(&[], false), "No recommendations.");
    }

    #[test]
    fn test_format_recommendations_aligned() {
        let recs = vec![
            rec("pm", "Project Manager", 7),
            rec("qa", "Tester", 3),
        ];
        let result = format_recommendations(&recs, false);
        assert_eq!(
            result,
            " 1. Project Manager  (7)\n 2. Tester           (3)"
        );
    }

    #[test]
    fn test_format_tsv() {
        let recs = vec![rec("pm", "Project Manager", 7), rec("swe", "Software Engineer", -1)];
        assert_eq!(
            format_tsv(&recs),
            "1\tpm\tProject Manager\t7\n2\tswe\tSoftware Engineer\t-1"
        );
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(3), "+3");
        assert_eq!(format_points(-2), "-2");
        assert_eq!(format_points(0), "0");
    }

    #[test]
    fn test_format_score_table_uses_names() {
        let profiles: ProfileCatalog = vec![("swe", "Software Engineer"), ("pm", "PM")]
            .into_iter()
            .collect();
        let scores: ScoreTable = vec![("swe".to_string(), 3), ("pm".to_string(), 12)]
            .into_iter()
            .collect();
        let result = format_score_table(&scores, &profiles, false);
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Software Engineer"));
        assert!(lines[0].ends_with("swe"));
        assert!(lines[1].contains("   12"));
    }

    #[test]
    fn test_format_breakdown() {
        let profiles: ProfileCatalog = vec![("swe", "Software Engineer"), ("pm", "PM")]
            .into_iter()
            .collect();
        let answers: Answers = vec![
            ("Q1".to_string(), "B".to_string()),
            ("Q2".to_string(), "Z".to_string()),
        ]
        .into_iter()
        .collect();
        let report = score_answers(&answers, &questions(), &profiles);

        let result = format_breakdown(&report, false);
        assert!(result.contains("Q1 -> B: pm +5 (ignored: ghost)"));
        assert!(result.contains("Q2 -> Z: skipped, invalid option label"));
    }

    #[test]
    fn test_format_question() {
        let qs = questions();
        let result = format_question(qs.get("Q2").unwrap(), false);
        assert_eq!(
            result,
            "[Q2] Pick a tool\n    A. IDE\n    B. Gantt chart\n    C. Spreadsheet"
        );
    }

    #[test]
    fn test_format_question_list() {
        let result = format_question_list(&questions(), false);
        assert!(result.contains("Q1  AB    Pick a task"));
        assert!(result.contains("Q2  ABC   Pick a tool"));
        assert_eq!(format_question_list(&QuestionSet::new(), false), "No questions loaded.");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer prompt", 8), "a lon...");
        assert_eq!(truncate_text("abcdef", 3), "abc");
    }
}
