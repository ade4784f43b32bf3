use indexmap::IndexMap;
use tracing::{debug, warn};

/// Points an option awards, keyed by career identifier, in source order.
///
/// Values are stored as `i64` but always fit in an `i32`, so summing one
/// value per question cannot overflow.
pub type ScoreMap = IndexMap<String, i64>;

/// Parse a score cell such as `"frontend_dev:3;pm_ba_po:-1"`.
///
/// Parsing is forgiving: a pair without `:` is skipped, a pair with an empty
/// key, a non-integer value or a value outside the `i32` range is skipped
/// with a warning. Only the first `:` splits a pair. If a key repeats, the
/// later value wins.
pub fn parse_scores(score_string: &str) -> ScoreMap {
    let mut scores = ScoreMap::new();

    for pair in score_string.split(';') {
        let Some((key, value)) = pair.split_once(':') else {
            if !pair.trim().is_empty() {
                debug!(pair, "skipping score entry without ':'");
            }
            continue;
        };

        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            warn!(pair, "skipping score entry with empty career id");
            continue;
        }

        match value.parse::<i32>() {
            Ok(points) => {
                scores.insert(key.to_string(), i64::from(points));
            }
            Err(e) if is_long_integer(value) => {
                warn!(pair, error = %e, "score value out of range");
            }
            Err(_) => warn!(pair, "invalid score value"),
        }
    }

    scores
}

fn is_long_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an optional score cell. A missing cell yields no points.
pub fn parse_score_cell(cell: Option<&str>) -> ScoreMap {
    match cell {
        Some(s) => parse_scores(s),
        None => {
            warn!("score cell is empty, option awards no points");
            ScoreMap::new()
        }
    }
}
