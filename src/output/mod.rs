pub mod formatter;

pub use formatter::{
    format_breakdown, format_points, format_question, format_question_list,
    format_recommendations, format_score_table, format_tsv, should_use_colors,
};
