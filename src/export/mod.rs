pub mod storage;

pub use storage::{append_result, read_results, ResultRow};
