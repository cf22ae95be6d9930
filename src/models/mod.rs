pub mod loaders;
pub mod problem;

pub use loaders::{load_seed_html, parse_seed_document};
pub use problem::{BatchResult, BatchStatus, PageFailure, ProblemRecord, Topic};
