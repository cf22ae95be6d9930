pub mod extractors;
pub mod failure_writer;
pub mod link_extractor;
pub mod readiness;
pub mod report_writer;

pub use extractors::FieldOptions;
pub use failure_writer::FailureWriter;
pub use link_extractor::extract_links;
pub use readiness::{await_ready, ReadinessPolicy};
pub use report_writer::write_report;
