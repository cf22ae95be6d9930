pub mod page_ctx;
pub mod page_flow;

pub use page_ctx::PageCtx;
pub use page_flow::{crawl_page, CrawlOptions, PageOutcome};
