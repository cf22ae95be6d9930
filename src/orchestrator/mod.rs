//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整批页面的调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量页面处理器
//! - 管理应用生命周期（初始化、运行）
//! - 管理浏览器资源（Browser、ChromiumSession）
//! - 从种子列表发现链接，逐页委托给 workflow
//! - 汇总结果并写出 result.json
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<String> 链接)
//!     ↓
//! workflow::crawl_page (处理单个页面)
//!     ↓
//! services (能力层：readiness / extractors / failure_writer)
//!     ↓
//! infrastructure (基础设施：PageSession)
//! ```

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{crawl_uris, run_crawl, App};
