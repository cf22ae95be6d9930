//! # Problem Crawler
//!
//! 从题目列表页出发，逐个渲染题目页面并提取题号、标题、难度、正文与标签，
//! 最终汇总为一个 result.json
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageSession` - 导航、读标题、按选择器查询
//! - `ChromiumSession` / `MemorySession` - 真实浏览器与内存实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个页面或单个文档
//! - `link_extractor` - 种子列表链接提取
//! - `readiness` - 页面就绪判断
//! - `extractors` - 各字段提取
//! - `failure_writer` / `report_writer` - 写失败日志与结果文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个页面"的完整处理流程
//! - `PageCtx` - 上下文封装（序号 + 地址）
//! - `crawl_page` - 流程编排（导航 → 就绪 → 提取 → 组装）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理资源并汇总结果

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, PageError};
pub use infrastructure::{ChromiumSession, MemoryPage, MemorySession, PageSession};
pub use models::{BatchResult, ProblemRecord, Topic};
pub use orchestrator::{crawl_uris, run_crawl, App};
pub use workflow::{crawl_page, CrawlOptions, PageCtx, PageOutcome};
