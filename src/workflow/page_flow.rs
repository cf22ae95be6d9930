//! 单页爬取流程 - 流程层
//!
//! 核心职责：定义"一个页面"的完整处理流程
//!
//! 流程顺序：
//! 1. 导航
//! 2. 等待页面就绪
//! 3. 依次提取 标题 → 题号 → 难度 → 正文 → 标签
//! 4. 组装记录
//!
//! 任意一步失败，整页视为失败（不产出残缺记录），但不影响后续页面

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::PageResult;
use crate::infrastructure::PageSession;
use crate::models::{PageFailure, ProblemRecord};
use crate::services::extractors::{
    extract_description, extract_difficulty, extract_identifier, extract_title, extract_topics,
};
use crate::services::{await_ready, FailureWriter, FieldOptions, ReadinessPolicy};
use crate::utils::logging::truncate_text;
use crate::workflow::page_ctx::PageCtx;

/// 爬取参数
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 种子列表中题目链接需要包含的前缀
    pub problem_base_url: String,
    pub navigation_timeout: Duration,
    pub readiness: ReadinessPolicy,
    pub fields: FieldOptions,
    /// 设置时，每个失败页面都会追加写入该日志
    pub failure_writer: Option<FailureWriter>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            problem_base_url: "https://leetcode.com/problems/".to_string(),
            navigation_timeout: Duration::from_secs(30),
            readiness: ReadinessPolicy::default(),
            fields: FieldOptions::default(),
            failure_writer: None,
        }
    }
}

/// 单个页面的处理结果
#[derive(Debug)]
pub enum PageOutcome {
    /// 全部字段提取成功
    Extracted(ProblemRecord),
    /// 页面失败，附带原因
    Failed(PageFailure),
}

impl PageOutcome {
    pub fn uri(&self) -> &str {
        match self {
            PageOutcome::Extracted(record) => &record.uri,
            PageOutcome::Failed(failure) => &failure.uri,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, PageOutcome::Extracted(_))
    }
}

/// 处理单个页面，永远不会返回错误
///
/// 导航、等待或任意字段提取的错误都在这里被吸收，
/// 记录日志后转换为 `PageOutcome::Failed`
pub async fn crawl_page<S>(session: &mut S, ctx: &PageCtx, options: &CrawlOptions) -> PageOutcome
where
    S: PageSession + ?Sized,
{
    info!("{} 🔍 正在打开: {}", ctx, ctx.uri);

    match extract_page(session, ctx, options).await {
        Ok(record) => {
            info!(
                "{} ✓ 提取成功: {} {} ({}, {} 个标签)",
                ctx,
                record.id,
                record.title,
                record.difficulty,
                record.topics.len()
            );
            debug!(
                "{} 正文预览: {}",
                ctx,
                truncate_text(&record.description, 80)
            );
            PageOutcome::Extracted(record)
        }
        Err(e) => {
            error!("{} ❌ 提取失败: {}", ctx, e);
            if let Some(writer) = &options.failure_writer {
                if let Err(write_err) = writer.write(ctx.page_index, &ctx.uri, &e.to_string()) {
                    warn!("{} ⚠️ 写入失败记录出错: {}", ctx, write_err);
                }
            }
            PageOutcome::Failed(PageFailure {
                uri: ctx.uri.clone(),
                error: e,
            })
        }
    }
}

async fn extract_page<S>(
    session: &mut S,
    ctx: &PageCtx,
    options: &CrawlOptions,
) -> PageResult<ProblemRecord>
where
    S: PageSession + ?Sized,
{
    session.navigate(&ctx.uri, options.navigation_timeout).await?;
    await_ready(&*session, &ctx.uri, &options.readiness).await?;

    let fields = &options.fields;
    let title = extract_title(&*session, fields).await?;
    let id = extract_identifier(&*session).await?;
    let difficulty = extract_difficulty(&*session, fields).await?;
    let description = extract_description(&*session).await?;
    let topics = extract_topics(&*session, fields).await?;

    Ok(ProblemRecord {
        id,
        title,
        uri: ctx.uri.clone(),
        difficulty,
        description,
        topics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use crate::infrastructure::{MemoryPage, MemorySession};
    use crate::services::extractors::{
        DESCRIPTION_SELECTOR, DIFFICULTY_SELECTOR, IDENTIFIER_SELECTOR, TOPIC_SELECTOR,
    };

    const URI: &str = "https://leetcode.com/problems/two-sum/";

    fn two_sum_page() -> MemoryPage {
        MemoryPage::new("Two Sum - LeetCode")
            .with_text(IDENTIFIER_SELECTOR, "1. Two Sum")
            .with_text(DIFFICULTY_SELECTOR, "5240Add to ListShareEasy")
            .with_text(DESCRIPTION_SELECTOR, "Given an array of integers nums...")
            .with_links(
                TOPIC_SELECTOR,
                &["https://leetcode.com/tag/array/", "https://leetcode.com/tag/hash-table/"],
            )
    }

    fn fast_options() -> CrawlOptions {
        CrawlOptions {
            readiness: ReadinessPolicy {
                settle_delay: Duration::ZERO,
                poll_interval: Duration::from_millis(10),
                timeout: Some(Duration::from_secs(1)),
            },
            ..CrawlOptions::default()
        }
    }

    #[tokio::test]
    async fn test_crawl_page_builds_full_record() {
        let mut session = MemorySession::new().with_page(URI, two_sum_page());
        let ctx = PageCtx::new(1, 1, URI);

        let outcome = crawl_page(&mut session, &ctx, &fast_options()).await;
        let PageOutcome::Extracted(record) = outcome else {
            panic!("页面应该提取成功");
        };

        assert_eq!(record.id, "1");
        assert_eq!(record.title, "Two Sum");
        assert_eq!(record.uri, URI);
        assert_eq!(record.difficulty, "Easy");
        assert_eq!(record.description, "Given an array of integers nums...");
        let names: Vec<&str> = record.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["array", "hash table"]);
    }

    #[tokio::test]
    async fn test_single_missing_field_fails_whole_page() {
        let mut page = two_sum_page();
        page.texts.remove(DESCRIPTION_SELECTOR);
        let mut session = MemorySession::new().with_page(URI, page);
        let ctx = PageCtx::new(1, 1, URI);

        match crawl_page(&mut session, &ctx, &fast_options()).await {
            PageOutcome::Failed(failure) => {
                assert_eq!(failure.uri, URI);
                assert!(matches!(
                    failure.error,
                    PageError::ElementNotFound {
                        field: "description",
                        ..
                    }
                ));
            }
            PageOutcome::Extracted(_) => panic!("缺少正文时不应产出记录"),
        }
    }

    #[tokio::test]
    async fn test_failure_is_written_to_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("failed.txt");
        let options = CrawlOptions {
            failure_writer: Some(FailureWriter::with_path(log_path.to_string_lossy())),
            ..fast_options()
        };

        let mut session = MemorySession::new().with_page(URI, MemoryPage::unreachable());
        let outcome = crawl_page(&mut session, &PageCtx::new(3, 5, URI), &options).await;

        assert!(!outcome.is_extracted());
        assert_eq!(outcome.uri(), URI);
        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.starts_with("页面 3 | https://leetcode.com/problems/two-sum/ | 原因:"));
    }
}
