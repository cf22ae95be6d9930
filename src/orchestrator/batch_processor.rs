//! 批量页面处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整批页面的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化失败日志、启动或连接浏览器、创建浏览会话
//! 2. **链接发现**：读取种子列表并提取去重后的题目链接
//! 3. **逐页处理**：默认单会话顺序处理；配置多个标签页时并行处理
//! 4. **结果汇总**：按输入顺序收集成功记录，合并全部标签
//! 5. **结果写入**：一次性写出 result.json
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 Browser 与会话的模块
//! - **向下委托**：单个页面的细节交给 `workflow::crawl_page`
//! - **批次永不失败**：页面级错误只会让该页面缺席结果列表

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use futures::future::join_all;
use scraper::Html;
use tracing::{debug, error, warn};

use crate::browser;
use crate::config::Config;
use crate::error::PageError;
use crate::infrastructure::{ChromiumSession, PageSession};
use crate::models::{load_seed_html, parse_seed_document, BatchResult, PageFailure};
use crate::services::{extract_links, write_report};
use crate::utils::logging::{log_links_loaded, log_startup, print_final_stats};
use crate::workflow::{crawl_page, CrawlOptions, PageCtx, PageOutcome};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    sessions: Vec<ChromiumSession>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let options = config.crawl_options();
        if let Some(writer) = &options.failure_writer {
            writer
                .init()
                .with_context(|| format!("无法初始化失败日志: {}", writer.path()))?;
        }

        log_startup(&config);

        let page_count = config.page_count();
        let (browser, pages) = match config.browser_debug_port {
            Some(port) => browser::connect_to_browser(port, page_count).await?,
            None => {
                browser::launch_headless_browser(config.chrome_executable.as_deref(), page_count)
                    .await?
            }
        };

        let sessions = pages.into_iter().map(ChromiumSession::new).collect();

        Ok(Self {
            config,
            _browser: browser,
            sessions,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<BatchResult> {
        let seed_path = Path::new(&self.config.seed_html_path);
        let seed_html = load_seed_html(seed_path).await?;
        let document = parse_seed_document(&seed_html);

        let options = self.config.crawl_options();
        let batch = run_crawl(&mut self.sessions, &document, &options).await;

        write_report(Path::new(&self.config.output_path), &batch).await?;

        print_final_stats(&batch, &self.config);

        Ok(batch)
    }
}

/// 从种子文档出发完成整批爬取
///
/// 没有匹配链接时返回空结果，状态仍为 success
pub async fn run_crawl<S>(sessions: &mut [S], seed: &Html, options: &CrawlOptions) -> BatchResult
where
    S: PageSession,
{
    let uris = extract_links(seed, &options.problem_base_url);

    if uris.is_empty() {
        warn!("⚠️ 种子列表中没有找到匹配的题目链接");
    }
    log_links_loaded(uris.len(), sessions.len());

    crawl_uris(sessions, &uris, options).await
}

/// 处理给定的链接列表
///
/// 只有一个会话时严格顺序执行；多个会话时每个会话从共享游标领取下一个页面，
/// 结束后按输入顺序还原结果
pub async fn crawl_uris<S>(sessions: &mut [S], uris: &[String], options: &CrawlOptions) -> BatchResult
where
    S: PageSession,
{
    let total = uris.len();

    let outcomes: Vec<PageOutcome> = match sessions {
        [] => {
            error!("❌ 没有可用的浏览会话，全部 {} 个页面无法处理", total);
            uris.iter()
                .map(|uri| {
                    PageOutcome::Failed(PageFailure {
                        uri: uri.clone(),
                        error: PageError::Session("没有可用的浏览会话".to_string()),
                    })
                })
                .collect()
        }
        [session] => {
            let mut outcomes = Vec::with_capacity(total);
            for (index, uri) in uris.iter().enumerate() {
                let ctx = PageCtx::new(index + 1, total, uri.as_str());
                outcomes.push(crawl_page(&mut *session, &ctx, options).await);
            }
            outcomes
        }
        pool => crawl_with_pool(pool, uris, options).await,
    };

    aggregate(outcomes)
}

async fn crawl_with_pool<S>(
    sessions: &mut [S],
    uris: &[String],
    options: &CrawlOptions,
) -> Vec<PageOutcome>
where
    S: PageSession,
{
    let total = uris.len();
    let cursor = AtomicUsize::new(0);
    let cursor = &cursor;

    let workers = sessions
        .iter_mut()
        .enumerate()
        .map(|(worker, session)| async move {
            let mut done = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                let Some(uri) = uris.get(index) else {
                    break;
                };
                debug!("标签页 {} 领取页面 {}/{}", worker + 1, index + 1, total);
                let ctx = PageCtx::new(index + 1, total, uri.as_str());
                done.push((index, crawl_page(&mut *session, &ctx, options).await));
            }
            done
        });

    let mut indexed: Vec<(usize, PageOutcome)> =
        join_all(workers).await.into_iter().flatten().collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, outcome)| outcome).collect()
}

/// 汇总各页面结果，保持输入顺序
fn aggregate(outcomes: Vec<PageOutcome>) -> BatchResult {
    let mut batch = BatchResult::default();

    for outcome in outcomes {
        match outcome {
            PageOutcome::Extracted(record) => {
                batch.topics.extend(record.topics.iter().cloned());
                batch.results.push(record);
            }
            PageOutcome::Failed(failure) => batch.failures.push(failure),
        }
    }

    batch
}
