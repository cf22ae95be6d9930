//! 页面就绪判断 - 业务能力层
//!
//! 页面标题为已知的"加载中"占位文本时视为未就绪

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{PageError, PageResult};
use crate::infrastructure::PageSession;

/// 已知的加载中占位标题（小写）
static LOADING_TITLES: phf::Set<&'static str> = phf::phf_set! {
    "loading...",
    "loading question... leetcode",
    "loading question...",
};

/// 就绪等待参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// 导航后、首次检查前的固定等待
    pub settle_delay: Duration,
    /// 两次检查之间的等待
    pub poll_interval: Duration,
    /// 轮询总时长上限，`None` 表示一直等待
    pub timeout: Option<Duration>,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(3),
            poll_interval: Duration::from_secs(1),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// 标题是否为加载中占位文本（忽略大小写，整串匹配）
pub fn is_loading_title(title: &str) -> bool {
    LOADING_TITLES.contains(title.to_lowercase().as_str())
}

/// 等待页面完成首次渲染
///
/// 超过 `policy.timeout` 仍未就绪时返回 `PageError::ReadinessTimeout`
pub async fn await_ready<S>(session: &S, uri: &str, policy: &ReadinessPolicy) -> PageResult<()>
where
    S: PageSession + ?Sized,
{
    sleep(policy.settle_delay).await;

    let started = Instant::now();
    loop {
        let title = session.title().await?;
        if !is_loading_title(&title) {
            debug!("页面已就绪: {} (标题: {})", uri, title);
            return Ok(());
        }

        if let Some(timeout) = policy.timeout {
            let waited = started.elapsed();
            if waited >= timeout {
                return Err(PageError::ReadinessTimeout {
                    uri: uri.to_string(),
                    waited,
                    last_title: title,
                });
            }
        }

        debug!("页面仍在加载: {} (标题: {})", uri, title);
        sleep(policy.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryPage, MemorySession};

    const URI: &str = "https://leetcode.com/problems/two-sum/";

    async fn session_with(page: MemoryPage) -> MemorySession {
        let mut session = MemorySession::new().with_page(URI, page);
        session
            .navigate(URI, Duration::from_secs(1))
            .await
            .unwrap();
        session
    }

    #[test]
    fn test_loading_titles_ignore_case() {
        assert!(is_loading_title("Loading..."));
        assert!(is_loading_title("LOADING QUESTION... LEETCODE"));
        assert!(is_loading_title("loading question..."));
        assert!(!is_loading_title("Two Sum - LeetCode"));
        // 只做整串匹配
        assert!(!is_loading_title("Loading... Two Sum"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_page_only_waits_settle_delay() {
        let session = session_with(MemoryPage::new("Two Sum - LeetCode")).await;
        let policy = ReadinessPolicy::default();

        let start = Instant::now();
        await_ready(&session, URI, &policy).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_title_changes() {
        let page = MemoryPage::new("Two Sum - LeetCode")
            .loading_first(&["Loading...", "Loading Question... LeetCode"]);
        let session = session_with(page).await;
        let policy = ReadinessPolicy::default();

        let start = Instant::now();
        await_ready(&session, URI, &policy).await.unwrap();
        // 3 秒固定等待 + 两次 1 秒轮询
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_title_never_changes() {
        let session = session_with(MemoryPage::new("loading...")).await;
        let policy = ReadinessPolicy {
            timeout: Some(Duration::from_secs(5)),
            ..ReadinessPolicy::default()
        };

        let err = await_ready(&session, URI, &policy).await.unwrap_err();
        match err {
            PageError::ReadinessTimeout {
                uri,
                waited,
                last_title,
            } => {
                assert_eq!(uri, URI);
                assert!(waited >= Duration::from_secs(5));
                assert_eq!(last_title, "loading...");
            }
            other => panic!("意外的错误类型: {other:?}"),
        }
    }
}
