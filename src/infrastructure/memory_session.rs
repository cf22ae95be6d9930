//! 内存浏览会话
//!
//! 按 URI 预置页面内容，不依赖真实浏览器，用于测试与离线回放

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PageError, PageResult};
use crate::infrastructure::PageSession;

/// 预置的单个页面
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    /// 依次返回的标题，读完后一直返回最后一个
    pub titles: Vec<String>,
    pub texts: HashMap<String, String>,
    pub links: HashMap<String, Vec<Option<String>>>,
    /// 为 true 时导航直接失败
    pub unreachable: bool,
}

impl MemoryPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            titles: vec![title.into()],
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    /// 在最终标题前插入若干个加载中标题
    pub fn loading_first(mut self, placeholders: &[&str]) -> Self {
        let mut titles: Vec<String> = placeholders.iter().map(|t| t.to_string()).collect();
        titles.append(&mut self.titles);
        self.titles = titles;
        self
    }

    pub fn with_text(mut self, selector: &str, text: impl Into<String>) -> Self {
        self.texts.insert(selector.to_string(), text.into());
        self
    }

    pub fn with_links(mut self, selector: &str, hrefs: &[&str]) -> Self {
        self.links.insert(
            selector.to_string(),
            hrefs.iter().map(|h| Some(h.to_string())).collect(),
        );
        self
    }
}

/// 内存浏览会话
#[derive(Debug, Default)]
pub struct MemorySession {
    pages: HashMap<String, MemoryPage>,
    current: Option<String>,
    title_reads: AtomicUsize,
    visited: Mutex<Vec<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, uri: impl Into<String>, page: MemoryPage) -> Self {
        self.pages.insert(uri.into(), page);
        self
    }

    /// 按导航顺序记录访问过的 URI
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    fn current_page(&self) -> PageResult<&MemoryPage> {
        self.current
            .as_ref()
            .and_then(|uri| self.pages.get(uri))
            .ok_or_else(|| PageError::Session("尚未导航到任何页面".to_string()))
    }
}

#[async_trait]
impl PageSession for MemorySession {
    async fn navigate(&mut self, uri: &str, _timeout: Duration) -> PageResult<()> {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(uri.to_string());
        }

        match self.pages.get(uri) {
            Some(page) if !page.unreachable => {
                self.current = Some(uri.to_string());
                self.title_reads.store(0, Ordering::SeqCst);
                Ok(())
            }
            _ => {
                self.current = None;
                Err(PageError::PageLoad {
                    uri: uri.to_string(),
                    reason: "页面不可达".to_string(),
                })
            }
        }
    }

    async fn title(&self) -> PageResult<String> {
        let page = self.current_page()?;
        let read = self.title_reads.fetch_add(1, Ordering::SeqCst);
        let title = page
            .titles
            .get(read)
            .or_else(|| page.titles.last())
            .cloned()
            .unwrap_or_default();
        Ok(title)
    }

    async fn query_text(&self, selector: &str) -> PageResult<Option<String>> {
        Ok(self.current_page()?.texts.get(selector).cloned())
    }

    async fn query_links(&self, selector: &str) -> PageResult<Vec<Option<String>>> {
        Ok(self
            .current_page()?
            .links
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_title_sequence_sticks_to_last() {
        let mut session = MemorySession::new().with_page(
            "u1",
            MemoryPage::new("Two Sum - LeetCode").loading_first(&["Loading..."]),
        );
        session.navigate("u1", Duration::from_secs(1)).await.unwrap();

        assert_eq!(session.title().await.unwrap(), "Loading...");
        assert_eq!(session.title().await.unwrap(), "Two Sum - LeetCode");
        assert_eq!(session.title().await.unwrap(), "Two Sum - LeetCode");
    }

    #[tokio::test]
    async fn test_unknown_uri_fails_navigation() {
        let mut session = MemorySession::new();
        let err = session
            .navigate("missing", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::PageLoad { .. }));
        assert_eq!(session.visited(), vec!["missing".to_string()]);
    }
}
