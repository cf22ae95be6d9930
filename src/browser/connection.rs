use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::open_pages;
use crate::error::AppError;

/// 连接到已启动的浏览器（远程调试端口），并打开 `page_count` 个空白标签页
pub async fn connect_to_browser(port: u16, page_count: usize) -> Result<(Browser, Vec<Page>)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser(format!("无法连接到浏览器 (端口: {}): {}", port, e))
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = open_pages(&browser, page_count).await?;
    info!("✓ 已打开 {} 个标签页", pages.len());

    Ok((browser, pages))
}
