pub mod connection;
pub mod headless;

use anyhow::Result;
use chromiumoxide::{Browser, Page};
use tracing::error;

use crate::error::AppError;

pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;

/// 打开若干个空白标签页，每个标签页对应一个独立的浏览会话
pub(crate) async fn open_pages(browser: &Browser, page_count: usize) -> Result<Vec<Page>> {
    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count.max(1) {
        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建第 {} 个标签页失败: {}", index + 1, e);
            AppError::browser(format!("创建页面失败: {}", e))
        })?;
        pages.push(page);
    }
    Ok(pages)
}
