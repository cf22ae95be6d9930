//! 链接提取服务 - 业务能力层
//!
//! 从种子列表文档中提取去重后的题目链接

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::debug;

/// 提取所有包含 `base_url_prefix` 的链接
///
/// - 按文档顺序扫描全部 `<a>` 元素
/// - 没有 `href` 的元素直接跳过
/// - 重复链接只保留第一次出现的位置
/// - 没有匹配时返回空列表
pub fn extract_links(document: &Html, base_url_prefix: &str) -> Vec<String> {
    let Ok(anchor_selector) = Selector::parse("a") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if href.contains(base_url_prefix) && seen.insert(href) {
            links.push(href.to_string());
        }
    }

    debug!("从种子列表中提取到 {} 个唯一链接", links.len());
    links
}
