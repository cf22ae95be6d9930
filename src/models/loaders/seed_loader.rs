use std::path::Path;

use scraper::Html;
use tokio::fs;
use tracing::info;

use crate::error::AppError;

/// 读取种子列表文件的原始 HTML
pub async fn load_seed_html(path: &Path) -> Result<String, AppError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::SeedRead {
            path: path.display().to_string(),
            source,
        })?;

    info!(
        "📄 已读取种子列表: {} ({} 字节)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        content.len()
    );

    Ok(content)
}

/// 将原始 HTML 解析为可查询的节点树
///
/// html5ever 对任意输入都会给出一棵树，解析本身不会失败
pub fn parse_seed_document(html: &str) -> Html {
    Html::parse_document(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_seed_file_is_seed_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.html");

        let err = load_seed_html(&missing).await.unwrap_err();
        assert!(matches!(err, AppError::SeedRead { .. }));
        assert!(err.to_string().contains("nope.html"));
    }

    #[tokio::test]
    async fn test_load_seed_html_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.html");
        std::fs::write(&path, "<a href=\"https://leetcode.com/problems/two-sum/\">1</a>").unwrap();

        let html = load_seed_html(&path).await.unwrap();
        assert!(html.contains("two-sum"));
    }
}
