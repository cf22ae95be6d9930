//! 结果写入服务 - 业务能力层
//!
//! 把整个批次的结果序列化为 JSON 并一次性写入文件

use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::error::AppError;
use crate::models::BatchResult;

/// 序列化为 4 空格缩进的 JSON
pub fn render_report(batch: &BatchResult) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    batch.serialize(&mut serializer)?;
    // serde_json 只输出合法 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 写入结果文件
pub async fn write_report(path: &Path, batch: &BatchResult) -> Result<(), AppError> {
    let output_error = |source: std::io::Error| AppError::OutputWrite {
        path: path.display().to_string(),
        source,
    };

    let json = render_report(batch).map_err(|e| output_error(e.into()))?;
    fs::write(path, json).await.map_err(output_error)?;

    info!(
        "💾 结果已写入: {} (共 {} 条记录)",
        path.display(),
        batch.results.len()
    );
    Ok(())
}
