//! 失败记录服务 - 业务能力层
//!
//! 只负责"写失败页面日志"能力，不关心流程

use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::Result;
use tracing::debug;

/// 失败记录服务
///
/// 职责：
/// - 将无法提取的页面及原因追加写入日志文件
/// - 只处理单个页面
/// - 不出现 Vec<ProblemRecord>
#[derive(Debug, Clone)]
pub struct FailureWriter {
    log_file_path: String,
}

impl FailureWriter {
    /// 使用默认路径创建
    pub fn new() -> Self {
        Self {
            log_file_path: "failed_pages.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.log_file_path
    }

    /// 写入日志头，覆盖上一次运行的内容
    pub fn init(&self) -> Result<()> {
        let log_header = format!(
            "{}\n失败页面日志 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(&self.log_file_path, log_header)?;
        Ok(())
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `page_index`: 页面序号（从1开始）
    /// - `uri`: 页面地址
    /// - `reason`: 失败原因
    pub fn write(&self, page_index: usize, uri: &str, reason: &str) -> Result<()> {
        debug!("写入失败记录: 页面 {} | {}", page_index, uri);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)?;

        let line = format!("页面 {} | {} | 原因: {}\n", page_index, uri, reason);
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

impl Default for FailureWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.txt");
        let writer = FailureWriter::with_path(path.to_string_lossy());

        writer.init().unwrap();
        writer
            .write(2, "https://leetcode.com/problems/x/", "未找到元素")
            .unwrap();
        writer
            .write(5, "https://leetcode.com/problems/y/", "超时")
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("失败页面日志"));
        let lines: Vec<&str> = content.lines().filter(|l| l.starts_with("页面")).collect();
        assert_eq!(
            lines,
            vec![
                "页面 2 | https://leetcode.com/problems/x/ | 原因: 未找到元素",
                "页面 5 | https://leetcode.com/problems/y/ | 原因: 超时",
            ]
        );
    }
}
