//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::{info, warn};

use crate::config::Config;
use crate::models::BatchResult;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目页面爬取");
    info!("📄 种子列表: {}", config.seed_html_path);
    info!("🔗 题目链接前缀: {}", config.problem_base_url);
    match config.page_count() {
        1 => info!("📊 执行模式: 单标签页顺序处理"),
        n => info!("📊 执行模式: {} 个标签页并行处理", n),
    }
    info!("{}", "=".repeat(60));
}

/// 记录链接加载信息
///
/// # 参数
/// - `total`: 链接总数
/// - `sessions`: 可用会话数
pub fn log_links_loaded(total: usize, sessions: usize) {
    info!("✓ 找到 {} 个待处理的题目页面", total);
    if sessions > 1 {
        info!("📋 将由 {} 个标签页并行处理，结果按列表顺序输出\n", sessions);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(batch: &BatchResult, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", batch.results.len(), batch.attempted());
    info!("❌ 失败: {}", batch.failures.len());
    info!("🏷️ 标签总数: {}", batch.topics.len());
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", config.output_path);
    if !batch.failures.is_empty() {
        warn!("失败页面已记录至: {}", config.failure_log_file);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("两数之和", 2), "两数...");
        assert_eq!(truncate_text("Two Sum", 20), "Two Sum");
    }
}
