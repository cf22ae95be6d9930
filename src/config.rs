use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::services::{FailureWriter, FieldOptions, ReadinessPolicy};
use crate::workflow::CrawlOptions;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 种子列表 HTML 文件路径
    pub seed_html_path: String,
    /// 结果 JSON 输出路径
    pub output_path: String,
    /// 失败页面日志文件
    pub failure_log_file: String,
    /// 题目链接前缀，只有包含该前缀的链接才会被爬取
    pub problem_base_url: String,
    /// 标签链接前缀，用于推导标签名
    pub tag_base_url: String,
    /// 页面标题中需要去掉的站点后缀
    pub title_suffix: String,
    /// 浏览器调试端口；设置时连接已有浏览器，否则启动无头浏览器
    pub browser_debug_port: Option<u16>,
    /// 无头模式下使用的浏览器可执行文件
    pub chrome_executable: Option<String>,
    /// 导航后的固定等待时间（毫秒）
    pub settle_delay_ms: u64,
    /// 就绪轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 就绪等待上限（秒），0 表示不限
    pub readiness_timeout_secs: u64,
    /// 单次导航超时（秒）
    pub navigation_timeout_secs: u64,
    /// 同时打开的页面数量，1 为严格顺序执行
    pub max_concurrent_pages: usize,
    /// 难度字段是否使用严格校验
    pub strict_difficulty: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_html_path: "html/leetcode_01".to_string(),
            output_path: "result.json".to_string(),
            failure_log_file: "failed_pages.txt".to_string(),
            problem_base_url: "https://leetcode.com/problems/".to_string(),
            tag_base_url: "https://leetcode.com/tag/".to_string(),
            title_suffix: " - LeetCode".to_string(),
            browser_debug_port: None,
            chrome_executable: None,
            settle_delay_ms: 3000,
            poll_interval_ms: 1000,
            readiness_timeout_secs: 60,
            navigation_timeout_secs: 30,
            max_concurrent_pages: 1,
            strict_difficulty: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载；设置了 `CRAWLER_CONFIG` 时先读取该 TOML 文件作为基础
    pub fn load() -> Result<Self> {
        let base = match std::env::var("CRAWLER_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            seed_html_path: env_string("SEED_HTML_PATH").unwrap_or(self.seed_html_path),
            output_path: env_string("OUTPUT_PATH").unwrap_or(self.output_path),
            failure_log_file: env_string("FAILURE_LOG_FILE").unwrap_or(self.failure_log_file),
            problem_base_url: env_string("PROBLEM_BASE_URL").unwrap_or(self.problem_base_url),
            tag_base_url: env_string("TAG_BASE_URL").unwrap_or(self.tag_base_url),
            title_suffix: env_string("TITLE_SUFFIX").unwrap_or(self.title_suffix),
            browser_debug_port: env_parsed("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            chrome_executable: env_string("CHROME_EXECUTABLE").or(self.chrome_executable),
            settle_delay_ms: env_parsed("SETTLE_DELAY_MS").unwrap_or(self.settle_delay_ms),
            poll_interval_ms: env_parsed("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            readiness_timeout_secs: env_parsed("READINESS_TIMEOUT_SECS")
                .unwrap_or(self.readiness_timeout_secs),
            navigation_timeout_secs: env_parsed("NAVIGATION_TIMEOUT_SECS")
                .unwrap_or(self.navigation_timeout_secs),
            max_concurrent_pages: env_parsed("MAX_CONCURRENT_PAGES")
                .unwrap_or(self.max_concurrent_pages),
            strict_difficulty: env_parsed("STRICT_DIFFICULTY").unwrap_or(self.strict_difficulty),
            verbose_logging: env_parsed("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 实际使用的页面数量，至少为 1
    pub fn page_count(&self) -> usize {
        self.max_concurrent_pages.max(1)
    }

    /// 构建爬取参数
    pub fn crawl_options(&self) -> CrawlOptions {
        let readiness_timeout = match self.readiness_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        CrawlOptions {
            problem_base_url: self.problem_base_url.clone(),
            navigation_timeout: Duration::from_secs(self.navigation_timeout_secs),
            readiness: ReadinessPolicy {
                settle_delay: Duration::from_millis(self.settle_delay_ms),
                poll_interval: Duration::from_millis(self.poll_interval_ms),
                timeout: readiness_timeout,
            },
            fields: FieldOptions {
                title_suffix: self.title_suffix.clone(),
                tag_base_url: self.tag_base_url.clone(),
                strict_difficulty: self.strict_difficulty,
            },
            failure_writer: Some(FailureWriter::with_path(&self.failure_log_file)),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            seed_html_path = "fixtures/list.html"
            max_concurrent_pages = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.seed_html_path, "fixtures/list.html");
        assert_eq!(config.max_concurrent_pages, 4);
        assert_eq!(config.output_path, "result.json");
        assert_eq!(config.problem_base_url, "https://leetcode.com/problems/");
        assert_eq!(config.browser_debug_port, None);
    }

    #[test]
    fn test_zero_readiness_timeout_means_unbounded() {
        let config = Config {
            readiness_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.crawl_options().readiness.timeout.is_none());

        let bounded = Config::default().crawl_options();
        assert_eq!(bounded.readiness.timeout, Some(Duration::from_secs(60)));
        assert_eq!(bounded.readiness.settle_delay, Duration::from_secs(3));
        assert_eq!(bounded.readiness.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_page_count_never_zero() {
        let config = Config {
            max_concurrent_pages: 0,
            ..Config::default()
        };
        assert_eq!(config.page_count(), 1);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml_str("max_concurrent_pages = \"many\"").is_err());
    }
}
