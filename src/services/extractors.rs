//! 字段提取服务 - 业务能力层
//!
//! 每个字段由两部分组成：
//! - 纯函数的文本清洗（`normalize_title` / `parse_identifier` / ...），可直接用固定样本测试
//! - 基于 `PageSession` 的异步读取，定位元素失败时返回 `ElementNotFound`

use crate::error::{PageError, PageResult};
use crate::infrastructure::PageSession;
use crate::models::Topic;

/// 题号元素
pub const IDENTIFIER_SELECTOR: &str = ".css-v3d350";
/// 难度徽章元素
pub const DIFFICULTY_SELECTOR: &str = ".css-10o4wqw";
/// 题目正文，需要同时带有两个 class
pub const DESCRIPTION_SELECTOR: &str = "div.content__u3I1.question-content__JfgR";
/// 标签链接元素
pub const TOPIC_SELECTOR: &str = ".topic-tag__1jni";

/// 与难度徽章拼接在一起的无关按钮文本，按顺序移除
const DIFFICULTY_NOISE: [&str; 2] = ["Add to List", "Share"];

/// 字段提取参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub title_suffix: String,
    pub tag_base_url: String,
    /// 为 true 时难度必须是单个字母单词，否则整页失败
    pub strict_difficulty: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            title_suffix: " - LeetCode".to_string(),
            tag_base_url: "https://leetcode.com/tag/".to_string(),
            strict_difficulty: false,
        }
    }
}

// ========== 文本清洗 ==========

/// 去掉标题中的站点后缀
pub fn normalize_title(raw: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return raw.to_string();
    }
    raw.replace(suffix, "")
}

/// 取第一个 `.` 之前的部分并去掉首尾空白
pub fn parse_identifier(raw: &str) -> String {
    raw.split('.').next().unwrap_or_default().trim().to_string()
}

/// 清洗难度徽章文本
///
/// 1. 去掉所有数字字符（点赞数混在同一元素里）
/// 2. 依次去掉 "Add to List" 与 "Share"
/// 3. 去掉首尾空白
pub fn scrub_difficulty(raw: &str) -> String {
    let mut text: String = raw.chars().filter(|c| !c.is_numeric()).collect();
    for noise in DIFFICULTY_NOISE {
        text = text.replace(noise, "");
    }
    text.trim().to_string()
}

/// 严格模式下校验清洗结果：必须是非空的单个字母单词
pub fn validate_difficulty(raw: &str, scrubbed: &str) -> PageResult<()> {
    if !scrubbed.is_empty() && scrubbed.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        Err(PageError::UnexpectedDifficulty {
            raw: raw.to_string(),
            scrubbed: scrubbed.to_string(),
        })
    }
}

/// 由标签链接推导标签名：去掉前缀，删除 `/`，`-` 替换为空格
pub fn topic_from_href(href: &str, tag_base_url: &str) -> Topic {
    let name = href
        .replace(tag_base_url, "")
        .replace('/', "")
        .replace('-', " ");
    Topic::new(name, href)
}

// ========== 页面读取 ==========

async fn required_text<S>(session: &S, field: &'static str, selector: &str) -> PageResult<String>
where
    S: PageSession + ?Sized,
{
    session
        .query_text(selector)
        .await?
        .ok_or_else(|| PageError::ElementNotFound {
            field,
            selector: selector.to_string(),
        })
}

pub async fn extract_title<S>(session: &S, options: &FieldOptions) -> PageResult<String>
where
    S: PageSession + ?Sized,
{
    let raw = session.title().await?;
    Ok(normalize_title(&raw, &options.title_suffix))
}

pub async fn extract_identifier<S>(session: &S) -> PageResult<String>
where
    S: PageSession + ?Sized,
{
    let raw = required_text(session, "id", IDENTIFIER_SELECTOR).await?;
    Ok(parse_identifier(&raw))
}

pub async fn extract_difficulty<S>(session: &S, options: &FieldOptions) -> PageResult<String>
where
    S: PageSession + ?Sized,
{
    let raw = required_text(session, "difficulty", DIFFICULTY_SELECTOR).await?;
    let difficulty = scrub_difficulty(&raw);
    if options.strict_difficulty {
        validate_difficulty(&raw, &difficulty)?;
    }
    Ok(difficulty)
}

/// 正文按渲染文本原样返回
pub async fn extract_description<S>(session: &S) -> PageResult<String>
where
    S: PageSession + ?Sized,
{
    required_text(session, "description", DESCRIPTION_SELECTOR).await
}

/// 按文档顺序返回标签，不去重；没有标签时返回空列表
pub async fn extract_topics<S>(session: &S, options: &FieldOptions) -> PageResult<Vec<Topic>>
where
    S: PageSession + ?Sized,
{
    session
        .query_links(TOPIC_SELECTOR)
        .await?
        .into_iter()
        .map(|href| {
            href.map(|h| topic_from_href(&h, &options.tag_base_url))
                .ok_or_else(|| PageError::ElementNotFound {
                    field: "topics",
                    selector: format!("{}[href]", TOPIC_SELECTOR),
                })
        })
        .collect()
}
