//! 浏览会话 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"加载页面、读标题、按选择器查询"的能力

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{PageError, PageResult};

/// 已渲染页面的查询能力
///
/// 职责：
/// - 导航到指定 URI
/// - 读取当前文档标题
/// - 按 CSS 选择器读取渲染后的文本或链接
/// - 不认识 ProblemRecord / Topic
///
/// 任意时刻一个会话只对应一个页面的状态，
/// 导航需要 `&mut self`，保证同一会话不会被两个爬取流程同时使用
#[async_trait]
pub trait PageSession: Send + Sync {
    /// 导航到指定 URI
    async fn navigate(&mut self, uri: &str, timeout: Duration) -> PageResult<()>;

    /// 当前文档标题，没有标题时返回空字符串
    async fn title(&self) -> PageResult<String>;

    /// 第一个匹配元素的渲染文本，元素不存在时返回 `None`
    async fn query_text(&self, selector: &str) -> PageResult<Option<String>>;

    /// 所有匹配元素的链接地址（按文档顺序），没有链接属性的元素对应 `None`
    async fn query_links(&self, selector: &str) -> PageResult<Vec<Option<String>>>;
}

/// 基于 chromiumoxide 的浏览会话
pub struct ChromiumSession {
    page: Page,
}

#[derive(Deserialize)]
struct TextQuery {
    text: Option<String>,
}

impl ChromiumSession {
    /// 创建新的浏览会话
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> PageResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result
            .into_value()
            .map_err(|e| PageError::Session(format!("脚本返回值转换失败: {:?}", e)))?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> PageResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }
}

#[async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&mut self, uri: &str, timeout: Duration) -> PageResult<()> {
        debug!("导航到: {}", uri);
        match tokio::time::timeout(timeout, self.page.goto(uri)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(PageError::PageLoad {
                uri: uri.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(PageError::PageLoad {
                uri: uri.to_string(),
                reason: format!("导航超时 ({:?})", timeout),
            }),
        }
    }

    async fn title(&self) -> PageResult<String> {
        let title = self.page.get_title().await?;
        Ok(title.unwrap_or_default())
    }

    async fn query_text(&self, selector: &str) -> PageResult<Option<String>> {
        // 返回值包一层对象，避免 null 结果在 CDP 层丢失
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                return {{ text: el ? el.innerText : null }};
            }})()
            "#,
            serde_json::to_string(selector)?
        );

        let query: TextQuery = self.eval_as(js_code).await?;
        Ok(query.text)
    }

    async fn query_links(&self, selector: &str) -> PageResult<Vec<Option<String>>> {
        // el.href 得到的是解析后的绝对地址
        let js_code = format!(
            r#"
            (() => Array.from(document.querySelectorAll({})).map(
                el => el.href || el.getAttribute('href') || null
            ))()
            "#,
            serde_json::to_string(selector)?
        );

        self.eval_as(js_code).await
    }
}
