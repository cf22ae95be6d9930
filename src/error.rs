use std::time::Duration;

use thiserror::Error;

/// 单个页面范围内的错误
///
/// 这类错误在页面边界被完全吸收，只会导致该页面没有结果记录，
/// 不会中断整个批次
#[derive(Debug, Error)]
pub enum PageError {
    /// 导航失败
    #[error("导航到 {uri} 失败: {reason}")]
    PageLoad { uri: String, reason: String },

    /// 页面元素不存在（页面结构变化、付费题、已删除题等）
    #[error("未找到字段 {field} 对应的元素 (选择器: {selector})")]
    ElementNotFound {
        field: &'static str,
        selector: String,
    },

    /// 等待页面就绪超时
    #[error("页面 {uri} 在 {waited:?} 内未完成加载 (标题仍为: {last_title:?})")]
    ReadinessTimeout {
        uri: String,
        waited: Duration,
        last_title: String,
    },

    /// 严格模式下难度文本形态异常
    #[error("难度文本形态异常: 原始值 {raw:?}, 清洗后 {scrubbed:?}")]
    UnexpectedDifficulty { raw: String, scrubbed: String },

    /// 浏览会话本身不可用（脚本执行失败、连接断开等）
    #[error("浏览会话错误: {0}")]
    Session(String),
}

impl From<chromiumoxide::error::CdpError> for PageError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        PageError::Session(err.to_string())
    }
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::Session(format!("脚本返回值解析失败: {}", err))
    }
}

/// 不可恢复的应用错误，会使程序以非零状态退出
#[derive(Debug, Error)]
pub enum AppError {
    /// 种子列表文件读取失败
    #[error("无法读取种子列表文件 {path}: {source}")]
    SeedRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 浏览器启动或连接失败
    #[error("浏览器错误: {0}")]
    Browser(String),

    /// 结果文件写入失败
    #[error("无法写入结果文件 {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// 创建浏览器错误
    pub fn browser(message: impl std::fmt::Display) -> Self {
        AppError::Browser(message.to_string())
    }
}

/// 页面级结果类型
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_message_names_field_and_selector() {
        let err = PageError::ElementNotFound {
            field: "difficulty",
            selector: ".css-10o4wqw".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("difficulty"));
        assert!(msg.contains(".css-10o4wqw"));
    }

    #[test]
    fn test_serde_error_maps_to_session() {
        let err = serde_json::from_str::<String>("not json").unwrap_err();
        assert!(matches!(PageError::from(err), PageError::Session(_)));
    }
}
