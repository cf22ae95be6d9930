//! 页面处理上下文
//!
//! 封装"我正在处理第几个页面、地址是什么"这一信息

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 页面序号（从1开始，仅用于日志显示）
    pub page_index: usize,

    /// 候选页面总数
    pub total: usize,

    /// 页面地址
    pub uri: String,
}

impl PageCtx {
    /// 创建新的页面上下文
    pub fn new(page_index: usize, total: usize, uri: impl Into<String>) -> Self {
        Self {
            page_index,
            total,
            uri: uri.into(),
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[页面 {}/{}]", self.page_index, self.total)
    }
}
