use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// 题目标签
///
/// 以 `(name, uri)` 整体作为身份，相同二者即视为同一标签
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Topic {
    pub uri: String,
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
        }
    }
}

/// 单个成功解析的题目页面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: String,
    pub title: String,
    pub uri: String,
    /// 难度文本，按原样保留，不做枚举化
    pub difficulty: String,
    pub description: String,
    /// 标签按页面中出现的顺序排列，可能重复
    pub topics: Vec<Topic>,
}

/// 单个页面的失败信息
#[derive(Debug)]
pub struct PageFailure {
    pub uri: String,
    pub error: PageError,
}

/// 批次整体状态；目前只有成功一种，页面级失败不影响该值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    #[default]
    Success,
}

/// 整个批次的汇总结果
///
/// 序列化时只输出 `status` 和 `results`，
/// 标签集合与失败列表仅保留在内存中
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    pub status: BatchStatus,
    pub results: Vec<ProblemRecord>,
    #[serde(skip)]
    pub topics: BTreeSet<Topic>,
    #[serde(skip)]
    pub failures: Vec<PageFailure>,
}

impl BatchResult {
    /// 参与爬取的候选页面总数
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}
