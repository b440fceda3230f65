//! 批阅结果存储
//!
//! 以显式句柄替代隐式全局单例：调用方自行创建并传递 [`ResultStore`]。
//! 内部用单把互斥锁保护映射表，结果只有在完整构造后才会插入，
//! 读取方永远不会看到构造到一半的结果。

use crate::models::{ReviewResult, ReviewSummary};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// 批阅结果存储句柄
///
/// 克隆句柄共享同一份底层存储，可在并发批阅任务间传递。
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<Mutex<HashMap<String, ReviewResult>>>,
}

impl ResultStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 存入一份完整的批阅结果
    pub fn insert(&self, result: ReviewResult) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(result.id.clone(), result);
    }

    /// 按批阅ID取回结果
    pub fn get(&self, review_id: &str) -> Option<ReviewResult> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(review_id).cloned()
    }

    /// 列出所有批阅摘要（按创建时间倒序）
    pub fn list(&self) -> Vec<ReviewSummary> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut summaries: Vec<ReviewSummary> = map.values().map(ReviewSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// 存储的结果数量
    pub fn len(&self) -> usize {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
