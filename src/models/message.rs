//! 报文数据模型
//!
//! 定义报文头部、数字组、报文内容与批阅结果等核心数据结构。
//! 所有结构体在创建后不可变，仅作为流水线各阶段之间传递的值对象。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 缺失组在错误详情中记录的提交值占位符
pub const MISSING_MARKER: &str = "(缺失)";

/// 多余组在错误详情中记录的正确值占位符
pub const EXTRA_MARKER: &str = "(多余)";

/// 报文头部信息
///
/// 仅作展示用途，不参与比对与评分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageHeader {
    /// 报文声明的组数（按原样保留字符串，可能含识别噪音）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<String>,
    /// 报文时间
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// 原始头部行
    #[serde(default)]
    pub raw_lines: Vec<String>,
}

/// 单组数字
///
/// `global_index` 是 (段, 行, 组位置) 的行优先序列化结果，
/// 也是跨报文对齐的唯一键；段/行/组位置仅用于展示定位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageGroup {
    /// 段号（从 1 开始）
    pub segment: usize,
    /// 段内行号（从 1 开始）
    pub line: usize,
    /// 行内组位置（从 1 开始）
    pub position: usize,
    /// 固定宽度数字值（不足时以 '?' 补齐）
    pub value: String,
    /// 全局索引（从 0 开始，全报文唯一）
    pub global_index: usize,
}

/// 报文内容
///
/// 头部 + 有序数字组 + 原始文本（仅留作审计，不会被二次解析）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    pub header: MessageHeader,
    pub groups: Vec<MessageGroup>,
    pub raw_text: String,
}

/// 错误类型
///
/// 封闭枚举，所有消费方必须穷尽匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// 内容不匹配
    Mismatch,
    /// 提交内容缺失
    Missing,
    /// 提交内容多余
    Extra,
}

impl ErrorKind {
    /// 报告中展示用的中文标签
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Mismatch => "内容错误",
            ErrorKind::Missing => "内容缺失",
            ErrorKind::Extra => "多余内容",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Mismatch => "mismatch",
            ErrorKind::Missing => "missing",
            ErrorKind::Extra => "extra",
        };
        write!(f, "{}", s)
    }
}

/// 错误详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// 段号
    pub segment: usize,
    /// 行号
    pub line: usize,
    /// 组位置
    pub position: usize,
    /// 全局索引
    pub global_index: usize,
    /// 提交的值（缺失时为 [`MISSING_MARKER`]）
    pub submitted_value: String,
    /// 正确的值（多余时为 [`EXTRA_MARKER`]）
    pub correct_value: String,
    /// 错误类型
    pub error_type: ErrorKind,
}

/// 批阅状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// 批阅完成
    Completed,
    /// 批阅失败
    Failed,
}

/// 批阅结果
///
/// 每次批阅生成一份，生成后不可变，仅结果存储持有其生命周期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub id: String,
    pub created_at: DateTime<Local>,
    /// 提交文件名
    pub pdf_filename: String,
    /// 参照文件名
    pub txt_filename: String,
    /// 参照报文总组数
    pub total_groups: usize,
    /// 错误数
    pub error_count: usize,
    /// 得分
    pub score: f64,
    /// 错误详情列表（按全局索引升序）
    pub errors: Vec<ErrorDetail>,
    /// 提交报文的头部信息
    pub header_info: MessageHeader,
    pub status: ReviewStatus,
    /// 反馈信息
    pub message: String,
}

/// 批阅摘要（用于列表显示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub id: String,
    pub created_at: DateTime<Local>,
    pub pdf_filename: String,
    pub score: f64,
    pub error_count: usize,
    pub status: ReviewStatus,
}

impl From<&ReviewResult> for ReviewSummary {
    fn from(result: &ReviewResult) -> Self {
        Self {
            id: result.id.clone(),
            created_at: result.created_at,
            pdf_filename: result.pdf_filename.clone(),
            score: result.score,
            error_count: result.error_count,
            status: result.status,
        }
    }
}
