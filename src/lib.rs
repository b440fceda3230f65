//! # Message Review
//!
//! 手抄数字报文自动批阅核心：将 OCR 识别出的文本与标准参照报文比对，
//! 生成带评分的错误报告。
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 识别协作方边界
//! - `RecognitionEngine` - 为一份文档提供文本行的能力，构造时注入
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，全部为无 I/O 的纯计算
//! - `MessageParser` / `ReferenceParser` - 文本行 → 带坐标的数字组网格
//! - `normalizer` - OCR 形近字符修正
//! - `MessageComparator` - 按全局索引比对并分类错误
//! - `Scorer` - 错误列表 → 分数 / 等级 / 反馈
//! - `ReportGenerator` - 批阅结果 → 文本 / JSON 报告
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/review_service` - 单次批阅流程编排与失败兜底
//! - `orchestrator/store` - 批阅结果的并发安全存储
//!
//! ## 数据流
//!
//! ```text
//! 文本行 → 解析网格 → 标准化 → 错误列表 → 分数 + 反馈
//! ```
//!
//! 数据单向流动，任何组件都不会回调上游阶段。

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{PlainTextRecognizer, RecognitionEngine};
pub use models::{
    ErrorDetail, ErrorKind, Grade, MessageContent, MessageGroup, MessageHeader, ReviewResult,
    ReviewStatus, ReviewSummary,
};
pub use orchestrator::{ResultStore, ReviewService};
pub use services::{MessageComparator, MessageParser, ReferenceParser, ReportGenerator, Scorer};
