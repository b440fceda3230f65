//! 编排层（Orchestration Layer）
//!
//! 负责串联批阅流程并持有跨请求状态，是核心算法的外围协调者。
//!
//! - `review_service`：单次批阅的完整流程（识别 → 解析 → 比对 → 评分），
//!   以及结果查询与报告生成
//! - `store`：批阅结果的并发安全存储句柄
//!
//! 设计原则：
//! 1. 核心算法（解析/标准化/比对/评分）不做 I/O，所有 I/O 集中在本层
//! 2. 识别引擎等协作方作为显式依赖注入，不做惰性初始化
//! 3. 每次批阅的报文内容仅在本次调用内存活，只有批阅结果被持久化

pub mod review_service;
pub mod store;

pub use review_service::ReviewService;
pub use store::ResultStore;
