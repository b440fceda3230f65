//! 批阅服务 - 编排层
//!
//! 串联 识别 → 解析 → 比对 → 评分 的完整批阅流程，并持久化结果。
//!
//! 流程是原子的：任一协作方失败时记录一份 `failed` 结果
//! （零组数、零分、诊断信息），绝不落下半截错误列表。

use crate::config::Config;
use crate::error::{AppError, AppResult, ReportError};
use crate::infrastructure::RecognitionEngine;
use crate::models::{
    ErrorDetail, MessageContent, MessageHeader, ReviewResult, ReviewStatus, ReviewSummary,
};
use crate::orchestrator::store::ResultStore;
use crate::services::{MessageComparator, MessageParser, ReferenceParser, ReportGenerator, Scorer};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// 报文批阅服务
pub struct ReviewService {
    engine: Arc<dyn RecognitionEngine>,
    parser: MessageParser,
    reference_parser: ReferenceParser,
    comparator: MessageComparator,
    scorer: Scorer,
    report_generator: ReportGenerator,
    store: ResultStore,
}

impl ReviewService {
    /// 创建批阅服务
    ///
    /// 识别引擎在构造时显式注入，便于测试替换。
    pub fn new(config: &Config, engine: Arc<dyn RecognitionEngine>) -> Self {
        Self::with_store(config, engine, ResultStore::new())
    }

    /// 使用外部托管的结果存储创建批阅服务
    pub fn with_store(
        config: &Config,
        engine: Arc<dyn RecognitionEngine>,
        store: ResultStore,
    ) -> Self {
        Self {
            engine,
            parser: MessageParser::new(config),
            reference_parser: ReferenceParser::new(config),
            comparator: MessageComparator::new(),
            scorer: Scorer::new(config),
            report_generator: ReportGenerator::new(),
            store,
        }
    }

    /// 处理提交文档：识别 → 启发式解析
    pub fn process_submission(&self, path: &Path) -> AppResult<MessageContent> {
        info!("开始处理提交文档: {}", path.display());

        let lines = self.engine.recognize(path)?;
        let content = self.parser.parse_message(&lines);

        info!("提交文档处理完成，识别到 {} 组数字", content.groups.len());
        Ok(content)
    }

    /// 处理参照文件：读取 → 严格解析
    pub async fn process_reference(&self, path: &Path) -> AppResult<MessageContent> {
        info!("开始处理参照文件: {}", path.display());

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let content = self.reference_parser.parse_text(&text);

        info!("参照文件处理完成，包含 {} 组数字", content.groups.len());
        Ok(content)
    }

    /// 执行完整的批阅流程
    ///
    /// 无论成功失败都会生成并存储一份结果；失败结果不含任何错误详情。
    pub async fn review(
        &self,
        submission_path: &Path,
        reference_path: &Path,
        pdf_filename: &str,
        txt_filename: &str,
    ) -> ReviewResult {
        let review_id: String = Uuid::new_v4().to_string().chars().take(8).collect();
        info!("开始批阅任务 {}", review_id);

        let pdf_filename = resolve_filename(pdf_filename, submission_path);
        let txt_filename = resolve_filename(txt_filename, reference_path);

        let result = match self.run_pipeline(submission_path, reference_path).await {
            Ok((errors, total_groups, error_count, header_info)) => {
                let score = self.scorer.calculate_score(&errors);
                let message = self.scorer.get_feedback(score, error_count);

                info!("批阅完成 {}: 得分 {:.1}, 错误 {}", review_id, score, error_count);

                ReviewResult {
                    id: review_id,
                    created_at: Local::now(),
                    pdf_filename,
                    txt_filename,
                    total_groups,
                    error_count,
                    score,
                    errors,
                    header_info,
                    status: ReviewStatus::Completed,
                    message,
                }
            }
            Err(e) => {
                error!("批阅失败 {}: {}", review_id, e);

                ReviewResult {
                    id: review_id,
                    created_at: Local::now(),
                    pdf_filename,
                    txt_filename,
                    total_groups: 0,
                    error_count: 0,
                    score: 0.0,
                    errors: Vec::new(),
                    header_info: MessageHeader::default(),
                    status: ReviewStatus::Failed,
                    message: format!("批阅失败: {}", e),
                }
            }
        };

        self.store.insert(result.clone());
        result
    }

    async fn run_pipeline(
        &self,
        submission_path: &Path,
        reference_path: &Path,
    ) -> AppResult<(Vec<ErrorDetail>, usize, usize, MessageHeader)> {
        let submitted = self.process_submission(submission_path)?;
        let reference = self.process_reference(reference_path).await?;

        let (errors, total_groups, error_count) =
            self.comparator
                .compare_with_tolerance(&submitted, &reference, true);

        Ok((errors, total_groups, error_count, submitted.header))
    }

    /// 获取批阅结果
    pub fn get_result(&self, review_id: &str) -> Option<ReviewResult> {
        self.store.get(review_id)
    }

    /// 获取所有批阅摘要
    pub fn list_results(&self) -> Vec<ReviewSummary> {
        self.store.list()
    }

    /// 生成报告，返回 (报告内容, MIME 类型)
    ///
    /// 结果不存在或格式不受支持时返回明确错误。
    pub fn generate_report(
        &self,
        review_id: &str,
        format: &str,
    ) -> AppResult<(String, &'static str)> {
        let result = self.get_result(review_id).ok_or_else(|| {
            AppError::Report(ReportError::ResultNotFound {
                review_id: review_id.to_string(),
            })
        })?;

        let format = format.parse()?;
        self.report_generator.generate(&result, format)
    }
}

/// 文件名为空时回落到路径中的文件名
fn resolve_filename(filename: &str, path: &Path) -> String {
    if !filename.is_empty() {
        return filename.to_string();
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
