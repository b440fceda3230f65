//! 报告生成模块
//!
//! 将批阅结果渲染为文本或 JSON 报告。
//! 不支持的格式请求是面向调用方的错误，绝不静默回落到默认格式。

use crate::error::{AppError, AppResult, ReportError};
use crate::models::ReviewResult;
use std::str::FromStr;

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    /// 对应的 MIME 类型
    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain",
            ReportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(AppError::Report(ReportError::UnsupportedFormat {
                format: other.to_string(),
            })),
        }
    }
}

/// 报告生成器
#[derive(Debug, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    /// 创建新的报告生成器
    pub fn new() -> Self {
        Self
    }

    /// 生成指定格式的报告，返回 (内容, MIME 类型)
    pub fn generate(&self, result: &ReviewResult, format: ReportFormat) -> AppResult<(String, &'static str)> {
        let content = match format {
            ReportFormat::Text => self.generate_text_report(result),
            ReportFormat::Json => self.generate_json_report(result)?,
        };
        Ok((content, format.mime_type()))
    }

    /// 生成文本格式报告
    pub fn generate_text_report(&self, result: &ReviewResult) -> String {
        let mut lines = Vec::new();
        lines.push("=".repeat(60));
        lines.push("             报文批阅结果报告".to_string());
        lines.push("=".repeat(60));
        lines.push(String::new());

        // 基本信息
        lines.push("【基本信息】".to_string());
        lines.push(format!(
            "  批阅时间: {}",
            result.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
        lines.push(format!("  提交文件: {}", result.pdf_filename));
        lines.push(format!("  参照文件: {}", result.txt_filename));
        lines.push(String::new());

        // 头部信息
        if !result.header_info.raw_lines.is_empty()
            || result.header_info.group_count.is_some()
            || result.header_info.timestamp.is_some()
        {
            lines.push("【报文头部】".to_string());
            if let Some(count) = &result.header_info.group_count {
                lines.push(format!("  报文组数: {}", count));
            }
            if let Some(ts) = &result.header_info.timestamp {
                lines.push(format!("  时间: {}", ts));
            }
            for raw_line in &result.header_info.raw_lines {
                lines.push(format!("  {}", raw_line));
            }
            lines.push(String::new());
        }

        // 评分结果
        lines.push("【评分结果】".to_string());
        lines.push(format!("  总组数: {}", result.total_groups));
        lines.push(format!("  错误数: {}", result.error_count));
        lines.push(format!("  得  分: {:.1} 分", result.score));
        lines.push(String::new());

        // 错误详情
        if !result.errors.is_empty() {
            lines.push("【错误详情】".to_string());
            lines.push("-".repeat(60));
            lines.push(format!(
                "{:<6}{:<18}{:<12}{:<12}{}",
                "序号", "位置", "提交值", "正确值", "类型"
            ));
            lines.push("-".repeat(60));

            for (i, error) in result.errors.iter().enumerate() {
                let position = format!(
                    "第{}段-第{}行-第{}组",
                    error.segment, error.line, error.position
                );
                lines.push(format!(
                    "{:<6}{:<18}{:<12}{:<12}{}",
                    i + 1,
                    position,
                    error.submitted_value,
                    error.correct_value,
                    error.error_type.label()
                ));
            }

            lines.push("-".repeat(60));
        } else {
            lines.push("【恭喜！没有发现任何错误！】".to_string());
        }

        lines.push(String::new());
        lines.push("=".repeat(60));
        lines.push("                 报告生成完毕".to_string());
        lines.push("=".repeat(60));

        lines.join("\n")
    }

    /// 生成JSON格式报告
    pub fn generate_json_report(&self, result: &ReviewResult) -> AppResult<String> {
        let json = serde_json::to_string_pretty(result)?;
        Ok(json)
    }
}
