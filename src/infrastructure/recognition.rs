//! 识别协作方边界 - 基础设施层
//!
//! 核心流水线不关心文本从何而来：识别引擎作为显式依赖
//! 在编排层构造时注入，测试中可用桩实现替换。

use crate::error::{AppError, AppResult, RecognitionError};
use std::path::Path;
use tracing::info;

/// 识别引擎协作方
///
/// 为一份文档提供有序、已去除首尾空白、非空的文本行。
/// 对行内容的准确性不做任何保证，解析器必须容忍噪音行。
pub trait RecognitionEngine: Send + Sync {
    fn recognize(&self, path: &Path) -> AppResult<Vec<String>>;
}

/// 纯文本识别器
///
/// 读取已完成 OCR 的纯文本文件，按行切分后返回。
/// 用于二进制入口与离线批阅场景。
#[derive(Debug, Default)]
pub struct PlainTextRecognizer;

impl PlainTextRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl RecognitionEngine for PlainTextRecognizer {
    fn recognize(&self, path: &Path) -> AppResult<Vec<String>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let lines: Vec<String> = text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(AppError::Recognition(RecognitionError::EmptyDocument {
                path: path.display().to_string(),
            }));
        }

        info!("识别完成: {} 行文本 ({})", lines.len(), path.display());
        Ok(lines)
    }
}
