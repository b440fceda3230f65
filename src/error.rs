use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 识别协作方错误
    Recognition(RecognitionError),
    /// 文件操作错误
    File(FileError),
    /// 报告生成错误
    Report(ReportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Recognition(e) => write!(f, "识别错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Report(e) => write!(f, "报告错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Recognition(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Report(e) => Some(e),
        }
    }
}

/// 识别协作方错误
#[derive(Debug)]
pub enum RecognitionError {
    /// 识别引擎执行失败
    EngineFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文档中没有任何可识别的文本行
    EmptyDocument { path: String },
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionError::EngineFailed { path, source } => {
                write!(f, "识别引擎执行失败 ({}): {}", path, source)
            }
            RecognitionError::EmptyDocument { path } => {
                write!(f, "文档中没有可识别的文本行: {}", path)
            }
        }
    }
}

impl std::error::Error for RecognitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecognitionError::EngineFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            RecognitionError::EmptyDocument { .. } => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 报告生成错误
#[derive(Debug)]
pub enum ReportError {
    /// 请求了不支持的报告格式
    UnsupportedFormat { format: String },
    /// 批阅结果不存在
    ResultNotFound { review_id: String },
    /// 序列化失败
    SerializeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::UnsupportedFormat { format } => {
                write!(f, "不支持的报告格式: {}", format)
            }
            ReportError::ResultNotFound { review_id } => {
                write!(f, "未找到批阅结果: {}", review_id)
            }
            ReportError::SerializeFailed { source } => {
                write!(f, "报告序列化失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::SerializeFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Report(ReportError::SerializeFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建识别引擎失败错误
    pub fn recognition_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Recognition(RecognitionError::EngineFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
