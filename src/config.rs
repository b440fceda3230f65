use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 报文格式配置 ---
    /// 每组数字个数
    pub digits_per_group: usize,
    /// 每行组数
    pub groups_per_line: usize,
    /// 每段行数
    pub lines_per_segment: usize,
    /// 段数
    pub segments_count: usize,
    // --- 评分配置 ---
    /// 总分
    pub total_score: f64,
    /// 每个错误扣分
    pub deduct_per_error: f64,
    // --- 日志配置 ---
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            digits_per_group: 4,
            groups_per_line: 10,
            lines_per_segment: 10,
            segments_count: 3,
            total_score: 100.0,
            deduct_per_error: 1.0,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件结构，所有字段可选，缺省回落到 [`Config::default`]
#[derive(Debug, Deserialize)]
struct ConfigFile {
    digits_per_group: Option<usize>,
    groups_per_line: Option<usize>,
    lines_per_segment: Option<usize>,
    segments_count: Option<usize>,
    total_score: Option<f64>,
    deduct_per_error: Option<f64>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 标准报文总组数（每行组数 × 每段行数 × 段数）
    pub fn total_groups(&self) -> usize {
        self.groups_per_line * self.lines_per_segment * self.segments_count
    }

    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            digits_per_group: std::env::var("DIGITS_PER_GROUP").ok().and_then(|v| v.parse().ok()).unwrap_or(default.digits_per_group),
            groups_per_line: std::env::var("GROUPS_PER_LINE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.groups_per_line),
            lines_per_segment: std::env::var("LINES_PER_SEGMENT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.lines_per_segment),
            segments_count: std::env::var("SEGMENTS_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.segments_count),
            total_score: std::env::var("TOTAL_SCORE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.total_score),
            deduct_per_error: std::env::var("DEDUCT_PER_ERROR").ok().and_then(|v| v.parse().ok()).unwrap_or(default.deduct_per_error),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置，文件中未出现的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let file: ConfigFile = toml::from_str(&text)?;
        let default = Self::default();
        Ok(Self {
            digits_per_group: file.digits_per_group.unwrap_or(default.digits_per_group),
            groups_per_line: file.groups_per_line.unwrap_or(default.groups_per_line),
            lines_per_segment: file.lines_per_segment.unwrap_or(default.lines_per_segment),
            segments_count: file.segments_count.unwrap_or(default.segments_count),
            total_score: file.total_score.unwrap_or(default.total_score),
            deduct_per_error: file.deduct_per_error.unwrap_or(default.deduct_per_error),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_shape() {
        let config = Config::default();
        assert_eq!(config.digits_per_group, 4);
        assert_eq!(config.total_groups(), 300);
    }

    #[test]
    fn test_from_toml_file_partial() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        writeln!(file, "groups_per_line = 8\ntotal_score = 80.0").unwrap();

        let config = Config::from_toml_file(file.path()).expect("加载配置失败");
        assert_eq!(config.groups_per_line, 8);
        assert_eq!(config.total_score, 80.0);
        // 未出现的字段回落到默认值
        assert_eq!(config.digits_per_group, 4);
        assert_eq!(config.deduct_per_error, 1.0);
    }
}
