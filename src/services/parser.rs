//! 报文解析模块
//!
//! 将识别出的文本行分解为头部信息与带坐标的数字组集合。
//!
//! 提供两种解析器：
//! - [`MessageParser`]：面向 OCR 识别结果的启发式解析器，容忍噪音行与残缺行
//! - [`ReferenceParser`]：面向标准参照文件的严格解析器，坐标由全局索引取模计算
//!
//! 两者对格式良好的输入产生一致的坐标语义，只有在畸形输入上才允许分歧。

use crate::config::Config;
use crate::models::{MessageContent, MessageGroup, MessageHeader};
use regex::Regex;
use tracing::info;

/// 头部关键词
const HEADER_KEYWORDS: [&str; 6] = ["组", "时间", "日期", "报文", "号", "第"];

/// 一行达到该数字组数量即认定为数据行，头部扫描就此结束
const DATA_LINE_GROUP_THRESHOLD: usize = 5;

/// 数字组少于该数量的行视为噪音行，整行跳过
const NOISE_LINE_MIN_GROUPS: usize = 3;

/// 参照文件中一行数字字符达到该数量即认定为数据行
const REFERENCE_DATA_DIGIT_THRESHOLD: usize = 30;

/// 从行中提取声明的组数，如 "共 300 组"
fn extract_group_count(line: &str) -> Option<String> {
    if let Ok(re) = Regex::new(r"(\d+)\s*组") {
        if let Some(caps) = re.captures(line) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// 从行中提取时间字符串（日期或时刻）
fn extract_timestamp(line: &str) -> Option<String> {
    if let Ok(re) = Regex::new(r"(\d{4}[-/年]\d{1,2}[-/月]\d{1,2}日?|\d{1,2}:\d{2}(:\d{2})?)") {
        if let Some(m) = re.find(line) {
            return Some(m.as_str().to_string());
        }
    }
    None
}

/// 报文解析器（启发式）
pub struct MessageParser {
    digits_per_group: usize,
    groups_per_line: usize,
    lines_per_segment: usize,
}

impl MessageParser {
    /// 创建新的报文解析器
    pub fn new(config: &Config) -> Self {
        Self {
            digits_per_group: config.digits_per_group,
            groups_per_line: config.groups_per_line,
            lines_per_segment: config.lines_per_segment,
        }
    }

    /// 解析报文头部（最多检查前 5 行）
    ///
    /// 含关键词或处于前 3 行的行视为头部行；
    /// 但数字组密度高（≥5 组）的行始终视为数据行，头部扫描在其之前结束。
    ///
    /// 返回 (头部信息, 主体起始行索引)。
    pub fn parse_header(&self, lines: &[String]) -> (MessageHeader, usize) {
        let mut header = MessageHeader::default();
        let mut header_lines = Vec::new();
        let mut header_end_idx = 0;

        for (i, raw) in lines.iter().take(5).enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let mut is_header =
                HEADER_KEYWORDS.iter().any(|k| line.contains(k)) || i < 3;

            // 数字组密度高的行是数据行，密度判断优先于关键词和行位置
            if self.extract_digit_groups(line).len() >= DATA_LINE_GROUP_THRESHOLD {
                is_header = false;
            }

            if is_header {
                header_lines.push(line.to_string());
                header_end_idx = i + 1;

                // 尝试提取组数
                if line.contains('组') {
                    if let Some(count) = extract_group_count(line) {
                        header.group_count = Some(count);
                    }
                }

                // 尝试提取时间
                if let Some(ts) = extract_timestamp(line) {
                    header.timestamp = Some(ts);
                }
            } else {
                break;
            }
        }

        header.raw_lines = header_lines;
        info!(
            "解析头部完成，共 {} 行，头部结束于行 {}",
            header.raw_lines.len(),
            header_end_idx
        );

        (header, header_end_idx)
    }

    /// 从文本中提取数字组
    ///
    /// 丢弃所有非数字字符后按固定宽度切分；
    /// 末尾不完整的组以 '?' 补齐宽度保留，不会被静默丢弃。
    pub fn extract_digit_groups(&self, text: &str) -> Vec<String> {
        let all_digits: Vec<char> = text.chars().filter(|c| c.is_ascii_digit()).collect();

        let mut groups = Vec::new();
        for chunk in all_digits.chunks(self.digits_per_group) {
            let mut group: String = chunk.iter().collect();
            while group.len() < self.digits_per_group {
                group.push('?');
            }
            groups.push(group);
        }
        groups
    }

    /// 解析报文主体
    ///
    /// 噪音行（数字组少于 3 个）整行跳过，不推进行/段计数；
    /// 每行最多取每行组数上限个数字组；`global_index` 逐组递增，永不复用。
    pub fn parse_body(&self, lines: &[String], start_idx: usize) -> Vec<MessageGroup> {
        let mut groups = Vec::new();
        let mut global_idx = 0;
        let mut segment = 1;
        let mut line_in_segment = 1;

        for raw in lines.iter().skip(start_idx) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let line_groups = self.extract_digit_groups(line);

            // 跳过非数据行
            if line_groups.len() < NOISE_LINE_MIN_GROUPS {
                continue;
            }

            for (pos_idx, value) in line_groups
                .into_iter()
                .take(self.groups_per_line)
                .enumerate()
            {
                groups.push(MessageGroup {
                    segment,
                    line: line_in_segment,
                    position: pos_idx + 1,
                    value,
                    global_index: global_idx,
                });
                global_idx += 1;
            }

            // 更新段和行计数
            line_in_segment += 1;
            if line_in_segment > self.lines_per_segment {
                line_in_segment = 1;
                segment += 1;
            }
        }

        info!("解析主体完成，共 {} 组数字", groups.len());
        groups
    }

    /// 解析完整报文
    pub fn parse_message(&self, lines: &[String]) -> MessageContent {
        let mut content = MessageContent {
            raw_text: lines.join("\n"),
            ..Default::default()
        };

        let (header, body_start) = self.parse_header(lines);
        content.header = header;
        content.groups = self.parse_body(lines, body_start);

        content
    }
}

/// 参照报文解析器（严格格式）
///
/// 面向标准格式：每行固定组数、每组固定位数，
/// 组坐标统一由 `global_index` 取模计算而非运行计数器。
pub struct ReferenceParser {
    digits_per_group: usize,
    groups_per_line: usize,
    lines_per_segment: usize,
}

impl ReferenceParser {
    /// 创建新的参照解析器
    pub fn new(config: &Config) -> Self {
        Self {
            digits_per_group: config.digits_per_group,
            groups_per_line: config.groups_per_line,
            lines_per_segment: config.lines_per_segment,
        }
    }

    /// 解析标准参照文本
    ///
    /// 头部检测：前 5 行中数字字符不足 30 个的行归入头部，
    /// 首个数字密集行即主体起始行。主体只保留完整的数字组。
    pub fn parse_text(&self, raw_text: &str) -> MessageContent {
        let mut content = MessageContent {
            raw_text: raw_text.to_string(),
            ..Default::default()
        };

        let lines: Vec<&str> = raw_text.trim().split('\n').collect();

        // 解析头部
        let mut header = MessageHeader::default();
        let mut body_start = 0;

        for (i, line) in lines.iter().take(5).enumerate() {
            let digit_count = line.chars().filter(|c| c.is_ascii_digit()).count();
            if digit_count >= REFERENCE_DATA_DIGIT_THRESHOLD {
                body_start = i;
                break;
            }
            header.raw_lines.push(line.to_string());

            if line.contains('组') {
                if let Some(count) = extract_group_count(line) {
                    header.group_count = Some(count);
                }
            }
        }

        content.header = header;

        // 解析主体
        let mut groups = Vec::new();
        let mut global_idx = 0;
        let line_capacity = self.groups_per_line * self.lines_per_segment;

        for raw in lines.iter().skip(body_start) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let all_digits: Vec<char> = line.chars().filter(|c| c.is_ascii_digit()).collect();

            for chunk in all_digits.chunks(self.digits_per_group) {
                if chunk.len() < self.digits_per_group {
                    break;
                }
                groups.push(MessageGroup {
                    segment: global_idx / line_capacity + 1,
                    line: (global_idx / self.groups_per_line) % self.lines_per_segment + 1,
                    position: global_idx % self.groups_per_line + 1,
                    value: chunk.iter().collect(),
                    global_index: global_idx,
                });
                global_idx += 1;
            }
        }

        content.groups = groups;
        info!("TXT解析完成，共 {} 组数字", content.groups.len());

        content
    }
}
