//! 报文比对模块
//!
//! 按 `global_index` 对齐提交报文与参照报文，并对每处分歧分类。
//! 比对是纯函数：无 I/O、无共享状态，可对独立的报文对并发调用。

use crate::models::{
    ErrorDetail, ErrorKind, MessageContent, MessageGroup, EXTRA_MARKER, MISSING_MARKER,
};
use crate::services::normalizer::normalize;
use std::collections::HashMap;
use tracing::{debug, info};

/// 报文比对器
#[derive(Debug, Default)]
pub struct MessageComparator;

impl MessageComparator {
    /// 创建新的比对器
    pub fn new() -> Self {
        Self
    }

    /// 比对提交内容与参照标准
    ///
    /// 值比较在标准化形式上进行：原始值不同但标准化后相等不算错误。
    /// 返回 (错误列表, 总组数, 错误数)，错误列表按全局索引升序排列。
    pub fn compare(
        &self,
        submitted: &MessageContent,
        reference: &MessageContent,
    ) -> (Vec<ErrorDetail>, usize, usize) {
        self.compare_impl(submitted, reference, true)
    }

    /// 精确比对：完全跳过标准化，按原始字符串比较
    pub fn compare_exact(
        &self,
        submitted: &MessageContent,
        reference: &MessageContent,
    ) -> (Vec<ErrorDetail>, usize, usize) {
        self.compare_impl(submitted, reference, false)
    }

    /// 带容错的比对（默认模式）
    ///
    /// `allow_ocr_correction` 为真时先对提交值做 OCR 修正、
    /// 再执行标准化比对；为假时退化为精确比对。
    pub fn compare_with_tolerance(
        &self,
        submitted: &MessageContent,
        reference: &MessageContent,
        allow_ocr_correction: bool,
    ) -> (Vec<ErrorDetail>, usize, usize) {
        if !allow_ocr_correction {
            return self.compare_exact(submitted, reference);
        }

        // 先生成修正后的提交报文，再走同一套比对
        let corrected_groups: Vec<MessageGroup> = submitted
            .groups
            .iter()
            .map(|group| MessageGroup {
                segment: group.segment,
                line: group.line,
                position: group.position,
                value: normalize(&group.value),
                global_index: group.global_index,
            })
            .collect();

        let corrected_submitted = MessageContent {
            header: submitted.header.clone(),
            groups: corrected_groups,
            raw_text: submitted.raw_text.clone(),
        };

        self.compare(&corrected_submitted, reference)
    }

    fn compare_impl(
        &self,
        submitted: &MessageContent,
        reference: &MessageContent,
        normalized: bool,
    ) -> (Vec<ErrorDetail>, usize, usize) {
        let mut errors = Vec::new();
        let total_groups = reference.groups.len();

        // 以全局索引为键建立双方索引映射
        let ref_map: HashMap<usize, &MessageGroup> =
            reference.groups.iter().map(|g| (g.global_index, g)).collect();
        let sub_map: HashMap<usize, &MessageGroup> =
            submitted.groups.iter().map(|g| (g.global_index, g)).collect();

        let values_differ = |a: &str, b: &str| {
            if normalized {
                normalize(a) != normalize(b)
            } else {
                a != b
            }
        };

        // 遍历参照内容进行比对
        for idx in 0..total_groups {
            let Some(ref_group) = ref_map.get(&idx) else {
                // 参照自身存在索引空洞时跳过该位置
                continue;
            };

            match sub_map.get(&idx) {
                None => {
                    // 提交内容缺失
                    errors.push(ErrorDetail {
                        segment: ref_group.segment,
                        line: ref_group.line,
                        position: ref_group.position,
                        global_index: ref_group.global_index,
                        submitted_value: MISSING_MARKER.to_string(),
                        correct_value: ref_group.value.clone(),
                        error_type: ErrorKind::Missing,
                    });
                    debug!(
                        "缺失: 位置 {}-{}-{}",
                        ref_group.segment, ref_group.line, ref_group.position
                    );
                }
                Some(sub_group) if values_differ(&sub_group.value, &ref_group.value) => {
                    // 内容不匹配，原始值照录
                    errors.push(ErrorDetail {
                        segment: ref_group.segment,
                        line: ref_group.line,
                        position: ref_group.position,
                        global_index: ref_group.global_index,
                        submitted_value: sub_group.value.clone(),
                        correct_value: ref_group.value.clone(),
                        error_type: ErrorKind::Mismatch,
                    });
                    debug!(
                        "错误: 位置 {}-{}-{}, 提交:{}, 正确:{}",
                        ref_group.segment,
                        ref_group.line,
                        ref_group.position,
                        sub_group.value,
                        ref_group.value
                    );
                }
                Some(_) => {}
            }
        }

        // 检查多余内容
        for (idx, sub_group) in &sub_map {
            if *idx >= total_groups {
                errors.push(ErrorDetail {
                    segment: sub_group.segment,
                    line: sub_group.line,
                    position: sub_group.position,
                    global_index: sub_group.global_index,
                    submitted_value: sub_group.value.clone(),
                    correct_value: EXTRA_MARKER.to_string(),
                    error_type: ErrorKind::Extra,
                });
            }
        }

        // 三类错误分三轮发现，统一按全局索引排序
        errors.sort_by_key(|e| e.global_index);

        let error_count = errors.len();
        info!("比对完成: 总组数 {}, 错误数 {}", total_groups, error_count);

        (errors, total_groups, error_count)
    }
}
