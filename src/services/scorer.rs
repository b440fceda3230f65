//! 评分模块
//!
//! 将错误列表折算为有界分数、成绩等级与反馈文案。

use crate::config::Config;
use crate::models::{ErrorDetail, ErrorKind, Grade};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 按错误类型统计的数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub mismatch: usize,
    pub missing: usize,
    pub extra: usize,
}

/// 按错误类型统计的扣分
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KindDeductions {
    pub mismatch: f64,
    pub missing: f64,
    pub extra: f64,
}

/// 分类评分详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub error_counts: KindCounts,
    pub deductions: KindDeductions,
    pub total_deduction: f64,
    pub final_score: f64,
}

/// 评分器
#[derive(Debug, Clone)]
pub struct Scorer {
    /// 总分
    total_score: f64,
    /// 每个错误扣分
    deduct_per_error: f64,
    /// 各类错误的扣分权重（乘在每错误扣分上）
    mismatch_weight: f64,
    missing_weight: f64,
    extra_weight: f64,
}

impl Scorer {
    /// 按配置创建评分器
    pub fn new(config: &Config) -> Self {
        Self::with_policy(config.total_score, config.deduct_per_error)
    }

    /// 指定总分与单错扣分创建评分器
    ///
    /// 基线配置下多余内容按半个错误扣分。
    pub fn with_policy(total_score: f64, deduct_per_error: f64) -> Self {
        Self {
            total_score,
            deduct_per_error,
            mismatch_weight: 1.0,
            missing_weight: 1.0,
            extra_weight: 0.5,
        }
    }

    /// 自定义各类错误的扣分权重
    pub fn with_kind_weights(mut self, mismatch: f64, missing: f64, extra: f64) -> Self {
        self.mismatch_weight = mismatch;
        self.missing_weight = missing;
        self.extra_weight = extra;
        self
    }

    /// 计算得分（基础策略）
    ///
    /// `score = max(0, 总分 - 错误数 × 每错扣分)`，分数不会为负。
    pub fn calculate_score(&self, errors: &[ErrorDetail]) -> f64 {
        let error_count = errors.len();
        let deduction = error_count as f64 * self.deduct_per_error;
        let score = (self.total_score - deduction).max(0.0);

        info!(
            "评分计算: 总分 {}, 错误数 {}, 扣分 {}, 最终得分 {}",
            self.total_score, error_count, deduction, score
        );

        score
    }

    /// 按错误类型计算得分详情
    pub fn calculate_score_by_type(&self, errors: &[ErrorDetail]) -> ScoreBreakdown {
        let mut counts = KindCounts::default();
        for error in errors {
            match error.error_type {
                ErrorKind::Mismatch => counts.mismatch += 1,
                ErrorKind::Missing => counts.missing += 1,
                ErrorKind::Extra => counts.extra += 1,
            }
        }

        let deductions = KindDeductions {
            mismatch: counts.mismatch as f64 * self.deduct_per_error * self.mismatch_weight,
            missing: counts.missing as f64 * self.deduct_per_error * self.missing_weight,
            extra: counts.extra as f64 * self.deduct_per_error * self.extra_weight,
        };

        let total_deduction = deductions.mismatch + deductions.missing + deductions.extra;
        let final_score = (self.total_score - total_deduction).max(0.0);

        ScoreBreakdown {
            total_score: self.total_score,
            error_counts: counts,
            deductions,
            total_deduction,
            final_score,
        }
    }

    /// 生成评价反馈
    ///
    /// 零错误时固定返回"完美"文案，否则按等级套用模板并附错误数。
    pub fn get_feedback(&self, score: f64, error_count: usize) -> String {
        if error_count == 0 {
            return "完美！零错误，报文抄写完全正确！".to_string();
        }

        let base_feedback = match Grade::from_score(score) {
            Grade::A => "优秀！报文抄写准确度很高，继续保持！",
            Grade::B => "良好！报文抄写基本准确，注意细节即可达到优秀。",
            Grade::C => "中等。报文抄写有一定错误，请仔细核对后重新练习。",
            Grade::D => "及格。报文抄写存在较多错误，建议加强练习。",
            Grade::F => "不及格。报文抄写错误过多，请认真复习后重做。",
        };

        format!("{}（共发现 {} 处错误）", base_feedback, error_count)
    }
}
