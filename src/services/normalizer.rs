//! 值标准化模块
//!
//! 将数字组的原始字符串映射为可比较的规范形式，
//! 吸收 OCR 常见的形近字符识别误差。

use phf::phf_map;

/// OCR 形近字符修正表
///
/// 封闭集合，区分大小写，只向数字映射。比对语义依赖该表逐项保持不变。
static OCR_CORRECTIONS: phf::Map<char, char> = phf_map! {
    'O' => '0', // 字母O -> 数字0
    'o' => '0',
    'l' => '1', // 小写L -> 数字1
    'I' => '1', // 大写I -> 数字1
    'Z' => '2', // 有时Z被误认为2
    'S' => '5', // S -> 5
    's' => '5',
    'B' => '8', // B -> 8
    'G' => '6', // G -> 6
    'g' => '9', // g -> 9
    'q' => '9', // q -> 9
};

/// 标准化值以进行比较
///
/// 步骤：去除首尾空白 → 去除内部空格 → 逐字符套用修正表，
/// 表中没有的字符原样保留。该操作是幂等的。
pub fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| OCR_CORRECTIONS.get(&c).copied().unwrap_or(c))
        .collect()
}
