//! 端到端批阅流程测试
//!
//! 以 300 组标准报文为基准，覆盖 错写 / 漏抄 / 多抄 / 满分 / 失败兜底 场景。

use message_review::{
    AppError, AppResult, Config, ErrorKind, MessageComparator, MessageContent, MessageGroup,
    PlainTextRecognizer, RecognitionEngine, ReferenceParser, ReviewService, ReviewStatus,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// 返回固定行序列的识别桩，替代真实 OCR 引擎
struct StubRecognizer {
    lines: Vec<String>,
}

impl RecognitionEngine for StubRecognizer {
    fn recognize(&self, _path: &Path) -> AppResult<Vec<String>> {
        Ok(self.lines.clone())
    }
}

/// 第 i 组的标准值（索引 47 固定为 7890，对应错写场景）
fn ref_value(i: usize) -> String {
    if i == 47 {
        "7890".to_string()
    } else {
        format!("{:04}", i)
    }
}

/// 生成 300 组标准报文的 30 行文本
fn reference_lines() -> Vec<String> {
    (0..30)
        .map(|row| {
            (0..10)
                .map(|col| ref_value(row * 10 + col))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn write_reference_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("创建临时参照文件失败");
    write!(file, "{}", reference_lines().join("\n")).unwrap();
    file
}

fn make_service(lines: Vec<String>) -> ReviewService {
    ReviewService::new(&Config::default(), Arc::new(StubRecognizer { lines }))
}

#[tokio::test]
async fn test_review_perfect_copy() {
    let reference = write_reference_file();
    let service = make_service(reference_lines());

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    assert_eq!(result.status, ReviewStatus::Completed);
    assert_eq!(result.total_groups, 300);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.score, 100.0);
    assert!(result.errors.is_empty());
    assert_eq!(result.message, "完美！零错误，报文抄写完全正确！");
}

#[tokio::test]
async fn test_review_single_mismatch_at_index_47() {
    let reference = write_reference_file();

    // 仅索引 47 处把 7890 错写为 7891
    let mut lines = reference_lines();
    lines[4] = lines[4].replace("7890", "7891");
    let service = make_service(lines);

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    assert_eq!(result.error_count, 1);
    assert_eq!(result.score, 99.0);

    let error = &result.errors[0];
    assert_eq!(error.error_type, ErrorKind::Mismatch);
    assert_eq!(error.global_index, 47);
    assert_eq!(error.submitted_value, "7891");
    assert_eq!(error.correct_value, "7890");
    // 坐标为展示元数据：第 1 段第 5 行第 8 组
    assert_eq!((error.segment, error.line, error.position), (1, 5, 8));
}

#[tokio::test]
async fn test_review_missing_last_group() {
    let reference = write_reference_file();

    // 末行只抄了 9 组，索引 299 缺失
    let mut lines = reference_lines();
    let truncated = lines[29]
        .rsplit_once(' ')
        .map(|(head, _)| head.to_string())
        .expect("末行应含空格");
    lines[29] = truncated;
    let service = make_service(lines);

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    assert_eq!(result.error_count, 1);
    let error = &result.errors[0];
    assert_eq!(error.error_type, ErrorKind::Missing);
    assert_eq!(error.global_index, 299);
    assert_eq!(error.submitted_value, "(缺失)");
    assert_eq!(error.correct_value, ref_value(299));
}

#[tokio::test]
async fn test_review_extra_groups_beyond_reference() {
    let reference = write_reference_file();

    // 多抄了一行 3 组：索引 300-302 为多余内容
    let mut lines = reference_lines();
    lines.push("1111 2222 3333".to_string());
    let service = make_service(lines);

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    assert_eq!(result.total_groups, 300);
    assert_eq!(result.error_count, 3);
    for (offset, error) in result.errors.iter().enumerate() {
        assert_eq!(error.error_type, ErrorKind::Extra);
        assert_eq!(error.global_index, 300 + offset);
        assert_eq!(error.correct_value, "(多余)");
    }
    assert_eq!(result.score, 97.0);
}

#[tokio::test]
async fn test_review_header_metadata_extracted() {
    let reference = write_reference_file();

    let mut lines = vec!["报文练习 共 300 组".to_string(), "时间 2024-03-08".to_string()];
    lines.extend(reference_lines());
    let service = make_service(lines);

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    // 头部只作展示，不影响评分
    assert_eq!(result.header_info.group_count.as_deref(), Some("300"));
    assert_eq!(result.header_info.timestamp.as_deref(), Some("2024-03-08"));
    assert_eq!(result.error_count, 0);
    assert_eq!(result.score, 100.0);
}

#[tokio::test]
async fn test_review_failed_when_reference_unreadable() {
    let service = make_service(reference_lines());

    let result = service
        .review(
            Path::new("copy.pdf"),
            Path::new("/nonexistent/reference.txt"),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    // 协作方失败：记录 failed 结果，绝不落下半截错误列表
    assert_eq!(result.status, ReviewStatus::Failed);
    assert_eq!(result.total_groups, 0);
    assert_eq!(result.score, 0.0);
    assert!(result.errors.is_empty());
    assert!(result.message.contains("批阅失败"));
}

#[tokio::test]
async fn test_report_generation_end_to_end() {
    let reference = write_reference_file();
    let mut lines = reference_lines();
    lines[4] = lines[4].replace("7890", "7891");
    let service = make_service(lines);

    let result = service
        .review(
            Path::new("copy.pdf"),
            reference.path(),
            "copy.pdf",
            "reference.txt",
        )
        .await;

    // 文本报告
    let (text, mime) = service
        .generate_report(&result.id, "text")
        .expect("生成文本报告失败");
    assert_eq!(mime, "text/plain");
    assert!(text.contains("得  分: 99.0 分"));
    assert!(text.contains("7891"));

    // JSON 报告
    let (json, mime) = service
        .generate_report(&result.id, "json")
        .expect("生成JSON报告失败");
    assert_eq!(mime, "application/json");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["errors"][0]["global_index"], 47);

    // 不支持的格式必须显式报错
    let err = service.generate_report(&result.id, "xml").unwrap_err();
    assert!(matches!(err, AppError::Report(_)));
}

#[tokio::test]
async fn test_concurrent_reviews_share_store() {
    let reference = Arc::new(write_reference_file());
    let service = Arc::new(make_service(reference_lines()));

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = service.clone();
        let reference = reference.clone();
        handles.push(tokio::spawn(async move {
            service
                .review(
                    Path::new("copy.pdf"),
                    reference.path(),
                    &format!("copy-{}.pdf", i),
                    "reference.txt",
                )
                .await
        }));
    }

    for handle in handles {
        let result = handle.await.expect("并发批阅任务不应崩溃");
        assert_eq!(result.status, ReviewStatus::Completed);
    }
    assert_eq!(service.list_results().len(), 4);
}

#[tokio::test]
async fn test_plain_text_recognizer_pipeline() {
    // 不用桩：提交文件走真实的纯文本识别器
    let reference = write_reference_file();
    let mut submission = tempfile::NamedTempFile::new().expect("创建临时提交文件失败");
    write!(submission, "{}", reference_lines().join("\n")).unwrap();

    let service = ReviewService::new(&Config::default(), Arc::new(PlainTextRecognizer::new()));
    let result = service
        .review(submission.path(), reference.path(), "", "")
        .await;

    assert_eq!(result.status, ReviewStatus::Completed);
    assert_eq!(result.score, 100.0);
}

// ========== 网格级场景（直接构造报文内容） ==========

fn grid_of(values: &[&str]) -> MessageContent {
    MessageContent {
        groups: values
            .iter()
            .enumerate()
            .map(|(i, v)| MessageGroup {
                segment: i / 100 + 1,
                line: (i / 10) % 10 + 1,
                position: i % 10 + 1,
                value: v.to_string(),
                global_index: i,
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_tolerant_vs_exact_comparison_of_confusable_glyphs() {
    let comparator = MessageComparator::new();
    let submitted = grid_of(&["O123"]);
    let reference = grid_of(&["0123"]);

    // 容错比对：字母O修正为数字0，无错误
    let (_, _, tolerant) = comparator.compare_with_tolerance(&submitted, &reference, true);
    assert_eq!(tolerant, 0);

    // 精确比对：按原始字符串比较，记为内容错误
    let (errors, _, exact) = comparator.compare_with_tolerance(&submitted, &reference, false);
    assert_eq!(exact, 1);
    assert_eq!(errors[0].error_type, ErrorKind::Mismatch);
}

#[test]
fn test_diff_completeness_against_parsed_reference() {
    // 参照解析 + 比对联动：缺失与错写数量满足完备性
    let config = Config::default();
    let parser = ReferenceParser::new(&config);
    let reference = parser.parse_text(&reference_lines().join("\n"));
    assert_eq!(reference.groups.len(), 300);

    let mut submitted = reference.clone();
    submitted.groups.truncate(298); // 缺 298、299
    submitted.groups[5].value = "9999".to_string(); // 错 1 处

    let comparator = MessageComparator::new();
    let (errors, total, error_count) = comparator.compare(&submitted, &reference);
    assert_eq!(total, 300);
    assert_eq!(error_count, 3);
    assert_eq!(
        errors.iter().filter(|e| e.error_type == ErrorKind::Missing).count(),
        2
    );
    assert_eq!(
        errors.iter().filter(|e| e.error_type == ErrorKind::Mismatch).count(),
        1
    );
}
