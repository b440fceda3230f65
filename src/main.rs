use anyhow::Result;
use message_review::{logger, Config, PlainTextRecognizer, ReviewService};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置：优先 REVIEW_CONFIG 指定的 TOML 文件，否则读环境变量
    let config = match std::env::var("REVIEW_CONFIG") {
        Ok(path) => Config::from_toml_file(&path)?,
        Err(_) => Config::from_env(),
    };

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        anyhow::bail!("用法: message_review <提交文本文件> <参照文件>");
    }

    let submission_path = Path::new(&args[1]);
    let reference_path = Path::new(&args[2]);

    // 构建批阅服务（纯文本识别器，识别引擎可替换）
    let service = ReviewService::new(&config, Arc::new(PlainTextRecognizer::new()));

    // 执行批阅
    let result = service.review(submission_path, reference_path, "", "").await;

    info!(
        "批阅 {} 完成: 得分 {:.1}, 错误 {} 处",
        result.id, result.score, result.error_count
    );

    // 输出文本报告
    let (report, _) = service.generate_report(&result.id, "text")?;
    println!("{}", report);

    Ok(())
}
