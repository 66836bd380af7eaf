//! Telltale - 文档朗读服务
//!
//! - Domain: document/, playback/ (Bounded Contexts) + 分句 / 边界映射
//! - Application: commands, queries, ports, ingestor, playback_controller
//! - Infrastructure: http, memory, worker, adapters, events

use std::sync::Arc;
use std::time::Duration;

use telltale::application::ports::speech_event_channel;
use telltale::application::{DocumentIngestor, PlaybackController};
use telltale::config::{load_config, print_config, AppConfig};
use telltale::infrastructure::adapters::{build_pdf_extractor, probe_speech_capability};
use telltale::infrastructure::events::EventPublisher;
use telltale::infrastructure::http::{AppState, HttpServer};
use telltale::infrastructure::memory::InMemoryDocumentStore;
use telltale::infrastructure::worker::PlaybackWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Telltale - 文档朗读服务");
    print_config(&config);

    // 创建事件发布器
    let event_publisher = Arc::new(EventPublisher::new());

    // 探测朗读能力（只在启动时执行一次）
    let (speech_tx, speech_rx) = speech_event_channel();
    let probe = probe_speech_capability(&config.speech, speech_tx);

    // 创建播放调度任务
    let controller = PlaybackController::new(probe.capability.clone(), event_publisher.clone());
    let (worker, playback) = PlaybackWorker::new(controller, speech_rx);
    let worker_task = tokio::spawn(worker.run());

    // 文档导入
    let pdf_extractor = build_pdf_extractor(config.pdf.library_path.clone());
    let ingestor = Arc::new(DocumentIngestor::new(
        pdf_extractor,
        config.ingest.pdf_line_threshold,
    ));

    let max_upload_size = usize::try_from(config.ingest.max_upload_size)
        .map_err(|_| anyhow::anyhow!("ingest.max_upload_size does not fit in memory"))?;

    let state = AppState::new(
        ingestor,
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(playback),
        event_publisher,
        probe.remote,
        config.speech.default_voice_params(),
        max_upload_size,
    );

    let server = HttpServer::new(config.server.addr(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 所有句柄释放后调度任务会停止朗读并退出
    if tokio::time::timeout(Duration::from_secs(5), worker_task)
        .await
        .is_err()
    {
        tracing::warn!("PlaybackWorker did not stop in time");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先于配置）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},telltale={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
