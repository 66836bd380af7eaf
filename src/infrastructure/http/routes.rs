//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                 GET   健康检查
//! - /api/document/upload      POST  上传文档（multipart）
//! - /api/document/text        POST  直接提交纯文本
//! - /api/document/get         GET   当前文档
//! - /api/document/sentences   POST  分页获取句子
//! - /api/playback/start       POST  开始朗读
//! - /api/playback/pause       POST  暂停
//! - /api/playback/resume      POST  恢复
//! - /api/playback/stop        POST  停止
//! - /api/playback/status      GET   播放状态
//! - /api/voice/list           GET   可用音色
//! - /ws/events                WS    播放事件
//! - /ws/speech                WS    远程朗读客户端

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
        .route("/ws/speech", get(handlers::speech_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/document", document_routes())
        .nest("/playback", playback_routes())
        .route("/voice/list", get(handlers::list_voices))
}

/// Document 路由
fn document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload_document))
        .route("/text", post(handlers::load_text))
        .route("/get", get(handlers::get_document))
        .route("/sentences", post(handlers::get_sentences))
}

/// Playback 路由
fn playback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_playback))
        .route("/pause", post(handlers::pause_playback))
        .route("/resume", post(handlers::resume_playback))
        .route("/stop", post(handlers::stop_playback))
        .route("/status", get(handlers::playback_status))
}
