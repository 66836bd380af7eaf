//! Ping Handler
//!
//! 健康检查，附带朗读能力和文档加载状态

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub document_loaded: bool,
    pub speech_client_connected: Option<bool>,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PingResponse>> {
    Json(ApiResponse::success(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        document_loaded: state.document_store.current().is_some(),
        speech_client_connected: state.remote_speech.as_ref().map(|r| r.is_connected()),
    }))
}
