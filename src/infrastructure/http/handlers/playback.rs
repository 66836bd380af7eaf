//! Playback HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    GetPlaybackStatus, PausePlayback, ResumePlayback, StartPlayback, StopPlayback,
};
use crate::domain::playback::PlaybackSnapshot;
use crate::infrastructure::http::dto::{ApiResponse, StartPlaybackRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 开始朗读当前文档（请求体可省略）
pub async fn start_playback(
    State(state): State<Arc<AppState>>,
    req: Option<Json<StartPlaybackRequest>>,
) -> Result<Json<ApiResponse<PlaybackSnapshot>>, ApiError> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let snapshot = state
        .start_playback_handler
        .handle(StartPlayback {
            voice_ref: req.voice_ref,
            rate: req.rate,
            pitch: req.pitch,
        })
        .await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

pub async fn pause_playback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackSnapshot>>, ApiError> {
    let snapshot = state.pause_playback_handler.handle(PausePlayback).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

pub async fn resume_playback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackSnapshot>>, ApiError> {
    let snapshot = state.resume_playback_handler.handle(ResumePlayback).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

pub async fn stop_playback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackSnapshot>>, ApiError> {
    let snapshot = state.stop_playback_handler.handle(StopPlayback).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// 查询播放状态
pub async fn playback_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackSnapshot>>, ApiError> {
    let snapshot = state
        .get_playback_status_handler
        .handle(GetPlaybackStatus)
        .await?;
    Ok(Json(ApiResponse::success(snapshot)))
}
