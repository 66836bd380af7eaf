//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::PlaybackControlError;
use crate::domain::document::IngestError;
use crate::domain::playback::PlaybackError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 文档导入失败（同步返回给调用方）
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// 播放操作失败
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str) -> Self {
        Self::NotFound(resource_type)
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<PlaybackControlError> for ApplicationError {
    fn from(err: PlaybackControlError) -> Self {
        match err {
            PlaybackControlError::Playback(e) => Self::Playback(e),
            PlaybackControlError::WorkerStopped => Self::InternalError(err.to_string()),
        }
    }
}
