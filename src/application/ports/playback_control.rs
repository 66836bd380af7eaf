//! Playback Control Port - 播放控制抽象
//!
//! 命令处理器通过该端口把操作投递给播放调度任务，
//! 由调度任务串行执行，具体实现在 infrastructure/worker 层

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::document::{DocumentId, Transcript};
use crate::domain::playback::{PlaybackError, PlaybackSnapshot, VoiceDescriptor, VoiceParams};

/// 播放控制错误
#[derive(Debug, Error)]
pub enum PlaybackControlError {
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Playback worker is not running")]
    WorkerStopped,
}

/// Playback Control Port
#[async_trait]
pub trait PlaybackControlPort: Send + Sync {
    /// 开始朗读（任意状态下都会重启）
    async fn start(
        &self,
        transcript: Arc<Transcript>,
        voice: VoiceParams,
    ) -> Result<PlaybackSnapshot, PlaybackControlError>;

    async fn pause(&self) -> Result<PlaybackSnapshot, PlaybackControlError>;

    async fn resume(&self) -> Result<PlaybackSnapshot, PlaybackControlError>;

    async fn stop(&self) -> Result<PlaybackSnapshot, PlaybackControlError>;

    /// 当前文档已替换为 `current`：停止其它文档的朗读，
    /// 与 start 在同一队列里串行判定
    async fn stop_superseded(
        &self,
        current: DocumentId,
    ) -> Result<PlaybackSnapshot, PlaybackControlError>;

    async fn snapshot(&self) -> Result<PlaybackSnapshot, PlaybackControlError>;

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, PlaybackControlError>;
}
