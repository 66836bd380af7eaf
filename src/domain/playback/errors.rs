//! Playback Context - Errors

use thiserror::Error;

use super::{PlaybackState, UtteranceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// 语音能力不可用（启动探测未发现引擎）
    #[error("语音朗读不可用")]
    OperationUnavailable,

    /// 当前状态不允许该操作（对 pause/resume/stop 视为静默 no-op）
    #[error("状态 {state} 下不能执行 {operation}")]
    InvalidStateTransition {
        operation: &'static str,
        state: PlaybackState,
    },

    /// 来自已取消朗读的过期回调
    #[error("过期的朗读回调: {0}")]
    StaleUtterance(UtteranceId),
}
