//! Playback Event Port - 播放事件发布抽象
//!
//! 控制器通过该端口向订阅者推送状态、句子索引和错误，
//! 不依赖任何具体的界面或渲染机制

use serde::Serialize;

use crate::domain::document::{DocumentId, DocumentKind};
use crate::domain::playback::{PlaybackState, UtteranceId};

/// 播放事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum PlaybackEvent {
    /// 状态变更
    StateChanged {
        state: PlaybackState,
        #[serde(skip_serializing_if = "Option::is_none")]
        utterance_id: Option<UtteranceId>,
    },
    /// 当前朗读句子变更（None 表示清除高亮）
    SentenceChanged { sentence_index: Option<usize> },
    /// 朗读失败（错误通道）
    PlaybackFailed {
        utterance_id: UtteranceId,
        cause: String,
    },
    /// 新文档加载完成
    DocumentLoaded {
        document_id: DocumentId,
        kind: DocumentKind,
        total_chars: usize,
        total_sentences: usize,
    },
}

/// Playback Event Sink Port
pub trait PlaybackEventSink: Send + Sync {
    fn publish(&self, event: PlaybackEvent);
}
