//! Speech Capability Port - 语音朗读能力抽象
//!
//! 控制器只依赖这组最小接口，任何实现它的后端都可以替换
//! 具体实现在 infrastructure/adapters 层
//!
//! 所有请求只负责入队，实际发音由引擎在系统之外完成，
//! 进度通过事件通道异步回报，事件携带发起请求时的朗读标识

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::playback::{UtteranceId, VoiceDescriptor, VoiceParams};

/// 语音引擎错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Engine error: {0}")]
    EngineError(String),
}

/// 边界粒度（由引擎决定，不保证支持句子级）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Word,
    Sentence,
    #[serde(other)]
    Other,
}

/// 引擎事件类型
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEventKind {
    Start,
    Boundary {
        name: BoundaryKind,
        /// 在朗读文本中的字符偏移（Unicode 标量值）
        char_index: i64,
    },
    End,
    Error {
        cause: String,
    },
}

/// 引擎回报的事件
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechEvent {
    pub utterance_id: UtteranceId,
    pub kind: SpeechEventKind,
}

impl SpeechEvent {
    pub fn new(utterance_id: UtteranceId, kind: SpeechEventKind) -> Self {
        Self { utterance_id, kind }
    }

    pub fn boundary(utterance_id: UtteranceId, name: BoundaryKind, char_index: i64) -> Self {
        Self::new(utterance_id, SpeechEventKind::Boundary { name, char_index })
    }

    pub fn error(utterance_id: UtteranceId, cause: impl Into<String>) -> Self {
        Self::new(
            utterance_id,
            SpeechEventKind::Error {
                cause: cause.into(),
            },
        )
    }
}

/// 事件通道发送端，构造后端时注入
pub type SpeechEventSender = mpsc::UnboundedSender<SpeechEvent>;

/// 事件通道接收端，由播放调度任务持有
pub type SpeechEventReceiver = mpsc::UnboundedReceiver<SpeechEvent>;

/// 创建事件通道
pub fn speech_event_channel() -> (SpeechEventSender, SpeechEventReceiver) {
    mpsc::unbounded_channel()
}

/// Speech Capability Port
///
/// 进程级独占资源：同一时刻只能有一个活跃朗读，
/// 调用方必须先 `cancel` 再发起新的 `speak`
pub trait SpeechCapabilityPort: Send + Sync {
    /// 朗读整段文本，事件以 `utterance_id` 标记
    fn speak(
        &self,
        utterance_id: UtteranceId,
        text: &str,
        voice: &VoiceParams,
    ) -> Result<(), SpeechError>;

    fn pause(&self);

    fn resume(&self);

    fn cancel(&self);

    fn is_speaking(&self) -> bool;

    fn is_paused(&self) -> bool;

    /// 引擎可用的音色列表（有序）
    fn list_voices(&self) -> Vec<VoiceDescriptor>;

    /// 后端名称（用于日志）
    fn name(&self) -> &'static str;
}
