//! Playback Controller - 朗读状态机编排
//!
//! 持有播放会话，驱动语音能力，把引擎事件映射为句子索引并发布
//!
//! 所有方法都在调度任务上串行执行（见 infrastructure/worker），
//! 过期回调完全依靠朗读标识判定，不需要加锁

use std::sync::Arc;

use crate::application::ports::{
    PlaybackEvent, PlaybackEventSink, SpeechCapabilityPort, SpeechEvent, SpeechEventKind,
};
use crate::domain::document::{DocumentId, Transcript};
use crate::domain::playback::{
    PlaybackError, PlaybackSession, PlaybackSnapshot, VoiceDescriptor, VoiceParams,
};

/// 播放控制器
pub struct PlaybackController {
    /// 启动时探测得到的语音能力，`None` 表示不可用
    capability: Option<Arc<dyn SpeechCapabilityPort>>,
    events: Arc<dyn PlaybackEventSink>,
    session: PlaybackSession,
    /// 当前朗读所对应的文档（用于边界映射）
    transcript: Option<Arc<Transcript>>,
}

impl PlaybackController {
    pub fn new(
        capability: Option<Arc<dyn SpeechCapabilityPort>>,
        events: Arc<dyn PlaybackEventSink>,
    ) -> Self {
        Self {
            capability,
            events,
            session: PlaybackSession::new(),
            transcript: None,
        }
    }

    /// 语音能力是否可用
    pub fn is_available(&self) -> bool {
        self.capability.is_some()
    }

    /// 开始朗读
    ///
    /// 句子列表为空时不做任何事；否则无条件取消之前的朗读，分配新的朗读标识，
    /// 请求引擎朗读全文。引擎同步拒绝时回到 Idle 并通过错误通道发布，不向调用方返回错误
    pub fn start(
        &mut self,
        transcript: Arc<Transcript>,
        voice: VoiceParams,
    ) -> Result<(), PlaybackError> {
        if transcript.is_empty() {
            tracing::debug!(document_id = %transcript.id(), "Start ignored: no sentences");
            return Ok(());
        }

        let capability = self
            .capability
            .clone()
            .ok_or(PlaybackError::OperationUnavailable)?;

        let previous_index = self.session.sentence_index();

        // 引擎是进程级独占资源，必须先取消
        capability.cancel();

        let utterance_id = self.session.begin(voice.clone());
        self.transcript = Some(transcript.clone());

        tracing::info!(
            utterance_id = %utterance_id,
            document_id = %transcript.id(),
            sentences = transcript.sentence_count(),
            backend = capability.name(),
            "Playback started"
        );

        if let Err(e) = capability.speak(utterance_id, transcript.text().as_str(), &voice) {
            tracing::warn!(utterance_id = %utterance_id, error = %e, "Speak request rejected");
            // 新分配的标识一定是当前标识
            let _ = self.session.finish(utterance_id);
            self.events.publish(PlaybackEvent::PlaybackFailed {
                utterance_id,
                cause: e.to_string(),
            });
        }

        self.publish_transition(previous_index);
        Ok(())
    }

    /// Speaking -> Paused，其它状态下为 no-op
    pub fn pause(&mut self) {
        let previous_index = self.session.sentence_index();
        match self.session.pause() {
            Ok(()) => {
                if let Some(capability) = &self.capability {
                    capability.pause();
                }
                tracing::info!(utterance_id = ?self.session.active_utterance(), "Playback paused");
                self.publish_transition(previous_index);
            }
            Err(e) => tracing::debug!(reason = %e, "Pause ignored"),
        }
    }

    /// Paused -> Speaking，其它状态下为 no-op
    pub fn resume(&mut self) {
        let previous_index = self.session.sentence_index();
        match self.session.resume() {
            Ok(_) => {
                if let Some(capability) = &self.capability {
                    capability.resume();
                }
                tracing::info!(utterance_id = ?self.session.active_utterance(), "Playback resumed");
                self.publish_transition(previous_index);
            }
            Err(e) => tracing::debug!(reason = %e, "Resume ignored"),
        }
    }

    /// 停止朗读；已经是 Idle 时不向引擎发出任何请求
    pub fn stop(&mut self) {
        let previous_index = self.session.sentence_index();
        let utterance_id = self.session.active_utterance();
        match self.session.stop() {
            Ok(()) => {
                if let Some(capability) = &self.capability {
                    capability.cancel();
                }
                tracing::info!(utterance_id = ?utterance_id, "Playback stopped");
                self.publish_transition(previous_index);
            }
            Err(e) => tracing::debug!(reason = %e, "Stop ignored"),
        }
    }

    /// 文档被替换后停止旧文档的朗读；已经在朗读 `current` 时保持不变
    pub fn stop_superseded(&mut self, current: DocumentId) {
        if self.transcript.as_ref().map(|t| t.id()) == Some(current) {
            tracing::debug!(document_id = %current, "Playback already follows the current document");
            return;
        }
        self.stop();
    }

    /// 处理引擎回报的事件，过期事件直接丢弃
    pub fn handle_event(&mut self, event: SpeechEvent) {
        let utterance_id = event.utterance_id;

        match event.kind {
            SpeechEventKind::Start => {
                if self.session.is_current(utterance_id) {
                    tracing::debug!(utterance_id = %utterance_id, "Engine started speaking");
                }
            }
            SpeechEventKind::Boundary { name, char_index } => {
                let sentence_index = self
                    .transcript
                    .as_ref()
                    .and_then(|t| t.mapper().map(char_index));

                match self.session.on_boundary(utterance_id, sentence_index) {
                    Ok(true) => {
                        tracing::trace!(
                            utterance_id = %utterance_id,
                            boundary = ?name,
                            char_index = char_index,
                            sentence_index = ?sentence_index,
                            "Sentence changed"
                        );
                        self.events.publish(PlaybackEvent::SentenceChanged { sentence_index });
                    }
                    Ok(false) => {}
                    Err(e) => tracing::trace!(reason = %e, "Boundary ignored"),
                }
            }
            SpeechEventKind::End => {
                let previous_index = self.session.sentence_index();
                match self.session.finish(utterance_id) {
                    Ok(()) => {
                        tracing::info!(utterance_id = %utterance_id, "Playback finished");
                        self.publish_transition(previous_index);
                    }
                    Err(e) => tracing::debug!(reason = %e, "End ignored"),
                }
            }
            SpeechEventKind::Error { cause } => {
                let previous_index = self.session.sentence_index();
                match self.session.finish(utterance_id) {
                    Ok(()) => {
                        tracing::warn!(utterance_id = %utterance_id, cause = %cause, "Playback failed");
                        self.events.publish(PlaybackEvent::PlaybackFailed {
                            utterance_id,
                            cause,
                        });
                        self.publish_transition(previous_index);
                    }
                    Err(e) => tracing::debug!(reason = %e, "Error event ignored"),
                }
            }
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.session.snapshot()
    }

    /// 引擎音色列表，能力不可用时为空
    pub fn list_voices(&self) -> Vec<VoiceDescriptor> {
        self.capability
            .as_ref()
            .map(|c| c.list_voices())
            .unwrap_or_default()
    }

    /// 发布状态变更，以及句子索引的变化
    fn publish_transition(&self, previous_index: Option<usize>) {
        self.events.publish(PlaybackEvent::StateChanged {
            state: self.session.state(),
            utterance_id: self.session.active_utterance(),
        });

        let sentence_index = self.session.sentence_index();
        if sentence_index != previous_index {
            self.events.publish(PlaybackEvent::SentenceChanged { sentence_index });
        }
    }
}
