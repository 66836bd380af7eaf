//! Playback Context - Aggregate Root

use super::{PlaybackError, PlaybackSnapshot, PlaybackState, UtteranceId, VoiceParams};

/// 播放会话聚合根
///
/// 不变量:
/// - `sentence_index` 仅在 `Speaking` 时非空
/// - `active_utterance` 只有最近一次 `begin` 分配的标识，停止/结束后清空
/// - 标识单调递增，从不复用
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
    active_utterance: Option<UtteranceId>,
    last_issued: u64,
    sentence_index: Option<usize>,
    /// 暂停时保留的句子索引，恢复时还原
    held_sentence: Option<usize>,
    voice_params: VoiceParams,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新的朗读，任意状态下都可调用（重启总是优先）
    pub fn begin(&mut self, voice_params: VoiceParams) -> UtteranceId {
        self.last_issued += 1;
        let id = UtteranceId::new(self.last_issued);

        self.state = PlaybackState::Speaking;
        self.active_utterance = Some(id);
        self.sentence_index = None;
        self.held_sentence = None;
        self.voice_params = voice_params;
        id
    }

    /// Speaking -> Paused
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.expect_state("pause", PlaybackState::Speaking)?;
        self.state = PlaybackState::Paused;
        self.held_sentence = self.sentence_index.take();
        Ok(())
    }

    /// Paused -> Speaking，返回恢复的句子索引
    pub fn resume(&mut self) -> Result<Option<usize>, PlaybackError> {
        self.expect_state("resume", PlaybackState::Paused)?;
        self.state = PlaybackState::Speaking;
        self.sentence_index = self.held_sentence.take();
        Ok(self.sentence_index)
    }

    /// Speaking/Paused -> Idle，同时作废当前朗读标识
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Idle {
            return Err(PlaybackError::InvalidStateTransition {
                operation: "stop",
                state: self.state,
            });
        }
        self.reset_to_idle();
        Ok(())
    }

    /// 应用边界事件，返回句子索引是否发生变化
    ///
    /// `sentence_index` 为 `None`（偏移越界）时保持原索引不变
    pub fn on_boundary(
        &mut self,
        utterance_id: UtteranceId,
        sentence_index: Option<usize>,
    ) -> Result<bool, PlaybackError> {
        self.expect_current(utterance_id)?;
        self.expect_state("boundary", PlaybackState::Speaking)?;

        match sentence_index {
            Some(index) if self.sentence_index != Some(index) => {
                self.sentence_index = Some(index);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// 朗读结束或出错：回到 Idle
    pub fn finish(&mut self, utterance_id: UtteranceId) -> Result<(), PlaybackError> {
        self.expect_current(utterance_id)?;
        self.reset_to_idle();
        Ok(())
    }

    pub fn is_current(&self, utterance_id: UtteranceId) -> bool {
        self.active_utterance == Some(utterance_id)
    }

    // Getters
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn active_utterance(&self) -> Option<UtteranceId> {
        self.active_utterance
    }

    pub fn sentence_index(&self) -> Option<usize> {
        self.sentence_index
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            utterance_id: self.active_utterance,
            sentence_index: self.sentence_index,
            voice_params: self.voice_params.clone(),
        }
    }

    fn reset_to_idle(&mut self) {
        self.state = PlaybackState::Idle;
        self.active_utterance = None;
        self.sentence_index = None;
        self.held_sentence = None;
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: PlaybackState,
    ) -> Result<(), PlaybackError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(PlaybackError::InvalidStateTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn expect_current(&self, utterance_id: UtteranceId) -> Result<(), PlaybackError> {
        if self.is_current(utterance_id) {
            Ok(())
        } else {
            Err(PlaybackError::StaleUtterance(utterance_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let session = PlaybackSession::new();
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(session.active_utterance().is_none());
        assert!(session.sentence_index().is_none());
    }

    #[test]
    fn test_begin_allocates_increasing_ids() {
        let mut session = PlaybackSession::new();
        let first = session.begin(VoiceParams::default());
        let second = session.begin(VoiceParams::default());

        assert!(second > first);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
        assert_eq!(session.state(), PlaybackState::Speaking);
    }

    #[test]
    fn test_pause_resume_keeps_sentence() {
        let mut session = PlaybackSession::new();
        let id = session.begin(VoiceParams::default());
        assert!(session.on_boundary(id, Some(3)).unwrap());

        session.pause().unwrap();
        assert_eq!(session.state(), PlaybackState::Paused);
        assert!(session.sentence_index().is_none());

        assert_eq!(session.resume().unwrap(), Some(3));
        assert_eq!(session.sentence_index(), Some(3));
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut session = PlaybackSession::new();
        assert!(matches!(
            session.pause(),
            Err(PlaybackError::InvalidStateTransition { operation: "pause", .. })
        ));
        assert!(session.resume().is_err());
        assert!(session.stop().is_err());

        session.begin(VoiceParams::default());
        assert!(session.resume().is_err());
        session.pause().unwrap();
        assert!(session.pause().is_err());
    }

    #[test]
    fn test_stop_retires_utterance() {
        let mut session = PlaybackSession::new();
        let id = session.begin(VoiceParams::default());
        session.stop().unwrap();

        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.finish(id), Err(PlaybackError::StaleUtterance(id)));
    }

    #[test]
    fn test_boundary_ignored_while_paused() {
        let mut session = PlaybackSession::new();
        let id = session.begin(VoiceParams::default());
        session.pause().unwrap();

        assert!(session.on_boundary(id, Some(1)).is_err());
        assert!(session.sentence_index().is_none());
    }

    #[test]
    fn test_boundary_not_found_keeps_index() {
        let mut session = PlaybackSession::new();
        let id = session.begin(VoiceParams::default());
        session.on_boundary(id, Some(2)).unwrap();

        assert!(!session.on_boundary(id, None).unwrap());
        assert!(!session.on_boundary(id, Some(2)).unwrap());
        assert_eq!(session.sentence_index(), Some(2));
    }

    #[test]
    fn test_finish_from_paused() {
        let mut session = PlaybackSession::new();
        let id = session.begin(VoiceParams::default());
        session.pause().unwrap();
        session.finish(id).unwrap();

        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(session.resume().is_err());
    }
}
