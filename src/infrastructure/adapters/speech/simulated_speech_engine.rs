//! Simulated Speech Engine - 计时驱动的模拟朗读引擎
//!
//! 不产生声音，按语速逐词推进并回报 word 边界，
//! 用于开发调试和测试

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    BoundaryKind, SpeechCapabilityPort, SpeechError, SpeechEvent, SpeechEventKind,
    SpeechEventSender,
};
use crate::domain::playback::{UtteranceId, VoiceDescriptor, VoiceParams};

/// 模拟引擎配置
#[derive(Debug, Clone)]
pub struct SimulatedSpeechConfig {
    /// 基准语速（rate = 1.0 时）
    pub words_per_minute: u32,
    /// 对外公布的音色
    pub voices: Vec<VoiceDescriptor>,
}

impl Default for SimulatedSpeechConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 180,
            voices: vec![
                VoiceDescriptor {
                    id: "simulated-en".to_string(),
                    name: "Simulated English".to_string(),
                    lang: "en-US".to_string(),
                    is_default: true,
                },
                VoiceDescriptor {
                    id: "simulated-zh".to_string(),
                    name: "Simulated Chinese".to_string(),
                    lang: "zh-CN".to_string(),
                    is_default: false,
                },
            ],
        }
    }
}

/// 正在进行的模拟朗读
struct ActiveUtterance {
    utterance_id: UtteranceId,
    cancel: CancellationToken,
    paused: watch::Sender<bool>,
    finished: Arc<AtomicBool>,
}

/// 模拟朗读引擎
pub struct SimulatedSpeechEngine {
    config: SimulatedSpeechConfig,
    events: SpeechEventSender,
    active: Mutex<Option<ActiveUtterance>>,
}

impl SimulatedSpeechEngine {
    pub fn new(config: SimulatedSpeechConfig, events: SpeechEventSender) -> Self {
        tracing::info!(
            words_per_minute = config.words_per_minute,
            voices = config.voices.len(),
            "SimulatedSpeechEngine initialized"
        );
        Self {
            config,
            events,
            active: Mutex::new(None),
        }
    }

    /// 单个词的朗读时长
    fn word_duration(&self, rate: f32) -> Duration {
        let words_per_minute = self.config.words_per_minute.max(1) as f64 * rate.max(0.1) as f64;
        let millis = (60_000.0 / words_per_minute).max(1.0);
        Duration::from_micros((millis * 1000.0) as u64)
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<ActiveUtterance>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SpeechCapabilityPort for SimulatedSpeechEngine {
    fn speak(
        &self,
        utterance_id: UtteranceId,
        text: &str,
        voice: &VoiceParams,
    ) -> Result<(), SpeechError> {
        if let Some(voice_ref) = &voice.voice_ref {
            if !self.config.voices.iter().any(|v| &v.id == voice_ref) {
                return Err(SpeechError::VoiceNotFound(voice_ref.clone()));
            }
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SpeechError::Unavailable(e.to_string()))?;

        let cancel = CancellationToken::new();
        let (paused_tx, paused_rx) = watch::channel(false);
        let finished = Arc::new(AtomicBool::new(false));

        let script = Script {
            utterance_id,
            word_starts: word_starts(text),
            word_duration: self.word_duration(voice.rate),
            events: self.events.clone(),
            cancel: cancel.clone(),
            paused: paused_rx,
            finished: finished.clone(),
        };

        // 之前未取消的朗读直接作废
        if let Some(previous) = self.lock_active().replace(ActiveUtterance {
            utterance_id,
            cancel,
            paused: paused_tx,
            finished,
        }) {
            previous.cancel.cancel();
        }

        tracing::debug!(
            utterance_id = %utterance_id,
            words = script.word_starts.len(),
            word_ms = script.word_duration.as_millis() as u64,
            "Simulated utterance queued"
        );
        runtime.spawn(script.run());
        Ok(())
    }

    fn pause(&self) {
        if let Some(active) = self.lock_active().as_ref() {
            active.paused.send_replace(true);
        }
    }

    fn resume(&self) {
        if let Some(active) = self.lock_active().as_ref() {
            active.paused.send_replace(false);
        }
    }

    fn cancel(&self) {
        if let Some(active) = self.lock_active().take() {
            tracing::debug!(utterance_id = %active.utterance_id, "Simulated utterance cancelled");
            active.cancel.cancel();
        }
    }

    fn is_speaking(&self) -> bool {
        self.lock_active()
            .as_ref()
            .map(|a| !a.finished.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    fn is_paused(&self) -> bool {
        self.lock_active()
            .as_ref()
            .map(|a| !a.finished.load(Ordering::SeqCst) && *a.paused.borrow())
            .unwrap_or(false)
    }

    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        self.config.voices.clone()
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// 一次模拟朗读的执行脚本
struct Script {
    utterance_id: UtteranceId,
    word_starts: Vec<usize>,
    word_duration: Duration,
    events: SpeechEventSender,
    cancel: CancellationToken,
    paused: watch::Receiver<bool>,
    finished: Arc<AtomicBool>,
}

impl Script {
    async fn run(mut self) {
        let id = self.utterance_id;
        self.emit(SpeechEvent::new(id, SpeechEventKind::Start));

        let word_duration = self.word_duration;
        for index in 0..self.word_starts.len() {
            if !self.wait_unpaused().await {
                return;
            }
            let offset = self.word_starts[index] as i64;
            self.emit(SpeechEvent::boundary(id, BoundaryKind::Word, offset));
            if !self.advance(word_duration).await {
                return;
            }
        }

        self.finished.store(true, Ordering::SeqCst);
        self.emit(SpeechEvent::new(id, SpeechEventKind::End));
    }

    fn emit(&self, event: SpeechEvent) {
        if self.cancel.is_cancelled() {
            return;
        }
        if self.events.send(event).is_err() {
            tracing::debug!(utterance_id = %self.utterance_id, "Speech event receiver dropped");
            self.cancel.cancel();
        }
    }

    /// 暂停期间挂起，被取消时返回 false
    async fn wait_unpaused(&mut self) -> bool {
        loop {
            let is_paused = *self.paused.borrow_and_update();
            if !is_paused {
                return !self.cancel.is_cancelled();
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return false,
                changed = self.paused.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }
            }
        }
    }

    /// 推进一段未暂停的时间，被取消时返回 false
    async fn advance(&mut self, duration: Duration) -> bool {
        let mut remaining = duration;
        loop {
            if !self.wait_unpaused().await {
                return false;
            }
            let started = Instant::now();
            tokio::select! {
                _ = self.cancel.cancelled() => return false,
                _ = tokio::time::sleep(remaining) => return true,
                changed = self.paused.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                    remaining = remaining.saturating_sub(started.elapsed());
                }
            }
        }
    }
}

/// 每个词首字符的字符偏移
fn word_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_word = false;
    for (offset, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            starts.push(offset);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::speech_event_channel;

    fn fast_engine() -> (SimulatedSpeechEngine, crate::application::ports::SpeechEventReceiver) {
        let (tx, rx) = speech_event_channel();
        let config = SimulatedSpeechConfig {
            words_per_minute: 60_000,
            ..Default::default()
        };
        (SimulatedSpeechEngine::new(config, tx), rx)
    }

    async fn next_event(
        rx: &mut crate::application::ports::SpeechEventReceiver,
    ) -> Option<SpeechEvent> {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[test]
    fn test_word_starts_counts_chars() {
        assert_eq!(word_starts("Hello world. Bye."), vec![0, 6, 13]);
        assert_eq!(word_starts("  你好 世界"), vec![2, 5]);
        assert!(word_starts("   ").is_empty());
    }

    #[tokio::test]
    async fn test_emits_word_boundaries_then_end() {
        let (engine, mut rx) = fast_engine();
        let id = UtteranceId::new(1);

        engine
            .speak(id, "Hello world. Bye.", &VoiceParams::default())
            .unwrap();

        let mut events = Vec::new();
        while let Some(event) = next_event(&mut rx).await {
            let done = event.kind == SpeechEventKind::End;
            events.push(event);
            if done {
                break;
            }
        }

        assert_eq!(
            events,
            vec![
                SpeechEvent::new(id, SpeechEventKind::Start),
                SpeechEvent::boundary(id, BoundaryKind::Word, 0),
                SpeechEvent::boundary(id, BoundaryKind::Word, 6),
                SpeechEvent::boundary(id, BoundaryKind::Word, 13),
                SpeechEvent::new(id, SpeechEventKind::End),
            ]
        );
        assert!(!engine.is_speaking());
    }

    #[tokio::test]
    async fn test_cancel_silences_utterance() {
        let (tx, mut rx) = speech_event_channel();
        let config = SimulatedSpeechConfig {
            words_per_minute: 1,
            ..Default::default()
        };
        let engine = SimulatedSpeechEngine::new(config, tx);
        let id = UtteranceId::new(7);

        engine.speak(id, "one two three", &VoiceParams::default()).unwrap();
        assert_eq!(
            next_event(&mut rx).await,
            Some(SpeechEvent::new(id, SpeechEventKind::Start))
        );
        assert!(engine.is_speaking());

        engine.cancel();
        assert!(!engine.is_speaking());

        // 第一个边界可能在取消前已经发出，之后不应再有 End
        let mut trailing = Vec::new();
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_millis(100), rx.recv()).await
        {
            trailing.push(event.kind);
        }
        assert!(!trailing.contains(&SpeechEventKind::End));
    }

    #[tokio::test]
    async fn test_pause_and_resume_flags() {
        let (tx, _rx) = speech_event_channel();
        let config = SimulatedSpeechConfig {
            words_per_minute: 1,
            ..Default::default()
        };
        let engine = SimulatedSpeechEngine::new(config, tx);

        engine
            .speak(UtteranceId::new(1), "slow words", &VoiceParams::default())
            .unwrap();
        engine.pause();
        assert!(engine.is_paused());
        engine.resume();
        assert!(!engine.is_paused());
        engine.cancel();
    }

    #[tokio::test]
    async fn test_unknown_voice_rejected() {
        let (engine, _rx) = fast_engine();
        let voice = VoiceParams::new(Some("missing".to_string()), 1.0, 1.0);

        let result = engine.speak(UtteranceId::new(1), "text", &voice);

        assert!(matches!(result, Err(SpeechError::VoiceNotFound(_))));
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_speak_outside_runtime_unavailable() {
        let (engine, _rx) = fast_engine();
        let result = engine.speak(UtteranceId::new(1), "text", &VoiceParams::default());
        assert!(matches!(result, Err(SpeechError::Unavailable(_))));
    }
}
