//! Remote Speech Engine - 通过 WebSocket 中转到浏览器朗读
//!
//! 服务端只负责转发请求，实际发音由连接在 `/ws/speech` 上的客户端完成，
//! 客户端回报的事件经过偏移换算后写入事件通道
//!
//! 同一时刻只接受一个客户端，新连接会顶替旧连接

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, RwLock};
use tokio::sync::mpsc;

use crate::application::ports::{
    BoundaryKind, SpeechCapabilityPort, SpeechError, SpeechEvent, SpeechEventKind,
    SpeechEventSender,
};
use crate::domain::playback::{UtteranceId, VoiceDescriptor, VoiceParams};

/// 服务端 -> 客户端
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteCommand {
    Speak {
        utterance_id: UtteranceId,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        voice_ref: Option<String>,
        rate: f32,
        pitch: f32,
    },
    Pause,
    Resume,
    Cancel,
}

/// 客户端 -> 服务端
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteClientMessage {
    Voices {
        voices: Vec<VoiceDescriptor>,
    },
    Start {
        utterance_id: UtteranceId,
    },
    /// `char_index` 为 UTF-16 偏移（浏览器 SpeechSynthesis 的约定）
    Boundary {
        utterance_id: UtteranceId,
        name: BoundaryKind,
        char_index: i64,
    },
    End {
        utterance_id: UtteranceId,
    },
    Error {
        utterance_id: UtteranceId,
        cause: String,
    },
}

/// 已连接的客户端
struct RemoteClient {
    id: u64,
    sender: mpsc::UnboundedSender<RemoteCommand>,
}

/// 当前朗读（用于偏移换算）
struct RemoteUtterance {
    utterance_id: UtteranceId,
    text: String,
    paused: bool,
}

#[derive(Default)]
struct RemoteState {
    client: Option<RemoteClient>,
    next_client_id: u64,
    active: Option<RemoteUtterance>,
}

/// 远程朗读引擎
pub struct RemoteSpeechEngine {
    events: SpeechEventSender,
    state: Mutex<RemoteState>,
    voices: RwLock<Vec<VoiceDescriptor>>,
}

impl RemoteSpeechEngine {
    pub fn new(events: SpeechEventSender) -> Self {
        Self {
            events,
            state: Mutex::new(RemoteState::default()),
            voices: RwLock::new(Vec::new()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RemoteState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// 接入客户端，返回连接标识和下行命令接收端
    pub fn attach(&self) -> (u64, mpsc::UnboundedReceiver<RemoteCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock_state();
        state.next_client_id += 1;
        let client_id = state.next_client_id;

        if let Some(previous) = state.client.replace(RemoteClient { id: client_id, sender: tx }) {
            tracing::info!(previous = previous.id, client_id, "Speech client replaced");
        } else {
            tracing::info!(client_id, "Speech client attached");
        }
        (client_id, rx)
    }

    /// 客户端断开；若仍有朗读进行中则回报错误
    pub fn detach(&self, client_id: u64) {
        let orphaned = {
            let mut state = self.lock_state();
            let is_current = state.client.as_ref().is_some_and(|c| c.id == client_id);
            if !is_current {
                return;
            }
            state.client = None;
            state.active.take()
        };

        tracing::info!(client_id, "Speech client detached");
        if let Some(utterance) = orphaned {
            self.emit(SpeechEvent::error(
                utterance.utterance_id,
                "Speech client disconnected",
            ));
        }
    }

    /// 是否有客户端在线
    pub fn is_connected(&self) -> bool {
        self.lock_state().client.is_some()
    }

    /// 处理客户端上行消息
    pub fn handle_client_message(&self, message: RemoteClientMessage) {
        match message {
            RemoteClientMessage::Voices { voices } => {
                tracing::debug!(count = voices.len(), "Speech client reported voices");
                match self.voices.write() {
                    Ok(mut guard) => *guard = voices,
                    Err(poisoned) => *poisoned.into_inner() = voices,
                }
            }
            RemoteClientMessage::Start { utterance_id } => {
                self.emit(SpeechEvent::new(utterance_id, SpeechEventKind::Start));
            }
            RemoteClientMessage::Boundary {
                utterance_id,
                name,
                char_index,
            } => {
                let char_index = {
                    let state = self.lock_state();
                    match &state.active {
                        Some(active) if active.utterance_id == utterance_id => {
                            utf16_to_char_index(&active.text, char_index)
                        }
                        // 过期事件原样转发，由控制器丢弃
                        _ => char_index,
                    }
                };
                self.emit(SpeechEvent::boundary(utterance_id, name, char_index));
            }
            RemoteClientMessage::End { utterance_id } => {
                self.clear_active(utterance_id);
                self.emit(SpeechEvent::new(utterance_id, SpeechEventKind::End));
            }
            RemoteClientMessage::Error {
                utterance_id,
                cause,
            } => {
                self.clear_active(utterance_id);
                self.emit(SpeechEvent::error(utterance_id, cause));
            }
        }
    }

    fn clear_active(&self, utterance_id: UtteranceId) {
        let mut state = self.lock_state();
        if state
            .active
            .as_ref()
            .is_some_and(|a| a.utterance_id == utterance_id)
        {
            state.active = None;
        }
    }

    /// 发送到当前客户端，没有客户端时返回 false
    fn send(state: &RemoteState, command: RemoteCommand) -> bool {
        match &state.client {
            Some(client) => client.sender.send(command).is_ok(),
            None => false,
        }
    }

    fn emit(&self, event: SpeechEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("Speech event receiver dropped");
        }
    }
}

impl SpeechCapabilityPort for RemoteSpeechEngine {
    fn speak(
        &self,
        utterance_id: UtteranceId,
        text: &str,
        voice: &VoiceParams,
    ) -> Result<(), SpeechError> {
        if let Some(voice_ref) = &voice.voice_ref {
            let voices = self.list_voices();
            if !voices.is_empty() && !voices.iter().any(|v| &v.id == voice_ref) {
                return Err(SpeechError::VoiceNotFound(voice_ref.clone()));
            }
        }

        let delivered = {
            let mut state = self.lock_state();
            let delivered = Self::send(
                &state,
                RemoteCommand::Speak {
                    utterance_id,
                    text: text.to_string(),
                    voice_ref: voice.voice_ref.clone(),
                    rate: voice.rate,
                    pitch: voice.pitch,
                },
            );
            if delivered {
                state.active = Some(RemoteUtterance {
                    utterance_id,
                    text: text.to_string(),
                    paused: false,
                });
            }
            delivered
        };

        if !delivered {
            tracing::warn!(utterance_id = %utterance_id, "No speech client connected");
            self.emit(SpeechEvent::error(utterance_id, "No speech client connected"));
        }
        Ok(())
    }

    fn pause(&self) {
        let mut state = self.lock_state();
        if Self::send(&state, RemoteCommand::Pause) {
            if let Some(active) = state.active.as_mut() {
                active.paused = true;
            }
        }
    }

    fn resume(&self) {
        let mut state = self.lock_state();
        if Self::send(&state, RemoteCommand::Resume) {
            if let Some(active) = state.active.as_mut() {
                active.paused = false;
            }
        }
    }

    fn cancel(&self) {
        let mut state = self.lock_state();
        if state.active.take().is_some() {
            Self::send(&state, RemoteCommand::Cancel);
        }
    }

    fn is_speaking(&self) -> bool {
        self.lock_state().active.is_some()
    }

    fn is_paused(&self) -> bool {
        self.lock_state()
            .active
            .as_ref()
            .is_some_and(|a| a.paused)
    }

    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        match self.voices.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// UTF-16 偏移换算为字符偏移
///
/// 负数原样返回；超出文本末尾时按超出量顺延，保证映射结果仍在末尾之外
pub fn utf16_to_char_index(text: &str, utf16_index: i64) -> i64 {
    if utf16_index < 0 {
        return utf16_index;
    }

    let target = utf16_index as u64;
    let mut units: u64 = 0;
    let mut chars: i64 = 0;
    for c in text.chars() {
        if units >= target {
            return chars;
        }
        units += c.len_utf16() as u64;
        chars += 1;
    }

    chars + (target.saturating_sub(units)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{speech_event_channel, SpeechEventReceiver};

    fn engine() -> (RemoteSpeechEngine, SpeechEventReceiver) {
        let (tx, rx) = speech_event_channel();
        (RemoteSpeechEngine::new(tx), rx)
    }

    #[test]
    fn test_utf16_to_char_index() {
        assert_eq!(utf16_to_char_index("Hello world", 6), 6);
        // 😀 占两个 UTF-16 单元
        assert_eq!(utf16_to_char_index("😀 ok", 3), 2);
        assert_eq!(utf16_to_char_index("你好", 1), 1);
        assert_eq!(utf16_to_char_index("ab", 5), 5);
        assert_eq!(utf16_to_char_index("ab", -1), -1);
    }

    #[test]
    fn test_speak_without_client_reports_error() {
        let (engine, mut rx) = engine();
        let id = UtteranceId::new(3);

        engine.speak(id, "Hello.", &VoiceParams::default()).unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.utterance_id, id);
        assert!(matches!(event.kind, SpeechEventKind::Error { .. }));
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_commands_relayed_to_client() {
        let (engine, _rx) = engine();
        let (_client_id, mut commands) = engine.attach();
        let id = UtteranceId::new(1);

        engine.speak(id, "Hi.", &VoiceParams::default()).unwrap();
        engine.pause();
        assert!(engine.is_paused());
        engine.resume();
        engine.cancel();

        assert!(matches!(
            commands.try_recv().unwrap(),
            RemoteCommand::Speak { utterance_id, .. } if utterance_id == id
        ));
        assert_eq!(commands.try_recv().unwrap(), RemoteCommand::Pause);
        assert_eq!(commands.try_recv().unwrap(), RemoteCommand::Resume);
        assert_eq!(commands.try_recv().unwrap(), RemoteCommand::Cancel);
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_boundary_offsets_converted() {
        let (engine, mut rx) = engine();
        let (_client_id, _commands) = engine.attach();
        let id = UtteranceId::new(1);
        engine.speak(id, "😀 Next. Again.", &VoiceParams::default()).unwrap();

        engine.handle_client_message(RemoteClientMessage::Boundary {
            utterance_id: id,
            name: BoundaryKind::Word,
            char_index: 3,
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            SpeechEvent::boundary(id, BoundaryKind::Word, 2)
        );
    }

    #[test]
    fn test_detach_fails_active_utterance() {
        let (engine, mut rx) = engine();
        let (client_id, _commands) = engine.attach();
        let id = UtteranceId::new(9);
        engine.speak(id, "Text.", &VoiceParams::default()).unwrap();

        engine.detach(client_id);

        assert!(!engine.is_connected());
        assert!(matches!(
            rx.try_recv().unwrap().kind,
            SpeechEventKind::Error { .. }
        ));
    }

    #[test]
    fn test_replaced_client_detach_is_ignored() {
        let (engine, _rx) = engine();
        let (first, _old) = engine.attach();
        let (_second, _new) = engine.attach();

        engine.detach(first);

        assert!(engine.is_connected());
    }

    #[test]
    fn test_client_message_wire_format() {
        let message: RemoteClientMessage = serde_json::from_str(
            r#"{"type":"boundary","utterance_id":4,"name":"word","char_index":10}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            RemoteClientMessage::Boundary {
                utterance_id: UtteranceId::new(4),
                name: BoundaryKind::Word,
                char_index: 10,
            }
        );

        let command = serde_json::to_value(RemoteCommand::Cancel).unwrap();
        assert_eq!(command, serde_json::json!({"type": "cancel"}));
    }

    #[test]
    fn test_voices_cached_and_checked() {
        let (engine, _rx) = engine();
        let (_client_id, _commands) = engine.attach();
        engine.handle_client_message(RemoteClientMessage::Voices {
            voices: vec![VoiceDescriptor {
                id: "en-GB".to_string(),
                name: "British".to_string(),
                lang: "en-GB".to_string(),
                is_default: true,
            }],
        });

        assert_eq!(engine.list_voices().len(), 1);
        let voice = VoiceParams::new(Some("fr-FR".to_string()), 1.0, 1.0);
        assert!(matches!(
            engine.speak(UtteranceId::new(1), "Salut.", &voice),
            Err(SpeechError::VoiceNotFound(_))
        ));
    }
}
