//! Speech Capability Probe - 启动时选择朗读后端
//!
//! 只在启动时探测一次，结果在进程生命周期内不变

use std::sync::Arc;

use super::{RemoteSpeechEngine, SimulatedSpeechConfig, SimulatedSpeechEngine};
use crate::application::ports::{SpeechCapabilityPort, SpeechEventSender};
use crate::config::{SpeechBackend, SpeechConfig};

/// 探测结果
pub struct SpeechProbe {
    /// 注入控制器的能力，`None` 表示不可用
    pub capability: Option<Arc<dyn SpeechCapabilityPort>>,
    /// 远程后端需要额外暴露给 `/ws/speech`
    pub remote: Option<Arc<RemoteSpeechEngine>>,
}

impl SpeechProbe {
    pub fn is_available(&self) -> bool {
        self.capability.is_some()
    }
}

/// 按配置构造朗读后端
pub fn probe_speech_capability(config: &SpeechConfig, events: SpeechEventSender) -> SpeechProbe {
    let probe = match config.backend {
        SpeechBackend::Simulated => {
            let engine = SimulatedSpeechEngine::new(
                SimulatedSpeechConfig {
                    words_per_minute: config.words_per_minute,
                    ..Default::default()
                },
                events,
            );
            SpeechProbe {
                capability: Some(Arc::new(engine)),
                remote: None,
            }
        }
        SpeechBackend::Remote => {
            let engine = Arc::new(RemoteSpeechEngine::new(events));
            SpeechProbe {
                capability: Some(engine.clone()),
                remote: Some(engine),
            }
        }
        SpeechBackend::None => SpeechProbe {
            capability: None,
            remote: None,
        },
    };

    match &probe.capability {
        Some(capability) => {
            tracing::info!(backend = capability.name(), "Speech capability available")
        }
        None => tracing::warn!("Speech capability unavailable, playback disabled"),
    }
    probe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::speech_event_channel;

    #[test]
    fn test_probe_backends() {
        let (tx, _rx) = speech_event_channel();

        let simulated = probe_speech_capability(&SpeechConfig::default(), tx.clone());
        assert_eq!(simulated.capability.as_ref().map(|c| c.name()), Some("simulated"));
        assert!(simulated.remote.is_none());

        let config = SpeechConfig {
            backend: SpeechBackend::Remote,
            ..Default::default()
        };
        let remote = probe_speech_capability(&config, tx.clone());
        assert!(remote.is_available());
        assert!(remote.remote.is_some());

        let config = SpeechConfig {
            backend: SpeechBackend::None,
            ..Default::default()
        };
        assert!(!probe_speech_capability(&config, tx).is_available());
    }
}
