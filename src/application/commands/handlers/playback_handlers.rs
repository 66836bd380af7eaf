//! Playback Command Handlers

use std::sync::Arc;

use crate::application::commands::{PausePlayback, ResumePlayback, StartPlayback, StopPlayback};
use crate::application::error::ApplicationError;
use crate::application::ports::{DocumentStorePort, PlaybackControlPort};
use crate::domain::playback::{PlaybackSnapshot, VoiceParams};

/// StartPlayback Handler - 朗读当前文档
pub struct StartPlaybackHandler {
    store: Arc<dyn DocumentStorePort>,
    playback: Arc<dyn PlaybackControlPort>,
    /// 配置中的默认朗读参数
    defaults: VoiceParams,
}

impl StartPlaybackHandler {
    pub fn new(
        store: Arc<dyn DocumentStorePort>,
        playback: Arc<dyn PlaybackControlPort>,
        defaults: VoiceParams,
    ) -> Self {
        Self {
            store,
            playback,
            defaults,
        }
    }

    pub async fn handle(&self, command: StartPlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        let transcript = self
            .store
            .current()
            .ok_or_else(|| ApplicationError::not_found("Document"))?;

        let voice = VoiceParams::new(
            command.voice_ref.or_else(|| self.defaults.voice_ref.clone()),
            command.rate.unwrap_or(self.defaults.rate),
            command.pitch.unwrap_or(self.defaults.pitch),
        );

        let snapshot = self.playback.start(transcript, voice).await?;
        Ok(snapshot)
    }
}

/// PausePlayback Handler
pub struct PausePlaybackHandler {
    playback: Arc<dyn PlaybackControlPort>,
}

impl PausePlaybackHandler {
    pub fn new(playback: Arc<dyn PlaybackControlPort>) -> Self {
        Self { playback }
    }

    pub async fn handle(&self, _command: PausePlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.playback.pause().await?)
    }
}

/// ResumePlayback Handler
pub struct ResumePlaybackHandler {
    playback: Arc<dyn PlaybackControlPort>,
}

impl ResumePlaybackHandler {
    pub fn new(playback: Arc<dyn PlaybackControlPort>) -> Self {
        Self { playback }
    }

    pub async fn handle(&self, _command: ResumePlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.playback.resume().await?)
    }
}

/// StopPlayback Handler
pub struct StopPlaybackHandler {
    playback: Arc<dyn PlaybackControlPort>,
}

impl StopPlaybackHandler {
    pub fn new(playback: Arc<dyn PlaybackControlPort>) -> Self {
        Self { playback }
    }

    pub async fn handle(&self, _command: StopPlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.playback.stop().await?)
    }
}
