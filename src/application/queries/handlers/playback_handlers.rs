//! Playback Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::PlaybackControlPort;
use crate::application::queries::{GetPlaybackStatus, ListVoices};
use crate::domain::playback::{PlaybackSnapshot, VoiceDescriptor};

/// GetPlaybackStatus Handler
pub struct GetPlaybackStatusHandler {
    playback: Arc<dyn PlaybackControlPort>,
}

impl GetPlaybackStatusHandler {
    pub fn new(playback: Arc<dyn PlaybackControlPort>) -> Self {
        Self { playback }
    }

    pub async fn handle(
        &self,
        _query: GetPlaybackStatus,
    ) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.playback.snapshot().await?)
    }
}

/// ListVoices Handler - 引擎不可用时返回空列表
pub struct ListVoicesHandler {
    playback: Arc<dyn PlaybackControlPort>,
}

impl ListVoicesHandler {
    pub fn new(playback: Arc<dyn PlaybackControlPort>) -> Self {
        Self { playback }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceDescriptor>, ApplicationError> {
        Ok(self.playback.list_voices().await?)
    }
}
