//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    LoadDocumentHandler, PausePlaybackHandler, ResumePlaybackHandler, StartPlaybackHandler,
    StopPlaybackHandler,
    // Query handlers
    GetDocumentHandler, GetPlaybackStatusHandler, GetSentencesHandler, ListVoicesHandler,
    // Ports
    DocumentIngestor, DocumentStorePort, PlaybackControlPort,
};
use crate::domain::playback::VoiceParams;
use crate::infrastructure::adapters::RemoteSpeechEngine;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub document_store: Arc<dyn DocumentStorePort>,
    pub playback: Arc<dyn PlaybackControlPort>,
    pub event_publisher: Arc<EventPublisher>,
    /// 仅在 remote 后端下存在，供 `/ws/speech` 接入客户端
    pub remote_speech: Option<Arc<RemoteSpeechEngine>>,
    /// 上传文件最大字节数
    pub max_upload_size: usize,

    // ========== Command Handlers ==========
    pub load_document_handler: LoadDocumentHandler,
    pub start_playback_handler: StartPlaybackHandler,
    pub pause_playback_handler: PausePlaybackHandler,
    pub resume_playback_handler: ResumePlaybackHandler,
    pub stop_playback_handler: StopPlaybackHandler,

    // ========== Query Handlers ==========
    pub get_document_handler: GetDocumentHandler,
    pub get_sentences_handler: GetSentencesHandler,
    pub get_playback_status_handler: GetPlaybackStatusHandler,
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        ingestor: Arc<DocumentIngestor>,
        document_store: Arc<dyn DocumentStorePort>,
        playback: Arc<dyn PlaybackControlPort>,
        event_publisher: Arc<EventPublisher>,
        remote_speech: Option<Arc<RemoteSpeechEngine>>,
        voice_defaults: VoiceParams,
        max_upload_size: usize,
    ) -> Self {
        Self {
            // Ports
            document_store: document_store.clone(),
            playback: playback.clone(),
            event_publisher: event_publisher.clone(),
            remote_speech,
            max_upload_size,

            // Command handlers
            load_document_handler: LoadDocumentHandler::new(
                ingestor,
                document_store.clone(),
                playback.clone(),
                event_publisher,
            ),
            start_playback_handler: StartPlaybackHandler::new(
                document_store.clone(),
                playback.clone(),
                voice_defaults,
            ),
            pause_playback_handler: PausePlaybackHandler::new(playback.clone()),
            resume_playback_handler: ResumePlaybackHandler::new(playback.clone()),
            stop_playback_handler: StopPlaybackHandler::new(playback.clone()),

            // Query handlers
            get_document_handler: GetDocumentHandler::new(document_store.clone()),
            get_sentences_handler: GetSentencesHandler::new(document_store),
            get_playback_status_handler: GetPlaybackStatusHandler::new(playback.clone()),
            list_voices_handler: ListVoicesHandler::new(playback),
        }
    }
}
