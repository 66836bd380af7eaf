//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechCapability、PdfTextExtractor、DocumentStore 等）
//! - ingestor: 文档导入（纯文本 / PDF）
//! - playback_controller: 朗读状态机编排
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ingestor;
pub mod playback_controller;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Document commands
    LoadDocument,
    LoadDocumentResponse,
    // Playback commands
    PausePlayback,
    ResumePlayback,
    StartPlayback,
    StopPlayback,
    // Handlers
    handlers::{
        LoadDocumentHandler, PausePlaybackHandler, ResumePlaybackHandler, StartPlaybackHandler,
        StopPlaybackHandler,
    },
};

pub use error::ApplicationError;
pub use ingestor::DocumentIngestor;
pub use playback_controller::PlaybackController;

pub use ports::{
    // Document store
    DocumentStorePort,
    // PDF extractor
    PdfExtractError,
    PdfTextExtractorPort,
    // Playback control
    PlaybackControlError,
    PlaybackControlPort,
    // Playback events
    PlaybackEvent,
    PlaybackEventSink,
    // Speech capability
    speech_event_channel,
    BoundaryKind,
    SpeechCapabilityPort,
    SpeechError,
    SpeechEvent,
    SpeechEventKind,
    SpeechEventReceiver,
    SpeechEventSender,
};

pub use queries::{
    // Document queries
    GetDocument,
    GetSentences,
    // Playback queries
    GetPlaybackStatus,
    ListVoices,
    // Handlers
    handlers::{
        DocumentResponse, GetDocumentHandler, GetPlaybackStatusHandler, GetSentencesHandler,
        ListVoicesHandler, SentencesResponse,
    },
};
