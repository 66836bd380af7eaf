//! Command Handlers - CQRS 命令处理器

mod document_handlers;
mod playback_handlers;

pub use document_handlers::LoadDocumentHandler;
pub use playback_handlers::{
    PausePlaybackHandler, ResumePlaybackHandler, StartPlaybackHandler, StopPlaybackHandler,
};
