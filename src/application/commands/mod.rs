//! Commands - CQRS 命令定义

pub mod document_commands;
pub mod handlers;
pub mod playback_commands;

pub use document_commands::{LoadDocument, LoadDocumentResponse};
pub use playback_commands::{PausePlayback, ResumePlayback, StartPlayback, StopPlayback};
