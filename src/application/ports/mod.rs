//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod document_store;
mod pdf_extractor;
mod playback_control;
mod playback_events;
mod speech_capability;

pub use document_store::DocumentStorePort;
pub use pdf_extractor::{PdfExtractError, PdfTextExtractorPort};
pub use playback_control::{PlaybackControlError, PlaybackControlPort};
pub use playback_events::{PlaybackEvent, PlaybackEventSink};
pub use speech_capability::{
    speech_event_channel, BoundaryKind, SpeechCapabilityPort, SpeechError, SpeechEvent,
    SpeechEventKind, SpeechEventReceiver, SpeechEventSender,
};
