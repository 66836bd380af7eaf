//! Playback Context - 播放限界上下文
//!
//! 职责:
//! - 播放会话状态机（Idle / Speaking / Paused）
//! - 朗读标识分配与过期回调判定
//! - 朗读参数与音色描述

mod errors;
mod session;
mod value_objects;

pub use errors::PlaybackError;
pub use session::PlaybackSession;
pub use value_objects::{
    PlaybackSnapshot, PlaybackState, UtteranceId, VoiceDescriptor, VoiceParams, MAX_PITCH,
    MAX_RATE, MIN_PITCH, MIN_RATE,
};
