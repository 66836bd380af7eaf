//! Worker Layer - Background Task Processing
//!
//! 实现 PlaybackWorker，串行调度播放命令与引擎事件

mod playback_worker;

pub use playback_worker::{PlaybackCommand, PlaybackHandle, PlaybackWorker};
