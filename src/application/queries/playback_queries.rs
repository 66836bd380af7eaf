//! Playback Queries

/// 获取播放状态查询
#[derive(Debug, Clone)]
pub struct GetPlaybackStatus;

/// 列出引擎音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;
