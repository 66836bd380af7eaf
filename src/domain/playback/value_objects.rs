//! Playback Context - Value Objects

use serde::{Deserialize, Serialize};

/// 语速范围
pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 10.0;

/// 音调范围
pub const MIN_PITCH: f32 = 0.0;
pub const MAX_PITCH: f32 = 2.0;

/// 朗读请求标识
///
/// 单调递增，用于区分取消/重启前后的朗读，丢弃过期的引擎回调
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtteranceId(u64);

impl UtteranceId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 播放状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking,
    Paused,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 朗读参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParams {
    /// 音色引用（引擎的 voice id），为空时使用引擎默认音色
    pub voice_ref: Option<String>,
    /// 语速，范围 [0.1, 10.0]
    pub rate: f32,
    /// 音调，范围 [0.0, 2.0]
    pub pitch: f32,
}

impl VoiceParams {
    /// 创建朗读参数，超出范围的数值会被截断，非有限值回退为 1.0
    pub fn new(voice_ref: Option<String>, rate: f32, pitch: f32) -> Self {
        Self {
            voice_ref: voice_ref.filter(|v| !v.trim().is_empty()),
            rate: clamp_or_default(rate, MIN_RATE, MAX_RATE),
            pitch: clamp_or_default(pitch, MIN_PITCH, MAX_PITCH),
        }
    }
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice_ref: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

fn clamp_or_default(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        1.0
    }
}

/// 引擎提供的音色描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub id: String,
    pub name: String,
    pub lang: String,
    #[serde(default)]
    pub is_default: bool,
}

/// 播放会话快照（只读视图）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub utterance_id: Option<UtteranceId>,
    pub sentence_index: Option<usize>,
    pub voice_params: VoiceParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_params_clamped() {
        let params = VoiceParams::new(Some("en-US".to_string()), 50.0, -1.0);
        assert_eq!(params.rate, MAX_RATE);
        assert_eq!(params.pitch, MIN_PITCH);
        assert_eq!(params.voice_ref.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_voice_params_non_finite_fallback() {
        let params = VoiceParams::new(None, f32::NAN, f32::INFINITY);
        assert_eq!(params.rate, 1.0);
        assert_eq!(params.pitch, 1.0);
    }

    #[test]
    fn test_blank_voice_ref_is_none() {
        let params = VoiceParams::new(Some("  ".to_string()), 1.0, 1.0);
        assert!(params.voice_ref.is_none());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&PlaybackState::Speaking).unwrap();
        assert_eq!(json, "\"speaking\"");
    }
}
