//! Playback Commands - 播放控制命令

/// 开始朗读命令，未给出的参数使用配置中的默认值
#[derive(Debug, Clone, Default)]
pub struct StartPlayback {
    pub voice_ref: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
}

/// 暂停命令
#[derive(Debug, Clone, Copy)]
pub struct PausePlayback;

/// 恢复命令
#[derive(Debug, Clone, Copy)]
pub struct ResumePlayback;

/// 停止命令
#[derive(Debug, Clone, Copy)]
pub struct StopPlayback;
