//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::document::DEFAULT_LINE_THRESHOLD;
use crate::domain::playback::VoiceParams;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文档导入配置
    #[serde(default)]
    pub ingest: IngestConfig,

    /// PDF 解析配置
    #[serde(default)]
    pub pdf: PdfConfig,

    /// 朗读引擎配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文档导入配置
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// PDF 同行判定阈值（纵坐标差，单位 pt）
    #[serde(default = "default_line_threshold")]
    pub pdf_line_threshold: f32,

    /// 上传文件最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_line_threshold() -> f32 {
    DEFAULT_LINE_THRESHOLD
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            pdf_line_threshold: default_line_threshold(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// PDF 解析配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfConfig {
    /// pdfium 动态库所在目录，未设置时从系统路径加载
    #[serde(default)]
    pub library_path: Option<PathBuf>,
}

/// 朗读后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// 计时模拟（开发调试）
    #[default]
    Simulated,
    /// 浏览器客户端经 WebSocket 朗读
    Remote,
    /// 禁用朗读能力
    None,
}

impl SpeechBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechBackend::Simulated => "simulated",
            SpeechBackend::Remote => "remote",
            SpeechBackend::None => "none",
        }
    }
}

/// 朗读引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 后端选择
    #[serde(default)]
    pub backend: SpeechBackend,

    /// 模拟引擎基准语速
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// 默认音色
    #[serde(default)]
    pub default_voice: Option<String>,

    /// 默认语速
    #[serde(default = "default_unit")]
    pub default_rate: f32,

    /// 默认音调
    #[serde(default = "default_unit")]
    pub default_pitch: f32,
}

fn default_words_per_minute() -> u32 {
    180
}

fn default_unit() -> f32 {
    1.0
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::default(),
            words_per_minute: default_words_per_minute(),
            default_voice: None,
            default_rate: default_unit(),
            default_pitch: default_unit(),
        }
    }
}

impl SpeechConfig {
    /// 请求未指定时使用的朗读参数
    pub fn default_voice_params(&self) -> VoiceParams {
        VoiceParams::new(
            self.default_voice.clone(),
            self.default_rate,
            self.default_pitch,
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
