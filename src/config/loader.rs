//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SpeechBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `TELLTALE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `TELLTALE_SERVER__PORT=8080`
/// - `TELLTALE_SPEECH__BACKEND=remote`
/// - `TELLTALE_INGEST__PDF_LINE_THRESHOLD=3.5`
/// - `TELLTALE_PDF__LIBRARY_PATH=/opt/pdfium/lib`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("ingest.pdf_line_threshold", 5.0_f64)?
        .set_default("ingest.max_upload_size", 10_u64 * 1024 * 1024)?
        .set_default("speech.backend", SpeechBackend::Simulated.as_str())?
        .set_default("speech.words_per_minute", 180)?
        .set_default("speech.default_rate", 1.0_f64)?
        .set_default("speech.default_pitch", 1.0_f64)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: TELLTALE_SPEECH__WORDS_PER_MINUTE=240
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("TELLTALE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let threshold = config.ingest.pdf_line_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "PDF line threshold must be a non-negative number, got {}",
            threshold
        )));
    }

    if config.ingest.max_upload_size == 0 {
        return Err(ConfigError::ValidationError(
            "Max upload size cannot be 0".to_string(),
        ));
    }

    if config.speech.words_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "Words per minute cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("PDF Line Threshold: {}", config.ingest.pdf_line_threshold);
    tracing::info!("Max Upload Size: {} bytes", config.ingest.max_upload_size);
    if let Some(path) = &config.pdf.library_path {
        tracing::info!("Pdfium Library Path: {:?}", path);
    }
    tracing::info!("Speech Backend: {}", config.speech.backend.as_str());
    if config.speech.backend == SpeechBackend::Simulated {
        tracing::info!("Words Per Minute: {}", config.speech.words_per_minute);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
