//! Telltale - 文档朗读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Document Context: 文档导入结果（Transcript）、PDF 换行重建
//! - Playback Context: 朗读会话状态机
//! - 分句（text_segmenter）与字符偏移到句子的映射（boundary_mapper）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechCapability, PdfTextExtractor, DocumentStore, PlaybackControl）
//! - Ingestor / PlaybackController: 核心用例编排
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: DocumentStore 内存实现
//! - Worker: PlaybackWorker 串行调度
//! - Adapters: 朗读后端（simulated / remote）、pdfium 文本提取
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
