//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Document Context: 文档导入与规范化
//! - Playback Context: 朗读会话状态机

pub mod document;
pub mod playback;

// 共享的分句与边界映射
mod boundary_mapper;
mod text_segmenter;

pub use boundary_mapper::BoundaryMapper;
pub use text_segmenter::{segment, segment_with, SegmentConfig, Sentence};
