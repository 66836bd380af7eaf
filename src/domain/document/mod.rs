//! Document Context - 文档限界上下文
//!
//! 职责:
//! - 文档类型与规范化文本
//! - PDF 版面还原（换行重建）
//! - Transcript 聚合（文本 + 句子 + 边界映射）

mod aggregate;
mod errors;
mod pdf_layout;
mod value_objects;

pub use aggregate::Transcript;
pub use errors::IngestError;
pub use pdf_layout::{layout_pages, PageText, TextRun, DEFAULT_LINE_THRESHOLD};
pub use value_objects::{DocumentId, DocumentKind, NormalizedText};
