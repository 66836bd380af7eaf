//! Document Context - Errors

use thiserror::Error;

/// 文档导入错误
///
/// 导入失败时不会修改任何已加载的文档
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("文档内容为空")]
    EmptyDocument,

    #[error("不支持的文档类型: {0}")]
    UnsupportedFormat(String),

    #[error("PDF 解析失败: {0}")]
    PdfParseError(String),
}
