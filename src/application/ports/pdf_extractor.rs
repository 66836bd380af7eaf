//! PDF Extractor Port - PDF 文本提取抽象
//!
//! 每页返回按阅读顺序排列的文本片段及其纵坐标
//! 具体实现在 infrastructure/adapters 层

use thiserror::Error;

use crate::domain::document::PageText;

/// PDF 提取错误
#[derive(Debug, Error)]
pub enum PdfExtractError {
    /// 文件损坏或格式不合法
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// 文件加密
    #[error("Document is encrypted")]
    Encrypted,

    /// 提取器本身不可用（例如缺少 pdfium 动态库）
    #[error("Extractor unavailable: {0}")]
    Unavailable(String),
}

/// PDF Extractor Port
pub trait PdfTextExtractorPort: Send + Sync {
    /// 提取所有页的文本片段（页数即返回的长度）
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, PdfExtractError>;
}
