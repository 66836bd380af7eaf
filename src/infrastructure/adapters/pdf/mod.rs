//! PDF Adapter - PDF 文本提取实现
//!
//! 启用 `pdfium` feature 时使用 pdfium-render，否则只提供不可用的占位实现

#[cfg(feature = "pdfium")]
mod pdfium_extractor;
mod unavailable_extractor;

#[cfg(feature = "pdfium")]
pub use pdfium_extractor::PdfiumTextExtractor;
pub use unavailable_extractor::UnavailablePdfExtractor;

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::PdfTextExtractorPort;

/// 按编译特性构造 PDF 提取器
pub fn build_pdf_extractor(library_path: Option<PathBuf>) -> Arc<dyn PdfTextExtractorPort> {
    #[cfg(feature = "pdfium")]
    {
        tracing::info!(library_path = ?library_path, "Using pdfium text extractor");
        Arc::new(PdfiumTextExtractor::new(library_path))
    }

    #[cfg(not(feature = "pdfium"))]
    {
        if library_path.is_some() {
            tracing::warn!("pdf.library_path is set but the pdfium feature is disabled");
        }
        tracing::warn!("PDF support disabled, PDF documents will be rejected");
        Arc::new(UnavailablePdfExtractor)
    }
}
