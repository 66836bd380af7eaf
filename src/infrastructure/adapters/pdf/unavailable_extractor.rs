//! Unavailable PDF Extractor

use crate::application::ports::{PdfExtractError, PdfTextExtractorPort};
use crate::domain::document::PageText;

/// 未编译 PDF 支持时使用，所有请求都返回 `Unavailable`
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePdfExtractor;

impl PdfTextExtractorPort for UnavailablePdfExtractor {
    fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<PageText>, PdfExtractError> {
        Err(PdfExtractError::Unavailable(
            "built without the pdfium feature".to_string(),
        ))
    }
}
