//! Pdfium Text Extractor
//!
//! pdfium 不是异步安全的，调用方需要在阻塞线程中使用（见 LoadDocumentHandler）

use pdfium_render::prelude::*;
use std::path::PathBuf;

use crate::application::ports::{PdfExtractError, PdfTextExtractorPort};
use crate::domain::document::{PageText, TextRun};

/// 基于 pdfium-render 的文本提取器
pub struct PdfiumTextExtractor {
    /// pdfium 动态库所在目录
    library_path: Option<PathBuf>,
}

impl PdfiumTextExtractor {
    pub fn new(library_path: Option<PathBuf>) -> Self {
        Self { library_path }
    }

    fn bind(&self) -> Result<Pdfium, PdfExtractError> {
        let bindings = match &self.library_path {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| PdfExtractError::Unavailable(e.to_string()))?;

        Ok(Pdfium::new(bindings))
    }
}

impl PdfTextExtractorPort for PdfiumTextExtractor {
    #[allow(deprecated)]
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, PdfExtractError> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(map_pdfium_error)?;

        let mut pages = Vec::new();
        for page in document.pages().iter() {
            let text = page.text().map_err(map_pdfium_error)?;
            let runs: Vec<TextRun> = text
                .segments()
                .iter()
                .map(|segment| TextRun::new(segment.text(), segment.bounds().bottom.value))
                .collect();
            pages.push(PageText::new(runs));
        }

        tracing::debug!(pages = pages.len(), "PDF text extracted");
        Ok(pages)
    }
}

fn map_pdfium_error(err: PdfiumError) -> PdfExtractError {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            PdfExtractError::Encrypted
        }
        other => PdfExtractError::Malformed(other.to_string()),
    }
}
