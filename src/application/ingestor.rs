//! Document Ingestor - 文档导入
//!
//! 将原始字节和声明的类型转换为规范化文本：
//! - 纯文本：按 UTF-8 解码（非法序列替换为 U+FFFD），去掉 BOM
//! - PDF：委托提取器取得每页文本片段，再按纵坐标重建换行

use std::sync::Arc;

use crate::application::ports::{PdfExtractError, PdfTextExtractorPort};
use crate::domain::document::{layout_pages, DocumentKind, IngestError, NormalizedText};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

impl From<PdfExtractError> for IngestError {
    fn from(err: PdfExtractError) -> Self {
        IngestError::PdfParseError(err.to_string())
    }
}

/// 文档导入器
pub struct DocumentIngestor {
    pdf_extractor: Arc<dyn PdfTextExtractorPort>,
    /// PDF 换行阈值（纵坐标差）
    line_threshold: f32,
}

impl DocumentIngestor {
    pub fn new(pdf_extractor: Arc<dyn PdfTextExtractorPort>, line_threshold: f32) -> Self {
        Self {
            pdf_extractor,
            line_threshold,
        }
    }

    /// 按声明类型分发
    pub fn ingest(&self, bytes: &[u8], kind: DocumentKind) -> Result<NormalizedText, IngestError> {
        match kind {
            DocumentKind::PlainText => self.ingest_plain_text(bytes),
            DocumentKind::Pdf => self.ingest_pdf(bytes),
        }
    }

    /// 解析声明的类型字符串后分发，不支持的类型返回 `UnsupportedFormat`
    pub fn ingest_declared(
        &self,
        bytes: &[u8],
        declared_kind: &str,
    ) -> Result<(DocumentKind, NormalizedText), IngestError> {
        let kind = DocumentKind::parse(declared_kind)?;
        let text = self.ingest(bytes, kind)?;
        Ok((kind, text))
    }

    /// 导入纯文本，解码后为空则失败
    pub fn ingest_plain_text(&self, bytes: &[u8]) -> Result<NormalizedText, IngestError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let decoded = String::from_utf8_lossy(bytes);

        let text = NormalizedText::new(&decoded);
        if text.is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        tracing::debug!(
            bytes = bytes.len(),
            chars = text.char_len(),
            "Plain text ingested"
        );
        Ok(text)
    }

    /// 导入 PDF
    ///
    /// 没有可提取文本的 PDF 得到空文本，而不是错误
    pub fn ingest_pdf(&self, bytes: &[u8]) -> Result<NormalizedText, IngestError> {
        let pages = self.pdf_extractor.extract_pages(bytes).map_err(|e| {
            tracing::warn!(error = %e, "PDF extraction failed");
            IngestError::from(e)
        })?;

        let text = NormalizedText::new(&layout_pages(&pages, self.line_threshold));

        tracing::debug!(
            pages = pages.len(),
            chars = text.char_len(),
            threshold = self.line_threshold,
            "PDF ingested"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{PageText, TextRun, DEFAULT_LINE_THRESHOLD};

    /// 返回固定页面的提取器
    struct ScriptedExtractor {
        pages: Vec<PageText>,
    }

    impl PdfTextExtractorPort for ScriptedExtractor {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<PageText>, PdfExtractError> {
            Ok(self.pages.clone())
        }
    }

    struct FailingExtractor;

    impl PdfTextExtractorPort for FailingExtractor {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<PageText>, PdfExtractError> {
            Err(PdfExtractError::Encrypted)
        }
    }

    fn ingestor_with(pages: Vec<PageText>) -> DocumentIngestor {
        DocumentIngestor::new(Arc::new(ScriptedExtractor { pages }), DEFAULT_LINE_THRESHOLD)
    }

    #[test]
    fn test_plain_text_passthrough() {
        let ingestor = ingestor_with(vec![]);
        let text = ingestor.ingest_plain_text("Hello world. How are you?".as_bytes()).unwrap();
        assert_eq!(text.as_str(), "Hello world. How are you?");
    }

    #[test]
    fn test_plain_text_empty_fails() {
        let ingestor = ingestor_with(vec![]);
        assert!(matches!(
            ingestor.ingest_plain_text(b""),
            Err(IngestError::EmptyDocument)
        ));
        assert!(matches!(
            ingestor.ingest_plain_text(UTF8_BOM),
            Err(IngestError::EmptyDocument)
        ));
    }

    #[test]
    fn test_plain_text_invalid_utf8_is_replaced() {
        let ingestor = ingestor_with(vec![]);
        let text = ingestor.ingest_plain_text(&[b'a', 0xFF, b'b']).unwrap();
        assert_eq!(text.as_str(), "a\u{FFFD}b");
    }

    #[test]
    fn test_pdf_line_reconstruction() {
        let ingestor = ingestor_with(vec![PageText::new(vec![
            TextRun::new("Hello", 100.0),
            TextRun::new("world", 100.0),
            TextRun::new("Next", 80.0),
        ])]);

        let text = ingestor.ingest(b"%PDF-1.7", DocumentKind::Pdf).unwrap();
        assert_eq!(text.as_str(), "Hello world\nNext");
    }

    #[test]
    fn test_pdf_without_text_is_empty() {
        let ingestor = ingestor_with(vec![PageText::default()]);
        let text = ingestor.ingest_pdf(b"%PDF-1.7").unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_pdf_failure_carries_cause() {
        let ingestor = DocumentIngestor::new(Arc::new(FailingExtractor), DEFAULT_LINE_THRESHOLD);
        match ingestor.ingest_pdf(b"garbage") {
            Err(IngestError::PdfParseError(cause)) => assert!(cause.contains("encrypted")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_declared_kind_dispatch() {
        let ingestor = ingestor_with(vec![]);
        let (kind, text) = ingestor
            .ingest_declared(b"plain", "text/plain; charset=utf-8")
            .unwrap();
        assert_eq!(kind, DocumentKind::PlainText);
        assert_eq!(text.as_str(), "plain");

        assert!(matches!(
            ingestor.ingest_declared(b"<html/>", "text/html+bogus/x"),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ingestor.ingest_declared(b"PK", "application/zip"),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }
}
