//! Document Commands - 文档相关命令

use crate::domain::document::{DocumentId, DocumentKind};

/// 加载文档命令
///
/// `declared_kind` 为上游声明的 MIME 风格类型字符串
#[derive(Debug, Clone)]
pub struct LoadDocument {
    pub bytes: Vec<u8>,
    pub declared_kind: String,
}

impl LoadDocument {
    /// 从直接输入的文本创建
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            bytes: content.into().into_bytes(),
            declared_kind: DocumentKind::PlainText.as_str().to_string(),
        }
    }
}

/// 加载文档响应
#[derive(Debug, Clone)]
pub struct LoadDocumentResponse {
    pub document_id: DocumentId,
    pub kind: DocumentKind,
    pub total_chars: usize,
    pub total_sentences: usize,
}
