//! Document Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::DocumentStorePort;
use crate::application::queries::{GetDocument, GetSentences};
use crate::domain::document::{DocumentId, DocumentKind, Transcript};
use crate::domain::Sentence;

/// 默认分页大小
const DEFAULT_SENTENCE_LIMIT: usize = 100;

// ============================================================================
// Response DTOs
// ============================================================================

/// 文档概要响应
#[derive(Debug, Clone)]
pub struct DocumentResponse {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub text: String,
    pub total_chars: usize,
    pub total_sentences: usize,
    pub loaded_at: String,
}

impl From<&Transcript> for DocumentResponse {
    fn from(transcript: &Transcript) -> Self {
        Self {
            id: transcript.id(),
            kind: transcript.kind(),
            text: transcript.text().as_str().to_string(),
            total_chars: transcript.text().char_len(),
            total_sentences: transcript.sentence_count(),
            loaded_at: transcript.loaded_at().to_rfc3339(),
        }
    }
}

/// 分页句子响应
#[derive(Debug, Clone)]
pub struct SentencesResponse {
    pub document_id: DocumentId,
    pub total: usize,
    pub sentences: Vec<Sentence>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetDocument Handler
pub struct GetDocumentHandler {
    store: Arc<dyn DocumentStorePort>,
}

impl GetDocumentHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: GetDocument) -> Result<DocumentResponse, ApplicationError> {
        let transcript = self
            .store
            .current()
            .ok_or_else(|| ApplicationError::not_found("Document"))?;

        Ok(DocumentResponse::from(transcript.as_ref()))
    }
}

/// GetSentences Handler
pub struct GetSentencesHandler {
    store: Arc<dyn DocumentStorePort>,
}

impl GetSentencesHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSentences) -> Result<SentencesResponse, ApplicationError> {
        let transcript = self
            .store
            .current()
            .ok_or_else(|| ApplicationError::not_found("Document"))?;

        let start = query.start_index.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_SENTENCE_LIMIT);

        Ok(SentencesResponse {
            document_id: transcript.id(),
            total: transcript.sentence_count(),
            sentences: transcript.sentences_range(start, limit).to_vec(),
        })
    }
}
