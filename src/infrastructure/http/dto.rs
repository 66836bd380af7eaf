//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{DocumentResponse, LoadDocumentResponse, SentencesResponse};
use crate::domain::document::{DocumentId, DocumentKind};
use crate::domain::Sentence;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Document DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoadTextRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentLoadedDto {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub total_chars: usize,
    pub total_sentences: usize,
}

impl From<LoadDocumentResponse> for DocumentLoadedDto {
    fn from(r: LoadDocumentResponse) -> Self {
        Self {
            id: r.document_id,
            kind: r.kind,
            total_chars: r.total_chars,
            total_sentences: r.total_sentences,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentDto {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub text: String,
    pub total_chars: usize,
    pub total_sentences: usize,
    pub loaded_at: String,
}

impl From<DocumentResponse> for DocumentDto {
    fn from(r: DocumentResponse) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            text: r.text,
            total_chars: r.total_chars,
            total_sentences: r.total_sentences,
            loaded_at: r.loaded_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GetSentencesRequest {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SentenceDto {
    pub index: usize,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl From<Sentence> for SentenceDto {
    fn from(s: Sentence) -> Self {
        Self {
            index: s.index,
            text: s.text,
            start_offset: s.start_offset,
            end_offset: s.end_offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentencesDto {
    pub document_id: DocumentId,
    pub total: usize,
    pub sentences: Vec<SentenceDto>,
}

impl From<SentencesResponse> for SentencesDto {
    fn from(r: SentencesResponse) -> Self {
        Self {
            document_id: r.document_id,
            total: r.total,
            sentences: r.sentences.into_iter().map(SentenceDto::from).collect(),
        }
    }
}

// ============================================================================
// Playback DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StartPlaybackRequest {
    #[serde(default)]
    pub voice_ref: Option<String>,
    #[serde(default)]
    pub rate: Option<f32>,
    #[serde(default)]
    pub pitch: Option<f32>,
}
