//! Document HTTP Handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetDocument, GetSentences, LoadDocument};
use crate::domain::document::DocumentKind;
use crate::infrastructure::http::dto::{
    ApiResponse, DocumentDto, DocumentLoadedDto, GetSentencesRequest, LoadTextRequest,
    SentencesDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 上传文档（multipart: `file`，可选 `kind`）
///
/// 类型判定顺序：`kind` 字段 > 文件的 Content-Type > 文件扩展名
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentLoadedDto>>, ApiError> {
    let mut declared_kind: Option<String> = None;
    let mut file: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "kind" => {
                let kind = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read kind: {}", e)))?;
                if !kind.trim().is_empty() {
                    declared_kind = Some(kind);
                }
            }
            "file" => {
                let guessed = guess_kind(field.content_type(), field.file_name());

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                if bytes.len() > state.max_upload_size {
                    return Err(ApiError::BadRequest(format!(
                        "File too large. Maximum size is {} bytes",
                        state.max_upload_size
                    )));
                }

                file = Some((bytes.to_vec(), guessed));
            }
            _ => {}
        }
    }

    let (bytes, guessed) =
        file.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;
    let declared_kind = declared_kind
        .or(guessed)
        .ok_or_else(|| ApiError::BadRequest("Unable to determine document kind".to_string()))?;

    let response = state
        .load_document_handler
        .handle(LoadDocument {
            bytes,
            declared_kind,
        })
        .await?;

    Ok(Json(ApiResponse::success(response.into())))
}

/// 直接提交纯文本
pub async fn load_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoadTextRequest>,
) -> Result<Json<ApiResponse<DocumentLoadedDto>>, ApiError> {
    if req.content.len() > state.max_upload_size {
        return Err(ApiError::BadRequest(format!(
            "Content too large. Maximum size is {} bytes",
            state.max_upload_size
        )));
    }

    let response = state
        .load_document_handler
        .handle(LoadDocument::from_text(req.content))
        .await?;

    Ok(Json(ApiResponse::success(response.into())))
}

/// 获取当前文档
pub async fn get_document(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DocumentDto>>, ApiError> {
    let response = state.get_document_handler.handle(GetDocument).await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 分页获取句子
pub async fn get_sentences(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetSentencesRequest>,
) -> Result<Json<ApiResponse<SentencesDto>>, ApiError> {
    let response = state
        .get_sentences_handler
        .handle(GetSentences {
            start_index: req.start,
            limit: req.limit,
        })
        .await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 根据 Content-Type 或扩展名推断类型
fn guess_kind(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
    if let Some(content_type) = content_type {
        if DocumentKind::parse(content_type).is_ok() {
            return Some(content_type.to_string());
        }
    }

    let by_extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .and_then(|(_, ext)| match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" | "text" => Some(DocumentKind::PlainText),
            _ => None,
        });

    by_extension
        .map(|kind| kind.as_str().to_string())
        .or_else(|| content_type.map(str::to_string))
}
