//! Document Command Handlers

use std::sync::Arc;

use crate::application::commands::{LoadDocument, LoadDocumentResponse};
use crate::application::error::ApplicationError;
use crate::application::ingestor::DocumentIngestor;
use crate::application::ports::{
    DocumentStorePort, PlaybackControlPort, PlaybackEvent, PlaybackEventSink,
};
use crate::domain::document::{IngestError, Transcript};

/// LoadDocument Handler - 导入、分句并整体替换当前文档
///
/// 导入失败时直接返回错误，当前文档保持不变
pub struct LoadDocumentHandler {
    ingestor: Arc<DocumentIngestor>,
    store: Arc<dyn DocumentStorePort>,
    playback: Arc<dyn PlaybackControlPort>,
    events: Arc<dyn PlaybackEventSink>,
}

impl LoadDocumentHandler {
    pub fn new(
        ingestor: Arc<DocumentIngestor>,
        store: Arc<dyn DocumentStorePort>,
        playback: Arc<dyn PlaybackControlPort>,
        events: Arc<dyn PlaybackEventSink>,
    ) -> Self {
        Self {
            ingestor,
            store,
            playback,
            events,
        }
    }

    pub async fn handle(
        &self,
        command: LoadDocument,
    ) -> Result<LoadDocumentResponse, ApplicationError> {
        let size = command.bytes.len();
        let ingestor = self.ingestor.clone();

        // PDF 提取和分句都是 CPU 密集型，放到阻塞线程池
        let transcript = tokio::task::spawn_blocking(move || {
            let (kind, text) = ingestor.ingest_declared(&command.bytes, &command.declared_kind)?;
            Ok::<_, IngestError>(Transcript::new(kind, text))
        })
        .await
        .map_err(|e| ApplicationError::internal(format!("Ingest task failed: {}", e)))??;

        let transcript = Arc::new(transcript);
        let previous = self.store.replace(transcript.clone());

        // 旧文档的朗读不再对应当前句子列表；
        // 替换之后已经针对新文档发起的 start 不受影响
        if let Err(e) = self.playback.stop_superseded(transcript.id()).await {
            tracing::warn!(error = %e, "Failed to stop playback after document load");
        }

        let response = LoadDocumentResponse {
            document_id: transcript.id(),
            kind: transcript.kind(),
            total_chars: transcript.text().char_len(),
            total_sentences: transcript.sentence_count(),
        };

        self.events.publish(PlaybackEvent::DocumentLoaded {
            document_id: response.document_id,
            kind: response.kind,
            total_chars: response.total_chars,
            total_sentences: response.total_sentences,
        });

        tracing::info!(
            document_id = %response.document_id,
            kind = %response.kind,
            bytes = size,
            chars = response.total_chars,
            sentences = response.total_sentences,
            replaced = ?previous.map(|p| p.id()),
            "Document loaded"
        );

        Ok(response)
    }
}
