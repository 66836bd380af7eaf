//! In-Memory Document Store Implementation

use std::sync::{Arc, RwLock};

use crate::application::ports::DocumentStorePort;
use crate::domain::document::Transcript;

/// 内存文档存储
///
/// 同一时刻只持有一份 Transcript，读取方拿到的是 Arc 快照，
/// 替换不会影响正在使用旧文档的朗读
pub struct InMemoryDocumentStore {
    current: RwLock<Option<Arc<Transcript>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStorePort for InMemoryDocumentStore {
    fn current(&self) -> Option<Arc<Transcript>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, transcript: Arc<Transcript>) -> Option<Arc<Transcript>> {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        tracing::info!(
            document_id = %transcript.id(),
            kind = %transcript.kind(),
            sentences = transcript.sentence_count(),
            "Document replaced"
        );
        guard.replace(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{DocumentKind, NormalizedText};

    fn transcript(text: &str) -> Arc<Transcript> {
        Arc::new(Transcript::new(
            DocumentKind::PlainText,
            NormalizedText::new(text),
        ))
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryDocumentStore::new();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_replace_returns_previous() {
        let store = InMemoryDocumentStore::new();
        let first = transcript("First.");
        let second = transcript("Second.");

        assert!(store.replace(first.clone()).is_none());
        let previous = store.replace(second.clone()).unwrap();

        assert_eq!(previous.id(), first.id());
        assert_eq!(store.current().unwrap().id(), second.id());
    }

    #[test]
    fn test_old_snapshot_survives_replace() {
        let store = InMemoryDocumentStore::new();
        store.replace(transcript("Old text."));
        let held = store.current().unwrap();

        store.replace(transcript("New text."));

        assert_eq!(held.text().as_str(), "Old text.");
        assert_eq!(store.current().unwrap().text().as_str(), "New text.");
    }
}
