//! Document Context - Aggregate Root

use chrono::{DateTime, Utc};

use super::{DocumentId, DocumentKind, NormalizedText};
use crate::domain::boundary_mapper::BoundaryMapper;
use crate::domain::text_segmenter::{segment, Sentence};

/// Transcript 聚合根
///
/// 不变量:
/// - 创建后不可变，加载新文档时整体替换
/// - 句子区间恰好覆盖 `text`，拼接后可还原原文
#[derive(Debug, Clone)]
pub struct Transcript {
    id: DocumentId,
    kind: DocumentKind,
    text: NormalizedText,
    sentences: Vec<Sentence>,
    mapper: BoundaryMapper,
    loaded_at: DateTime<Utc>,
}

impl Transcript {
    /// 从规范化文本创建并分句
    pub fn new(kind: DocumentKind, text: NormalizedText) -> Self {
        let sentences = segment(text.as_str());
        let mapper = BoundaryMapper::new(&sentences);
        Self {
            id: DocumentId::new(),
            kind,
            text,
            sentences,
            mapper,
            loaded_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn mapper(&self) -> &BoundaryMapper {
        &self.mapper
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// 获取指定范围的句子
    pub fn sentences_range(&self, start: usize, limit: usize) -> &[Sentence] {
        let start = start.min(self.sentences.len());
        let end = start.saturating_add(limit).min(self.sentences.len());
        &self.sentences[start..end]
    }
}
