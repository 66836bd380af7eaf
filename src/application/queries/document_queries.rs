//! Document Queries

/// 获取当前文档概要查询
#[derive(Debug, Clone)]
pub struct GetDocument;

/// 获取当前文档句子查询（分页）
#[derive(Debug, Clone)]
pub struct GetSentences {
    pub start_index: Option<usize>,
    pub limit: Option<usize>,
}
