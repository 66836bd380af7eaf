//! Document Store Port - 当前文档存储
//!
//! 只保存一份已加载的 Transcript，替换是原子的
//! 具体实现在 infrastructure/memory 层

use std::sync::Arc;

use crate::domain::document::Transcript;

/// Document Store Port
pub trait DocumentStorePort: Send + Sync {
    /// 获取当前文档
    fn current(&self) -> Option<Arc<Transcript>>;

    /// 整体替换当前文档，返回被替换的旧文档
    fn replace(&self, transcript: Arc<Transcript>) -> Option<Arc<Transcript>>;
}
