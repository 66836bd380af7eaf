//! Memory Layer - In-Memory State Management
//!
//! 实现 DocumentStore，保存当前加载的文档

mod document_store;

pub use document_store::InMemoryDocumentStore;
