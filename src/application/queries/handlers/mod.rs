//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod document_handlers;
mod playback_handlers;

pub use document_handlers::*;
pub use playback_handlers::*;
