//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod pdf;
pub mod speech;

pub use pdf::*;
pub use speech::*;
