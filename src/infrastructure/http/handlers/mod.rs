//! HTTP Handlers

mod document;
mod ping;
mod playback;
mod voice;
mod websocket;

pub use document::*;
pub use ping::*;
pub use playback::*;
pub use voice::*;
pub use websocket::*;
