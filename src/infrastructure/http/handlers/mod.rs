//! HTTP Handlers

mod chat;
mod narrate;
mod ping;
mod tts;

pub use chat::*;
pub use narrate::*;
pub use ping::*;
pub use tts::*;
