//! Infrastructure Adapters
//!
//! 六边形架构的出站适配器实现

pub mod chat;
pub mod tts;

pub use chat::*;
pub use tts::*;
