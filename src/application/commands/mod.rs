//! 应用层 - 命令
//!
//! 每个 HTTP 用例对应一个命令及其处理器

mod chat_commands;
mod narrate_commands;
mod synthesize_commands;

pub mod handlers;

pub use chat_commands::*;
pub use narrate_commands::*;
pub use synthesize_commands::*;
