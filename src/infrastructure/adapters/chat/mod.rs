//! Chat Adapter - 对话补全客户端实现

mod fake_chat_client;
mod openrouter_client;

pub use fake_chat_client::{FakeChatClient, FAKE_NARRATION};
pub use openrouter_client::*;
