//! Command Handlers

mod chat_handlers;
mod narrate_handlers;
mod synthesize_handlers;

pub use chat_handlers::GenerateTextHandler;
pub use narrate_handlers::NarrateHandler;
pub use synthesize_handlers::SynthesizeHandler;
