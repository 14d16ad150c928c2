//! Domain Layer - 领域层
//!
//! - Narration: 旁白与分段值对象
//! - Text Segmenter: 句子边界分批

mod narration;
mod text_segmenter;

pub use narration::{Narration, NarrationSegment, TextSegment};
pub use text_segmenter::{
    normalize_whitespace, split_into_batches, split_sentences,
    SegmentConfig, DEFAULT_MAX_CHARS,
};
