//! 文本分割器
//!
//! 将旁白文本按句子边界打包成适合 TTS 合成的批次：
//! 1. 空白（含换行）统一规整为单个空格
//! 2. 在 `.` `!` `?` 后紧跟空白处断句
//! 3. 贪心合并句子，直到超过最大字符数

/// 默认每批最大字符数
pub const DEFAULT_MAX_CHARS: usize = 200;

/// 文本分割配置
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// 每批最大字符数（按 char 计数）
    /// 单句超长时，该句单独成批，不再继续切分
    pub max_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl SegmentConfig {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

/// 检查是否为句末标点
#[inline]
fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 空白规整：连续空白（空格、制表符、换行）合并为单个空格，并去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 按句子边界分割（输入需已规整空白）
///
/// 句末标点保留在前一句中
pub fn split_sentences(normalized: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = normalized.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_sentence_terminator(ch) {
            continue;
        }
        if let Some(&(next_i, next_ch)) = chars.peek() {
            if next_ch.is_whitespace() {
                let end = i + ch.len_utf8();
                let sentence = normalized[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = next_i;
            }
        }
    }

    let rest = normalized[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// 将文本分割成批次
///
/// 贪心打包：当前批次追加下一句（以空格连接）后不超过 `max_chars` 则追加，
/// 否则先输出当前批次再开新批次。
/// 各批次以单个空格拼接即为规整后的原文。
pub fn split_into_batches(text: &str, config: &SegmentConfig) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    let mut batches: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in split_sentences(&normalized) {
        let sentence_chars = sentence.chars().count();

        if current.is_empty() {
            current.push_str(sentence);
            current_chars = sentence_chars;
            continue;
        }

        if current_chars + 1 + sentence_chars <= config.max_chars {
            current.push(' ');
            current.push_str(sentence);
            current_chars += 1 + sentence_chars;
        } else {
            batches.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_chars = sentence_chars;
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_batches(text: &str) -> Vec<String> {
        split_into_batches(text, &SegmentConfig::default())
    }

    fn sentence_of(len: usize, fill: char) -> String {
        let mut s: String = std::iter::repeat(fill).take(len - 1).collect();
        s.push('.');
        s
    }

    #[test]
    fn test_short_text_single_batch() {
        let batches = default_batches("Hello there. This is a test! Really?");
        assert_eq!(batches, vec!["Hello there. This is a test! Really?"]);
    }

    #[test]
    fn test_two_long_sentences_split() {
        let a = sentence_of(150, 'a');
        let b = sentence_of(150, 'b');
        let text = format!("{} {}", a, b);

        let batches = split_into_batches(&text, &SegmentConfig::new(200));
        assert_eq!(batches, vec![a, b]);
    }

    #[test]
    fn test_whitespace_normalized() {
        let text = "  The storm   rises.\n\nThe night\tfalls!  ";
        let batches = default_batches(text);
        assert_eq!(batches, vec!["The storm rises. The night falls!"]);
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        assert!(default_batches("").is_empty());
        assert!(default_batches(" \n\t ").is_empty());
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let long = sentence_of(300, 'x');
        let text = format!("Short one. {} Tail.", long);

        let batches = split_into_batches(&text, &SegmentConfig::new(200));
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], "Short one.");
        assert_eq!(batches[1], long);
        assert_eq!(batches[2], "Tail.");
    }

    #[test]
    fn test_terminator_without_whitespace_is_not_boundary() {
        let sentences = split_sentences("Version 1.5 is out. Pi is 3.14!");
        assert_eq!(sentences, vec!["Version 1.5 is out.", "Pi is 3.14!"]);
    }

    #[test]
    fn test_boundary_fills_exactly_to_budget() {
        // "aaaa." + " " + "bbbb." = 11 字符
        let batches = split_into_batches("aaaa. bbbb. cccc.", &SegmentConfig::new(11));
        assert_eq!(batches, vec!["aaaa. bbbb.", "cccc."]);
    }

    #[test]
    fn test_batches_reconstruct_normalized_text() {
        let samples = [
            "The door creaks open. Darkness spills out!\nA voice whispers... Who goes there?",
            "No punctuation at all just words flowing on and on",
            "One! Two? Three. Four! Five? Six. Seven! Eight? Nine. Ten!",
            "Ünïcödé sentences work too. ¿Verdad? Sí!   Claro.",
        ];

        for budget in [1, 10, 25, 80, 200] {
            let config = SegmentConfig::new(budget);
            for text in samples {
                let batches = split_into_batches(text, &config);
                assert_eq!(
                    normalize_whitespace(&batches.join(" ")),
                    normalize_whitespace(text),
                    "budget {}",
                    budget
                );
            }
        }
    }

    #[test]
    fn test_batches_respect_budget_unless_single_sentence() {
        let text = "It begins. The wind howls across the empty plain, carrying the scent of rain. \
                    Somewhere, a bell tolls! Is anyone listening? The last light fades, and the \
                    world holds its breath for what comes next. End.";

        for budget in [15, 40, 60, 120] {
            let config = SegmentConfig::new(budget);
            for batch in split_into_batches(text, &config) {
                let is_single_sentence = split_sentences(&batch).len() == 1;
                assert!(
                    batch.chars().count() <= budget || is_single_sentence,
                    "batch over budget {}: {:?}",
                    budget,
                    batch
                );
            }
        }
    }

    #[test]
    fn test_sentence_order_preserved() {
        let text = "First. Second! Third? Fourth. Fifth!";
        let normalized = normalize_whitespace(text);
        let expected = split_sentences(&normalized);

        let batches = split_into_batches(text, &SegmentConfig::new(14));
        let flattened: Vec<String> = batches
            .iter()
            .flat_map(|b| split_sentences(b).into_iter().map(str::to_string).collect::<Vec<_>>())
            .collect();

        assert_eq!(flattened, expected);
    }
}
