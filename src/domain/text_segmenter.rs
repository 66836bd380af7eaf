//! 文本分句器
//!
//! 将规范化文本切分为带偏移量的有序句子
//!
//! 偏移量以字符（Unicode 标量值）计，所有句子的区间恰好覆盖整个文本，
//! 按顺序拼接句子内容可逐字节还原原文

use serde::{Deserialize, Serialize};

/// 分句配置
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// 句末标点（包含在当前句子内，之后立即开始新句子）
    pub terminal_marks: Vec<char>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            terminal_marks: vec!['.', '!', '?'],
        }
    }
}

impl SegmentConfig {
    #[inline]
    fn is_terminal(&self, ch: char) -> bool {
        self.terminal_marks.contains(&ch)
    }
}

/// 句子
///
/// 不变量:
/// - `start_offset < end_offset`
/// - `text` 的字符数等于 `end_offset - start_offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Sentence {
    pub fn char_len(&self) -> usize {
        self.end_offset - self.start_offset
    }
}

/// 按配置分句
///
/// 从左到右贪婪扫描，遇到句末标点时将其并入当前句子；
/// 没有任何句末标点时整段文本为一句，最后一个标点之后的剩余内容单独成句
pub fn segment_with(text: &str, config: &SegmentConfig) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut offset = 0;

    for ch in text.chars() {
        current.push(ch);
        offset += 1;

        if config.is_terminal(ch) {
            sentences.push(Sentence {
                index: sentences.len(),
                text: std::mem::take(&mut current),
                start_offset: start,
                end_offset: offset,
            });
            start = offset;
        }
    }

    if !current.is_empty() {
        sentences.push(Sentence {
            index: sentences.len(),
            text: current,
            start_offset: start,
            end_offset: offset,
        });
    }

    sentences
}

/// 使用默认配置分句（便捷方法）
pub fn segment(text: &str) -> Vec<Sentence> {
    segment_with(text, &SegmentConfig::default())
}
