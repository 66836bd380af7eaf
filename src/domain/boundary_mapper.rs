//! 边界映射器
//!
//! 将语音引擎上报的字符偏移映射到句子索引

use super::text_segmenter::Sentence;

/// 基于句子长度前缀和的映射器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryMapper {
    /// 第 i 个元素为前 i+1 个句子的累计字符数（即第 i 句的结束偏移）
    cumulative_ends: Vec<usize>,
}

impl BoundaryMapper {
    pub fn new(sentences: &[Sentence]) -> Self {
        let mut total = 0;
        let cumulative_ends = sentences
            .iter()
            .map(|s| {
                total += s.char_len();
                total
            })
            .collect();

        Self { cumulative_ends }
    }

    /// 返回第一个累计结束偏移严格大于 `char_index` 的句子索引
    ///
    /// 偏移为负或超出最后一句末尾时返回 `None`；句中偏移（词级进度）
    /// 映射到其所在句子。结果对 `char_index` 单调不减
    pub fn map(&self, char_index: i64) -> Option<usize> {
        let index = usize::try_from(char_index).ok()?;
        let pos = self.cumulative_ends.partition_point(|&end| end <= index);
        (pos < self.cumulative_ends.len()).then_some(pos)
    }

    /// 覆盖的总字符数
    pub fn total_chars(&self) -> usize {
        self.cumulative_ends.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.cumulative_ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative_ends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::text_segmenter::segment;

    #[test]
    fn test_maps_to_enclosing_sentence() {
        let mapper = BoundaryMapper::new(&segment("Hello world. How are you?"));

        assert_eq!(mapper.map(0), Some(0));
        assert_eq!(mapper.map(5), Some(0));
        assert_eq!(mapper.map(11), Some(0));
        assert_eq!(mapper.map(12), Some(1));
        assert_eq!(mapper.map(15), Some(1));
        assert_eq!(mapper.map(24), Some(1));
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let mapper = BoundaryMapper::new(&segment("Hello world. How are you?"));

        assert_eq!(mapper.map(-1), None);
        assert_eq!(mapper.map(i64::MIN), None);
        assert_eq!(mapper.map(25), None);
        assert_eq!(mapper.map(1_000), None);
    }

    #[test]
    fn test_empty_sentence_list() {
        let mapper = BoundaryMapper::new(&[]);
        assert!(mapper.is_empty());
        assert_eq!(mapper.map(0), None);
        assert_eq!(mapper.total_chars(), 0);
    }

    #[test]
    fn test_monotonic_over_whole_range() {
        let sentences = segment("A. Bb? Ccc! Dddd. Tail without mark");
        let mapper = BoundaryMapper::new(&sentences);
        let total = mapper.total_chars() as i64;

        let mut previous = 0;
        for i in 0..total {
            let current = mapper.map(i).expect("in range");
            assert!(current >= previous, "map({}) = {} < {}", i, current, previous);
            assert!(sentences[current].start_offset <= i as usize);
            assert!((i as usize) < sentences[current].end_offset);
            previous = current;
        }
        assert_eq!(previous, sentences.len() - 1);
    }
}
