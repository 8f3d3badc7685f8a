//! 프로파일 학습 단계
//!
//! 단어를 하나씩 넣어 n-gram 빈도를 쌓은 뒤 [`ProfileBuilder::build`]로
//! 변경 불가능한 [`LanguageProfile`]을 만듭니다.

use std::collections::HashMap;

use super::model::LanguageProfile;
use crate::text::{extract_token_into, MAX_NGRAM_LENGTH};

/// 언어 프로파일 빌더
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    name: String,
    max_ngram_length: usize,
    freq: HashMap<String, u64>,
    n_words: [u64; MAX_NGRAM_LENGTH],
}

impl ProfileBuilder {
    /// 빈 프로파일 빌더
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_ngram_length: MAX_NGRAM_LENGTH,
            freq: HashMap::new(),
            n_words: [0; MAX_NGRAM_LENGTH],
        }
    }

    pub(super) fn from_profile(profile: LanguageProfile) -> Self {
        Self {
            name: profile.name,
            max_ngram_length: MAX_NGRAM_LENGTH,
            freq: profile.freq,
            n_words: profile.n_words,
        }
    }

    /// 학습할 최대 n-gram 길이 설정 (1..=3으로 보정)
    pub fn with_max_ngram_length(mut self, max_ngram_length: usize) -> Self {
        self.max_ngram_length = max_ngram_length.clamp(1, MAX_NGRAM_LENGTH);
        self
    }

    /// 단어 하나 학습
    ///
    /// 단어의 모든 부분 n-gram(길이 1..=max) 빈도와 해당 길이의 총 빈도를 1씩 올립니다.
    /// 문자 체계가 섞인 n-gram도 셉니다. 공백이 섞여 있으면 토큰마다 따로 학습합니다.
    pub fn add(&mut self, word: &str) -> &mut Self {
        let mut grams = Vec::new();
        for token in word.split_whitespace() {
            extract_token_into(token, self.max_ngram_length, false, &mut grams);
        }

        for gram in grams {
            let order = gram.order();
            *self.freq.entry(gram.into_string()).or_insert(0) += 1;
            self.n_words[order - 1] += 1;
        }
        self
    }

    /// 여러 단어 학습
    pub fn add_all<'a, I>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for word in words {
            self.add(word);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 학습 종료
    pub fn build(self) -> LanguageProfile {
        LanguageProfile {
            name: self.name,
            freq: self.freq,
            n_words: self.n_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_single_chars() {
        let mut builder = ProfileBuilder::new("en_test");
        builder.add_all("a a a b b c c d e".split(' '));
        let profile = builder.build();

        assert_eq!(profile.count("a"), 3);
        assert_eq!(profile.count("b"), 2);
        assert_eq!(profile.count("e"), 1);
        assert_eq!(profile.totals(), [9, 0, 0]);
    }

    #[test]
    fn test_add_word_all_orders() {
        let mut builder = ProfileBuilder::new("en");
        builder.add("abc");
        let profile = builder.build();

        for gram in ["a", "b", "c", "ab", "bc", "abc"] {
            assert_eq!(profile.count(gram), 1, "n-gram '{}'", gram);
        }
        assert_eq!(profile.totals(), [3, 2, 1]);
    }

    #[test]
    fn test_max_ngram_length() {
        let mut builder = ProfileBuilder::new("en").with_max_ngram_length(2);
        builder.add("abc");
        let profile = builder.build();

        assert_eq!(profile.count("abc"), 0);
        assert_eq!(profile.totals(), [3, 2, 0]);
    }

    #[test]
    fn test_add_splits_whitespace() {
        let mut builder = ProfileBuilder::new("en");
        builder.add("ab cd");
        let profile = builder.build();

        assert_eq!(profile.count("bc"), 0);
        assert_eq!(profile.totals(), [4, 2, 0]);
    }

    #[test]
    fn test_mixed_script_counted() {
        let mut builder = ProfileBuilder::new("xx");
        builder.add("a新");
        let profile = builder.build();

        assert_eq!(profile.count("a新"), 1);
        assert_eq!(profile.totals(), [2, 1, 0]);
    }

    #[test]
    fn test_empty_word_is_noop() {
        let mut builder = ProfileBuilder::new("en");
        builder.add("").add("   ");
        assert_eq!(builder.build(), LanguageProfile::new("en"));
    }

    #[test]
    fn test_into_builder_keeps_data() {
        let mut builder = ProfileBuilder::new("ja_test");
        builder.add("あ");
        let profile = builder.build();

        let mut builder = profile.into_builder();
        builder.add("あい");
        let profile = builder.build();

        assert_eq!(profile.name(), "ja_test");
        assert_eq!(profile.count("あ"), 2);
        assert_eq!(profile.count("あい"), 1);
        assert_eq!(profile.totals(), [3, 1, 0]);
    }
}
