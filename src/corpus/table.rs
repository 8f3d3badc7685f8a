//! 통합 n-gram 확률 테이블

use rustc_hash::FxHashMap;

use super::registry::Smoothing;

/// 언어별 스무딩 확률 테이블
///
/// - `language_codes[i]`는 모든 확률 배열의 i번째 칸에 해당
/// - 모든 확률 배열의 길이는 언어 수와 같음
/// - 해당 언어가 본 적 없는 n-gram은 0.0
///
/// [`CorpusRegistry`](super::CorpusRegistry)로만 만들 수 있고 만든 뒤에는 읽기 전용입니다.
#[derive(Debug, Clone)]
pub struct CorpusTable {
    pub(super) language_codes: Vec<String>,
    pub(super) probabilities: FxHashMap<String, Vec<f64>>,
    pub(super) smoothing: Smoothing,
}

impl CorpusTable {
    /// 언어 코드 (인덱스 순서)
    pub fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    /// 언어 수
    pub fn len(&self) -> usize {
        self.language_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.language_codes.is_empty()
    }

    /// 언어 코드의 인덱스
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.language_codes.iter().position(|c| c == code)
    }

    /// n-gram의 언어별 확률 (어느 언어도 본 적 없으면 None)
    pub fn probabilities(&self, gram: &str) -> Option<&[f64]> {
        self.probabilities.get(gram).map(Vec::as_slice)
    }

    /// n-gram의 특정 언어 확률
    pub fn probability(&self, gram: &str, code: &str) -> f64 {
        self.index_of(code)
            .and_then(|i| self.probabilities(gram).map(|probs| probs[i]))
            .unwrap_or(0.0)
    }

    /// 테이블에 있는 서로 다른 n-gram 수
    pub fn ngram_count(&self) -> usize {
        self.probabilities.len()
    }

    /// 테이블 생성에 사용된 스무딩 상수
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }
}
