//! 코퍼스 레지스트리
//!
//! 선택된 언어들의 프로파일을 하나의 인덱스 확률 테이블로 합칩니다.
//!
//! Add-k 스무딩:
//! P(g | lang) = (C(g) + k) / (N_len(g) + k*V)
//!
//! k, V는 테이블의 모든 언어에 같은 값을 씁니다.

use std::collections::HashSet;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::source::ProfileSource;
use super::table::CorpusTable;
use super::variant::ProfileVariant;
use crate::config::ConfigError;
use crate::profile::{LanguageProfile, ProfileError};

/// 코퍼스 구성 에러
#[derive(Debug, Error)]
pub enum CorpusError {
    /// 프로파일 로드 실패
    #[error("'{code}' 프로파일 오류: {source}")]
    Profile {
        code: String,
        #[source]
        source: ProfileError,
    },
    /// 프로파일 디렉토리 읽기 실패
    #[error("디렉토리 읽기 오류 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 공급원에 없는 언어 코드
    #[error("지원하지 않는 언어 코드: '{code}' (프로파일: {variant})")]
    UnknownLanguage { code: String, variant: ProfileVariant },
    /// 같은 언어 코드가 두 번 지정됨
    #[error("중복된 언어 코드: '{0}'")]
    DuplicateLanguage(String),
    /// 프로파일 이름과 요청한 코드가 다름
    #[error("프로파일 이름 불일치: 요청 '{expected}', 실제 '{actual}'")]
    NameMismatch { expected: String, actual: String },
    /// 사용할 언어가 없음
    #[error("사용할 수 있는 언어 프로파일이 없습니다")]
    NoLanguages,
    /// 인덱스가 언어 수 이상
    #[error("프로파일 인덱스 범위 초과: {index} (언어 수 {total})")]
    IndexOutOfRange { index: usize, total: usize },
    /// 이미 채워진 인덱스
    #[error("이미 사용된 프로파일 인덱스: {0}")]
    IndexReused(usize),
    /// 처음 지정한 언어 수와 다름
    #[error("언어 수 불일치: {expected} (요청 {actual})")]
    SizeMismatch { expected: usize, actual: usize },
    /// 채워지지 않은 인덱스가 남음
    #[error("채워지지 않은 프로파일 인덱스: {missing:?}")]
    IncompleteTable { missing: Vec<usize> },
    /// 설정 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Add-k 스무딩 상수
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    /// Add-k 스무딩 상수
    #[serde(default = "default_smoothing_k")]
    pub k: f64,
    /// 유효 어휘 크기 V
    #[serde(default = "default_vocab_size")]
    pub vocab_size: usize,
}

fn default_smoothing_k() -> f64 {
    0.5
}

fn default_vocab_size() -> usize {
    100
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            k: default_smoothing_k(),
            vocab_size: default_vocab_size(),
        }
    }
}

impl Smoothing {
    pub fn new(k: f64, vocab_size: usize) -> Self {
        Self { k, vocab_size }
    }

    /// (count + k) / (total + k*V)
    pub fn probability(&self, count: u64, total: u64) -> f64 {
        (count as f64 + self.k) / (total as f64 + self.k * self.vocab_size as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "smoothing.k는 양수여야 합니다: {}",
                self.k
            )));
        }
        if self.vocab_size == 0 {
            return Err(ConfigError::InvalidValue(
                "smoothing.vocab_size는 1 이상이어야 합니다".into(),
            ));
        }
        Ok(())
    }
}

/// 코퍼스 레지스트리
///
/// [`add_profile`](Self::add_profile)로 칸을 하나씩 채우고 [`finish`](Self::finish)로
/// 완성된 테이블을 얻습니다. 일부만 채워진 테이블은 만들지 않습니다.
#[derive(Debug, Default)]
pub struct CorpusRegistry {
    smoothing: Smoothing,
    codes: Vec<Option<String>>,
    probabilities: FxHashMap<String, Vec<f64>>,
}

impl CorpusRegistry {
    /// 기본 스무딩으로 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 스무딩 상수 지정
    pub fn with_smoothing(smoothing: Smoothing) -> Self {
        Self {
            smoothing,
            ..Self::default()
        }
    }

    /// 공급원에서 선택한 언어들로 테이블 생성
    ///
    /// - `codes`가 비어 있으면 공급원의 모든 언어 (코드 순 정렬)
    /// - 그 외에는 `codes[i]`가 인덱스 i
    /// - 없는 코드, 중복 코드, 이름이 다른 프로파일은 에러
    pub fn build(
        source: &dyn ProfileSource,
        codes: &[String],
        variant: ProfileVariant,
        smoothing: Smoothing,
    ) -> Result<CorpusTable, CorpusError> {
        smoothing.validate()?;

        let available = source.available(variant)?;
        let selected: Vec<String> = if codes.is_empty() {
            available.clone()
        } else {
            codes.to_vec()
        };

        if selected.is_empty() {
            return Err(CorpusError::NoLanguages);
        }

        let mut seen = HashSet::with_capacity(selected.len());
        for code in &selected {
            if !seen.insert(code.as_str()) {
                return Err(CorpusError::DuplicateLanguage(code.clone()));
            }
            if !available.contains(code) {
                return Err(CorpusError::UnknownLanguage {
                    code: code.clone(),
                    variant,
                });
            }
        }

        let total = selected.len();
        let mut registry = Self::with_smoothing(smoothing);
        for (index, code) in selected.iter().enumerate() {
            let profile = source.load(variant, code)?;
            if profile.name() != code {
                return Err(CorpusError::NameMismatch {
                    expected: code.clone(),
                    actual: profile.name().to_string(),
                });
            }
            registry.add_profile(&profile, index, total)?;
            log::debug!(
                "프로파일 등록: {} (인덱스 {}, n-gram {}개)",
                code,
                index,
                profile.len()
            );
        }

        let table = registry.finish()?;
        log::info!(
            "코퍼스 생성 완료: 언어 {}개, n-gram {}개, 프로파일 {}",
            table.len(),
            table.ngram_count(),
            variant
        );
        Ok(table)
    }

    /// 프로파일의 스무딩 확률을 인덱스 `index` 칸에 추가
    ///
    /// 첫 호출의 `total_languages`로 테이블 크기가 정해집니다.
    /// 검사를 모두 통과해야 테이블이 바뀝니다.
    pub fn add_profile(
        &mut self,
        profile: &LanguageProfile,
        index: usize,
        total_languages: usize,
    ) -> Result<(), CorpusError> {
        if index >= total_languages {
            return Err(CorpusError::IndexOutOfRange {
                index,
                total: total_languages,
            });
        }
        if !self.codes.is_empty() && self.codes.len() != total_languages {
            return Err(CorpusError::SizeMismatch {
                expected: self.codes.len(),
                actual: total_languages,
            });
        }
        if self.codes.get(index).is_some_and(Option::is_some) {
            return Err(CorpusError::IndexReused(index));
        }
        if self.codes.iter().flatten().any(|code| code == profile.name()) {
            return Err(CorpusError::DuplicateLanguage(profile.name().to_string()));
        }

        if self.codes.is_empty() {
            self.codes = vec![None; total_languages];
        }

        for (gram, count) in profile.iter() {
            let order = gram.chars().count();
            let probability = self.smoothing.probability(count, profile.total(order));
            let slots = self
                .probabilities
                .entry(gram.to_string())
                .or_insert_with(|| vec![0.0; total_languages]);
            slots[index] = probability;
        }

        self.codes[index] = Some(profile.name().to_string());
        Ok(())
    }

    /// 완성된 테이블 반환 (빈 칸이 있으면 에러)
    pub fn finish(self) -> Result<CorpusTable, CorpusError> {
        if self.codes.is_empty() {
            return Err(CorpusError::NoLanguages);
        }

        let missing: Vec<usize> = self
            .codes
            .iter()
            .enumerate()
            .filter(|(_, code)| code.is_none())
            .map(|(i, _)| i)
            .collect();
        if !missing.is_empty() {
            return Err(CorpusError::IncompleteTable { missing });
        }

        Ok(CorpusTable {
            language_codes: self.codes.into_iter().flatten().collect(),
            probabilities: self.probabilities,
            smoothing: self.smoothing,
        })
    }
}
