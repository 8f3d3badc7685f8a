//! 언어 프로파일 로드 및 저장
//!
//! JSON 형식의 n-gram 빈도 프로파일을 읽고 씁니다.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::builder::ProfileBuilder;
use crate::text::MAX_NGRAM_LENGTH;

/// 프로파일 로드/파싱 에러
#[derive(Debug, Error)]
pub enum ProfileError {
    /// 파일 읽기 실패
    #[error("파일 읽기 오류: {0}")]
    Io(#[from] std::io::Error),
    /// JSON 파싱 실패
    #[error("JSON 파싱 오류: {0}")]
    Parse(String),
    /// 프로파일 형식 오류
    #[error("프로파일 형식 오류: {0}")]
    Format(String),
}

/// 언어 프로파일
///
/// 한 언어의 n-gram 빈도와 길이별 총 빈도를 저장합니다.
/// 만들어진 뒤에는 바뀌지 않으며, 데이터를 더하려면 [`LanguageProfile::into_builder`]를 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    /// 언어 코드 또는 변형 이름
    pub(super) name: String,
    /// n-gram → 빈도
    #[serde(serialize_with = "ordered_freq")]
    pub(super) freq: HashMap<String, u64>,
    /// 길이 1, 2, 3 n-gram의 총 빈도
    pub(super) n_words: [u64; MAX_NGRAM_LENGTH],
}

impl LanguageProfile {
    /// 빈 프로파일 생성
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            freq: HashMap::new(),
            n_words: [0; MAX_NGRAM_LENGTH],
        }
    }

    /// JSON 파일에서 프로파일 로드
    ///
    /// # 파일 형식
    /// ```json
    /// {
    ///   "name": "en",
    ///   "freq": { "a": 3, "ab": 1 },
    ///   "n_words": [3, 1, 0]
    /// }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// 리더에서 프로파일 로드
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProfileError> {
        let value: serde_json::Value =
            serde_json::from_reader(reader).map_err(|e| ProfileError::Parse(e.to_string()))?;

        Self::from_json_value(&value)
    }

    /// JSON 문자열에서 프로파일 로드
    pub fn from_json(json_str: &str) -> Result<Self, ProfileError> {
        let value: serde_json::Value =
            serde_json::from_str(json_str).map_err(|e| ProfileError::Parse(e.to_string()))?;

        Self::from_json_value(&value)
    }

    /// serde_json::Value에서 프로파일 생성
    fn from_json_value(value: &serde_json::Value) -> Result<Self, ProfileError> {
        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProfileError::Format("name 필드가 없습니다".into()))?;

        // 빈도 파싱
        let freq_obj = value
            .get("freq")
            .and_then(|v| v.as_object())
            .ok_or_else(|| ProfileError::Format("freq 필드가 없습니다".into()))?;

        let mut freq = HashMap::with_capacity(freq_obj.len());
        for (gram, val) in freq_obj {
            let order = gram.chars().count();
            if order == 0 || order > MAX_NGRAM_LENGTH {
                return Err(ProfileError::Format(format!(
                    "잘못된 n-gram 길이: '{}' (expected 1..={})",
                    gram, MAX_NGRAM_LENGTH
                )));
            }
            if gram.chars().any(char::is_whitespace) {
                return Err(ProfileError::Format(format!(
                    "공백이 포함된 n-gram: '{}'",
                    gram
                )));
            }
            let count = as_count(val).ok_or_else(|| {
                ProfileError::Format(format!("유효하지 않은 빈도값: {}", gram))
            })?;
            freq.insert(gram.clone(), count);
        }

        // 길이별 총 빈도 파싱
        let totals = value
            .get("n_words")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProfileError::Format("n_words 필드가 없습니다".into()))?;

        if totals.len() != MAX_NGRAM_LENGTH {
            return Err(ProfileError::Format(format!(
                "n_words 길이 오류: {} (expected {})",
                totals.len(),
                MAX_NGRAM_LENGTH
            )));
        }

        let mut n_words = [0u64; MAX_NGRAM_LENGTH];
        for (slot, val) in n_words.iter_mut().zip(totals) {
            *slot = as_count(val).ok_or_else(|| {
                ProfileError::Format(format!("유효하지 않은 n_words 값: {}", val))
            })?;
        }

        Ok(Self {
            name: name.to_string(),
            freq,
            n_words,
        })
    }

    /// JSON 문자열로 직렬화 (n-gram 키는 정렬됨)
    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// 들여쓰기된 JSON 문자열로 직렬화
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// 프로파일 이름 (언어 코드)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// n-gram 빈도 조회
    pub fn count(&self, gram: &str) -> u64 {
        self.freq.get(gram).copied().unwrap_or(0)
    }

    /// 길이 `order` n-gram의 총 빈도 (범위 밖이면 0)
    pub fn total(&self, order: usize) -> u64 {
        order
            .checked_sub(1)
            .and_then(|i| self.n_words.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// 길이 1, 2, 3 총 빈도
    pub fn totals(&self) -> [u64; MAX_NGRAM_LENGTH] {
        self.n_words
    }

    /// (n-gram, 빈도) 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.freq.iter().map(|(gram, &count)| (gram.as_str(), count))
    }

    /// 서로 다른 n-gram 수
    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// 데이터를 더 학습시키기 위해 빌더로 전환
    pub fn into_builder(self) -> ProfileBuilder {
        ProfileBuilder::from_profile(self)
    }
}

/// JSON 숫자를 빈도로 변환 (정수 또는 소수부 없는 실수 "0.0")
fn as_count(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn ordered_freq<S: serde::Serializer>(
    freq: &HashMap<String, u64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let ordered: BTreeMap<&String, &u64> = freq.iter().collect();
    ordered.serialize(serializer)
}
