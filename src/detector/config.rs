//! 감지기 설정
//!
//! 스코어링 및 판정에 사용되는 설정값 정의

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::text::{NormalizerPolicy, MAX_NGRAM_LENGTH};

/// 언어 감지 설정
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// 특징으로 쓰는 최대 n-gram 길이 (1..=3)
    #[serde(default = "default_max_ngram_length")]
    pub max_ngram_length: usize,

    /// 분석할 최대 글자 수 (넘으면 앞부분만 사용)
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// 최대 시행 횟수
    #[serde(default = "default_max_trials")]
    pub max_trials: usize,

    /// 수렴 판정 전에 반드시 수행할 시행 횟수
    #[serde(default = "default_min_trials")]
    pub min_trials: usize,

    /// 선두 언어 평균 확률의 변화가 이 값보다 작으면 중단
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,

    /// 이 확률 이하인 언어는 결과에서 제외
    /// 선두 언어도 이 값 이하면 "und"
    #[serde(default = "default_probability_threshold")]
    pub probability_threshold: f64,

    /// 판정에 필요한 최소 n-gram 수 (테이블에 있는 것만 셈)
    #[serde(default = "default_min_ngram_count")]
    pub min_ngram_count: usize,

    /// 본 적 없는 n-gram 하한값 계수 (하한 = alpha / 10000)
    #[serde(default = "default_floor_alpha")]
    pub floor_alpha: f64,

    /// 시행마다 floor_alpha에 더하는 정규분포 잡음의 표준편차
    #[serde(default = "default_floor_alpha_width")]
    pub floor_alpha_width: f64,

    /// 시행 난수 시드에 섞는 값
    #[serde(default)]
    pub seed: u64,

    /// 텍스트 정규화 정책
    #[serde(default)]
    pub normalizer: NormalizerPolicy,
}

fn default_max_ngram_length() -> usize {
    MAX_NGRAM_LENGTH
}

fn default_max_text_chars() -> usize {
    3000
}

fn default_max_trials() -> usize {
    1000
}

fn default_min_trials() -> usize {
    7
}

fn default_convergence_threshold() -> f64 {
    1e-5
}

fn default_probability_threshold() -> f64 {
    0.1
}

fn default_min_ngram_count() -> usize {
    1
}

fn default_floor_alpha() -> f64 {
    0.5
}

fn default_floor_alpha_width() -> f64 {
    0.05
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_ngram_length: default_max_ngram_length(),
            max_text_chars: default_max_text_chars(),
            max_trials: default_max_trials(),
            min_trials: default_min_trials(),
            convergence_threshold: default_convergence_threshold(),
            probability_threshold: default_probability_threshold(),
            min_ngram_count: default_min_ngram_count(),
            floor_alpha: default_floor_alpha(),
            floor_alpha_width: default_floor_alpha_width(),
            seed: 0,
            normalizer: NormalizerPolicy::default(),
        }
    }
}

impl DetectorConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 최대 n-gram 길이 설정
    pub fn with_max_ngram_length(mut self, max_ngram_length: usize) -> Self {
        self.max_ngram_length = max_ngram_length;
        self
    }

    /// 최대 글자 수 설정
    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    /// 시행 횟수 범위 설정
    pub fn with_trials(mut self, min_trials: usize, max_trials: usize) -> Self {
        self.min_trials = min_trials;
        self.max_trials = max_trials;
        self
    }

    /// 수렴 임계값 설정
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// 확률 임계값 설정
    pub fn with_probability_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = threshold;
        self
    }

    /// 최소 n-gram 수 설정
    pub fn with_min_ngram_count(mut self, count: usize) -> Self {
        self.min_ngram_count = count;
        self
    }

    /// 시드 설정
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 정규화 정책 설정
    pub fn with_normalizer(mut self, policy: NormalizerPolicy) -> Self {
        self.normalizer = policy;
        self
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_NGRAM_LENGTH).contains(&self.max_ngram_length) {
            return Err(ConfigError::InvalidValue(format!(
                "max_ngram_length는 1..={} 범위여야 합니다: {}",
                MAX_NGRAM_LENGTH, self.max_ngram_length
            )));
        }
        if self.max_text_chars == 0 {
            return Err(ConfigError::InvalidValue(
                "max_text_chars는 1 이상이어야 합니다".into(),
            ));
        }
        if self.max_trials == 0 {
            return Err(ConfigError::InvalidValue("max_trials는 1 이상이어야 합니다".into()));
        }
        if self.min_trials > self.max_trials {
            return Err(ConfigError::InvalidValue(format!(
                "min_trials({})가 max_trials({})보다 큽니다",
                self.min_trials, self.max_trials
            )));
        }
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "convergence_threshold는 0 이상이어야 합니다: {}",
                self.convergence_threshold
            )));
        }
        if !(0.0..1.0).contains(&self.probability_threshold) {
            return Err(ConfigError::InvalidValue(format!(
                "probability_threshold는 [0, 1) 범위여야 합니다: {}",
                self.probability_threshold
            )));
        }
        if !(self.floor_alpha.is_finite() && self.floor_alpha > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "floor_alpha는 양수여야 합니다: {}",
                self.floor_alpha
            )));
        }
        if !(self.floor_alpha_width.is_finite() && self.floor_alpha_width >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "floor_alpha_width는 0 이상이어야 합니다: {}",
                self.floor_alpha_width
            )));
        }
        Ok(())
    }
}
