//! 언어 감지기
//!
//! 정규화 → n-gram 추출 → 무작위 시행 스코어링 → 순위 결정

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use super::config::DetectorConfig;
use super::result::DetectionResult;
use super::trials::run_trials;
use crate::config::{ConfigError, DetectionSettings};
use crate::corpus::{CorpusError, CorpusRegistry, CorpusTable, ProfileSource};
use crate::text::{extract, Normalizer};

/// 언어 감지기
///
/// 생성 후에는 변경되지 않으므로 `Arc`로 감싸 여러 스레드에서 동시에 쓸 수 있습니다.
/// 호출마다 필요한 상태(특징 목록, 난수 생성기, 확률 벡터)는 호출 안에서만 만듭니다.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    table: CorpusTable,
    config: DetectorConfig,
    normalizer: Normalizer,
}

impl LanguageDetector {
    /// 테이블과 설정으로 감지기 생성
    pub fn new(table: CorpusTable, config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let normalizer = Normalizer::with_policy(config.normalizer);
        Ok(Self {
            table,
            config,
            normalizer,
        })
    }

    /// 설정에 따라 공급원에서 코퍼스를 만들고 감지기 생성
    pub fn from_settings(
        source: &dyn ProfileSource,
        settings: &DetectionSettings,
    ) -> Result<Self, CorpusError> {
        settings.validate()?;
        let table = CorpusRegistry::build(
            source,
            &settings.languages,
            settings.profile,
            settings.smoothing,
        )?;
        Ok(Self::new(table, settings.detector.clone())?)
    }

    pub fn table(&self) -> &CorpusTable {
        &self.table
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// 감지 대상 언어 코드
    pub fn language_codes(&self) -> &[String] {
        self.table.language_codes()
    }

    /// 텍스트의 언어 후보를 확률 내림차순으로 반환
    ///
    /// 결과는 비어 있지 않습니다. 근거가 부족하면 `[("und", 0.0)]`을 반환합니다.
    /// 같은 텍스트와 같은 테이블/설정이면 항상 같은 결과입니다.
    pub fn detect_all(&self, text: &str) -> Vec<DetectionResult> {
        let sanitized = self.normalizer.normalize(truncate_chars(text, self.config.max_text_chars));
        let features = self.features(&sanitized);

        if features.is_empty() || features.len() < self.config.min_ngram_count {
            log::debug!(
                "n-gram 부족 ({}개), 판정 불가: '{}'",
                features.len(),
                sanitized
            );
            return vec![DetectionResult::undetermined()];
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed_for(&sanitized));
        let outcome = run_trials(&features, self.table.len(), &self.config, &mut rng);
        log::debug!(
            "시행 {}회, n-gram {}개: '{}'",
            outcome.trials,
            features.len(),
            sanitized
        );

        self.rank(&outcome.probabilities)
    }

    /// 선두 언어 코드만 반환 (판정 불가면 "und")
    pub fn detect(&self, text: &str) -> String {
        self.detect_all(text)
            .into_iter()
            .next()
            .map(|result| result.iso_code)
            .unwrap_or_else(|| DetectionResult::undetermined().iso_code)
    }

    /// 테이블에 있는 n-gram의 언어별 확률 목록 (중복 유지)
    fn features(&self, sanitized: &str) -> Vec<&[f64]> {
        extract(sanitized, self.config.max_ngram_length)
            .iter()
            .filter_map(|gram| self.table.probabilities(gram.as_str()))
            .collect()
    }

    /// 정규화된 텍스트와 설정 시드로 결정되는 시행 시드
    ///
    /// 고정 폭(리틀 엔디언 u64)으로만 해시하므로 플랫폼과 무관합니다.
    fn seed_for(&self, sanitized: &str) -> u64 {
        let mut bytes = Vec::with_capacity(sanitized.len() + 8);
        bytes.extend_from_slice(sanitized.as_bytes());
        bytes.extend_from_slice(&(self.config.max_ngram_length as u64).to_le_bytes());
        xxh3_64_with_seed(&bytes, self.config.seed)
    }

    /// 임계값을 넘는 언어를 확률 내림차순(같으면 코드순)으로 정렬
    fn rank(&self, probabilities: &[f64]) -> Vec<DetectionResult> {
        let mut ranked: Vec<DetectionResult> = self
            .table
            .language_codes()
            .iter()
            .zip(probabilities)
            .filter(|&(_, &p)| p > self.config.probability_threshold)
            .map(|(code, &p)| DetectionResult::new(code.clone(), p))
            .collect();

        if ranked.is_empty() {
            return vec![DetectionResult::undetermined()];
        }

        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.iso_code.cmp(&b.iso_code))
        });
        ranked
    }
}

/// 앞에서부터 최대 `max_chars`글자
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
