//! 감지 설정 구성 및 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::corpus::{ProfileVariant, Smoothing};
use crate::detector::DetectorConfig;

/// 설정 에러
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 알 수 없는 프로파일 변형 이름
    #[error("알 수 없는 프로파일 변형: '{0}' (\"\", \"short-text\", \"merged-average\" 중 하나)")]
    UnknownVariant(String),
    /// 범위를 벗어난 설정값
    #[error("잘못된 설정값: {0}")]
    InvalidValue(String),
    /// 설정 파일 읽기/쓰기 실패
    #[error("설정 파일 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 파일 파싱/직렬화 실패
    #[error("설정 파싱 오류: {0}")]
    Parse(String),
}

/// 언어 감지 전체 설정
///
/// 파일에 없는 필드는 기본값으로 채웁니다.
///
/// ```json
/// {
///   "languages": ["en", "de"],
///   "profile": "short-text",
///   "smoothing": { "k": 0.5, "vocab_size": 100 },
///   "max_trials": 1000,
///   "probability_threshold": 0.1
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DetectionSettings {
    /// 감지 대상 언어 코드 (비어 있으면 공급원의 모든 언어)
    #[serde(default)]
    pub languages: Vec<String>,
    /// 사용할 프로파일 변형
    #[serde(default)]
    pub profile: ProfileVariant,
    /// 스무딩 상수
    #[serde(default)]
    pub smoothing: Smoothing,
    /// 감지기 설정
    #[serde(flatten)]
    pub detector: DetectorConfig,
}

impl DetectionSettings {
    /// 쉼표로 구분한 언어 코드 목록으로 빌더 시작 (예: "en,de")
    pub fn from_iso_codes(list: &str) -> SettingsBuilder {
        SettingsBuilder::new().with_languages(parse_iso_codes(list))
    }

    /// 모든 언어를 대상으로 빌더 시작
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(code) = self.languages.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(format!(
                "빈 언어 코드: '{}'",
                code
            )));
        }
        self.smoothing.validate()?;
        self.detector.validate()
    }
}

/// [`DetectionSettings`] 빌더
///
/// 프로파일 변형 이름은 [`build`](Self::build)에서 검사합니다.
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    languages: Vec<String>,
    profile: String,
    smoothing: Smoothing,
    detector: DetectorConfig,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 언어 코드 목록 설정
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// 프로파일 변형 이름 설정 ("", "short-text", "merged-average")
    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = profile.to_string();
        self
    }

    /// 스무딩 상수 설정
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// 감지기 설정
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// 설정 완성
    pub fn build(self) -> Result<DetectionSettings, ConfigError> {
        let settings = DetectionSettings {
            languages: self.languages,
            profile: self.profile.parse()?,
            smoothing: self.smoothing,
            detector: self.detector,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// 쉼표로 구분한 언어 코드 파싱 (공백 제거, 빈 항목 무시)
pub fn parse_iso_codes(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// 설정 파일 로드
pub fn load_settings(path: impl AsRef<Path>) -> Result<DetectionSettings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let settings: DetectionSettings =
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

/// 설정 파일 로드 (파일 없거나 잘못되면 기본값)
pub fn load_settings_or_default(path: impl AsRef<Path>) -> DetectionSettings {
    let path = path.as_ref();
    match load_settings(path) {
        Ok(settings) => settings,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            DetectionSettings::default()
        }
        Err(e) => {
            log::warn!("설정 파일 무시 ({}): {}", path.display(), e);
            DetectionSettings::default()
        }
    }
}

/// 설정 파일 저장
pub fn save_settings(
    path: impl AsRef<Path>,
    settings: &DetectionSettings,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(settings).map_err(|e| ConfigError::Parse(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_codes() {
        assert_eq!(parse_iso_codes("en,de"), vec!["en", "de"]);
        assert_eq!(parse_iso_codes(" en , ,de,, fr "), vec!["en", "de", "fr"]);
        assert!(parse_iso_codes("").is_empty());
        assert!(parse_iso_codes(" , ").is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let settings = DetectionSettings::from_iso_codes("en,de").build().unwrap();
        assert_eq!(settings.languages, vec!["en", "de"]);
        assert_eq!(settings.profile, ProfileVariant::Default);
        assert_eq!(settings.smoothing, Smoothing::default());
        assert_eq!(settings.detector, DetectorConfig::default());
    }

    #[test]
    fn test_builder_profile() {
        let settings = DetectionSettings::from_iso_codes("ja")
            .with_profile("short-text")
            .build()
            .unwrap();
        assert_eq!(settings.profile, ProfileVariant::ShortText);

        let all = DetectionSettings::builder()
            .with_profile("merged-average")
            .build()
            .unwrap();
        assert!(all.languages.is_empty());
        assert_eq!(all.profile, ProfileVariant::MergedAverage);
    }

    #[test]
    fn test_builder_unknown_variant() {
        let result = DetectionSettings::from_iso_codes("en")
            .with_profile("bogus")
            .build();
        assert!(matches!(result, Err(ConfigError::UnknownVariant(ref v)) if v == "bogus"));
    }

    #[test]
    fn test_builder_invalid_values() {
        let result = DetectionSettings::builder()
            .with_smoothing(Smoothing::new(-1.0, 100))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));

        let result = DetectionSettings::builder()
            .with_detector(DetectorConfig::new().with_trials(5, 0))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_flattened_fields() {
        let json = r#"{
            "languages": ["en", "fr"],
            "profile": "short-text",
            "smoothing": { "k": 1.0 },
            "max_trials": 50,
            "seed": 9,
            "normalizer": { "strip_urls": false }
        }"#;
        let settings: DetectionSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.languages, vec!["en", "fr"]);
        assert_eq!(settings.profile, ProfileVariant::ShortText);
        assert!((settings.smoothing.k - 1.0).abs() < f64::EPSILON);
        assert_eq!(settings.smoothing.vocab_size, 100);
        assert_eq!(settings.detector.max_trials, 50);
        assert_eq!(settings.detector.min_trials, 7);
        assert_eq!(settings.detector.seed, 9);
        assert!(!settings.detector.normalizer.strip_urls);
        assert!(settings.detector.normalizer.strip_minority_latin);
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings: DetectionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, DetectionSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = DetectionSettings::from_iso_codes("en,de")
            .with_profile("short-text")
            .with_detector(DetectorConfig::new().with_seed(3))
            .build()
            .unwrap();
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_settings(&missing), Err(ConfigError::Io(_))));
        assert_eq!(load_settings_or_default(&missing), DetectionSettings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(load_settings(&broken), Err(ConfigError::Parse(_))));
        assert_eq!(load_settings_or_default(&broken), DetectionSettings::default());

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"max_ngram_length": 7}"#).unwrap();
        assert!(matches!(load_settings(&invalid), Err(ConfigError::InvalidValue(_))));
    }
}
