//! 언어 감지
//!
//! 코퍼스 테이블 위에서 무작위 시행 베이즈 스코어링으로 언어 순위를 매깁니다.
//!
//! # 사용 예시
//!
//! ```
//! use langdetect::corpus::CorpusRegistry;
//! use langdetect::detector::{DetectorConfig, LanguageDetector};
//! use langdetect::profile::ProfileBuilder;
//!
//! let mut en = ProfileBuilder::new("en");
//! en.add_all("the quick brown fox jumps over the lazy dog".split(' '));
//! let mut de = ProfileBuilder::new("de");
//! de.add_all("der schnelle braune fuchs springt über den faulen hund".split(' '));
//!
//! let mut registry = CorpusRegistry::new();
//! registry.add_profile(&en.build(), 0, 2).unwrap();
//! registry.add_profile(&de.build(), 1, 2).unwrap();
//!
//! let detector = LanguageDetector::new(registry.finish().unwrap(), DetectorConfig::default())
//!     .unwrap();
//! assert_eq!(detector.detect("the lazy fox"), "en");
//! assert_eq!(detector.detect("1234"), "und");
//! ```

mod config;
#[allow(clippy::module_inception)]
mod detector;
mod result;
mod trials;

pub use config::DetectorConfig;
pub use detector::LanguageDetector;
pub use result::{DetectionResult, UNDETERMINED_LANGUAGE};
