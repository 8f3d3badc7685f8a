//! N-gram 프로파일 기반 언어 감지
//!
//! 언어별로 학습된 n-gram 빈도 프로파일을 합쳐 확률 테이블을 만들고,
//! 입력 텍스트의 n-gram으로 무작위 시행 베이즈 스코어링을 해서 언어 후보를 반환합니다.
//!
//! ```
//! use langdetect::config::DetectionSettings;
//! use langdetect::corpus::{MemorySource, ProfileVariant};
//! use langdetect::profile::ProfileBuilder;
//! use langdetect::LanguageDetector;
//!
//! let mut en = ProfileBuilder::new("en");
//! en.add_all("this is a pen and that is an apple".split(' '));
//! let mut fr = ProfileBuilder::new("fr");
//! fr.add_all("ceci est un stylo et cela est une pomme".split(' '));
//!
//! let source = MemorySource::new()
//!     .with_profile(ProfileVariant::Default, en.build())
//!     .with_profile(ProfileVariant::Default, fr.build());
//! let settings = DetectionSettings::from_iso_codes("en,fr").build().unwrap();
//!
//! let detector = LanguageDetector::from_settings(&source, &settings).unwrap();
//! let results = detector.detect_all("that apple");
//! assert_eq!(results[0].iso_code, "en");
//! ```

pub mod config;
pub mod corpus;
pub mod detector;
pub mod profile;
pub mod text;

pub use config::{ConfigError, DetectionSettings};
pub use corpus::{CorpusError, CorpusRegistry, CorpusTable, ProfileSource, ProfileVariant};
pub use detector::{DetectionResult, DetectorConfig, LanguageDetector};
pub use profile::{LanguageProfile, ProfileBuilder, ProfileError};
pub use text::normalize;
