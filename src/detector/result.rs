//! 감지 결과

use std::fmt;

use serde::{Deserialize, Serialize};

/// 판정 불가 언어 코드
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// 언어 코드와 확률
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub iso_code: String,
    pub probability: f64,
}

impl DetectionResult {
    pub fn new(iso_code: impl Into<String>, probability: f64) -> Self {
        Self {
            iso_code: iso_code.into(),
            probability,
        }
    }

    /// 판정 불가 결과 ("und", 0.0)
    pub fn undetermined() -> Self {
        Self::new(UNDETERMINED_LANGUAGE, 0.0)
    }

    pub fn is_undetermined(&self) -> bool {
        self.iso_code == UNDETERMINED_LANGUAGE
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:.5}", self.iso_code, self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undetermined() {
        let result = DetectionResult::undetermined();
        assert!(result.is_undetermined());
        assert_eq!(result.probability, 0.0);
        assert!(!DetectionResult::new("en", 0.9).is_undetermined());
    }

    #[test]
    fn test_display() {
        assert_eq!(DetectionResult::new("de", 0.857142).to_string(), "de:0.85714");
    }
}
