//! 프로파일 변형 선택

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// 번들 프로파일 세트의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProfileVariant {
    /// 기본 프로파일 (`""` 또는 `"default"`)
    #[default]
    Default,
    /// 짧은 문장용 프로파일 (`"short-text"`)
    ShortText,
    /// 기본 + 짧은 문장 프로파일 평균 (`"merged-average"`)
    MergedAverage,
}

impl ProfileVariant {
    pub const ALL: [ProfileVariant; 3] = [
        ProfileVariant::Default,
        ProfileVariant::ShortText,
        ProfileVariant::MergedAverage,
    ];

    /// 설정 파일에 쓰는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileVariant::Default => "",
            ProfileVariant::ShortText => "short-text",
            ProfileVariant::MergedAverage => "merged-average",
        }
    }

    /// 프로파일 디렉토리 이름
    pub fn dir_name(&self) -> &'static str {
        match self {
            ProfileVariant::Default => "profiles",
            ProfileVariant::ShortText => "profiles.sm",
            ProfileVariant::MergedAverage => "merged-average",
        }
    }
}

impl FromStr for ProfileVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" => Ok(ProfileVariant::Default),
            "short-text" => Ok(ProfileVariant::ShortText),
            "merged-average" => Ok(ProfileVariant::MergedAverage),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProfileVariant {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProfileVariant> for String {
    fn from(variant: ProfileVariant) -> Self {
        variant.as_str().to_string()
    }
}

impl fmt::Display for ProfileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileVariant::Default => f.write_str("default"),
            other => f.write_str(other.as_str()),
        }
    }
}
