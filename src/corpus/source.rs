//! 프로파일 공급원
//!
//! 레지스트리는 프로파일이 어디에 있는지 모르고 [`ProfileSource`]에 요청만 합니다.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use super::registry::CorpusError;
use super::variant::ProfileVariant;
use crate::profile::LanguageProfile;

/// 프로파일 공급원
pub trait ProfileSource {
    /// 주어진 변형에서 사용할 수 있는 언어 코드 (정렬됨)
    fn available(&self, variant: ProfileVariant) -> Result<Vec<String>, CorpusError>;

    /// 언어 코드의 프로파일 로드
    fn load(&self, variant: ProfileVariant, code: &str) -> Result<LanguageProfile, CorpusError>;
}

/// 디렉토리 기반 공급원
///
/// `<root>/<variant 디렉토리>/<code>` 또는 `<code>.json` 파일을 읽습니다.
///
/// ```text
/// root/
///   profiles/en
///   profiles/de
///   profiles.sm/en.json
///   merged-average/en
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn variant_dir(&self, variant: ProfileVariant) -> PathBuf {
        self.root.join(variant.dir_name())
    }

    fn profile_path(&self, variant: ProfileVariant, code: &str) -> Option<PathBuf> {
        let dir = self.variant_dir(variant);
        [dir.join(code), dir.join(format!("{}.json", code))]
            .into_iter()
            .find(|p| p.is_file())
    }
}

impl ProfileSource for DirectorySource {
    fn available(&self, variant: ProfileVariant) -> Result<Vec<String>, CorpusError> {
        let dir = self.variant_dir(variant);
        let entries = fs::read_dir(&dir).map_err(|source| CorpusError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut codes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CorpusError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => {
                    log::warn!("UTF-8이 아닌 파일 이름 무시: {}", path.display());
                    continue;
                }
            };
            if file_name.starts_with('.') {
                continue;
            }

            let code = file_name.strip_suffix(".json").unwrap_or(file_name);
            codes.push(code.to_string());
        }

        codes.sort();
        codes.dedup();
        Ok(codes)
    }

    fn load(&self, variant: ProfileVariant, code: &str) -> Result<LanguageProfile, CorpusError> {
        let path = self
            .profile_path(variant, code)
            .ok_or_else(|| CorpusError::UnknownLanguage {
                code: code.to_string(),
                variant,
            })?;

        log::debug!("프로파일 로드: {}", path.display());
        LanguageProfile::load(&path).map_err(|source| CorpusError::Profile {
            code: code.to_string(),
            source,
        })
    }
}

/// 메모리 기반 공급원 (테스트, 직접 만든 코퍼스)
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    profiles: HashMap<ProfileVariant, BTreeMap<String, LanguageProfile>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 프로파일 추가 (프로파일 이름이 언어 코드가 됨, 같은 이름은 덮어씀)
    pub fn insert(&mut self, variant: ProfileVariant, profile: LanguageProfile) {
        self.profiles
            .entry(variant)
            .or_default()
            .insert(profile.name().to_string(), profile);
    }

    /// 빌더 스타일 추가
    pub fn with_profile(mut self, variant: ProfileVariant, profile: LanguageProfile) -> Self {
        self.insert(variant, profile);
        self
    }
}

impl ProfileSource for MemorySource {
    fn available(&self, variant: ProfileVariant) -> Result<Vec<String>, CorpusError> {
        Ok(self
            .profiles
            .get(&variant)
            .map(|profiles| profiles.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn load(&self, variant: ProfileVariant, code: &str) -> Result<LanguageProfile, CorpusError> {
        self.profiles
            .get(&variant)
            .and_then(|profiles| profiles.get(code))
            .cloned()
            .ok_or_else(|| CorpusError::UnknownLanguage {
                code: code.to_string(),
                variant,
            })
    }
}
