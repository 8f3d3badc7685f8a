//! 입력 텍스트 정규화
//!
//! 임의의 유니코드 입력을 "글자 덩어리 + 공백 하나" 형태로 바꿉니다.
//! 결과는 다시 정규화해도 바뀌지 않습니다.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// URL 패턴 (http/https)
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[-_.?&~;+=/#%0-9A-Za-z]{1,2076}").expect("valid regex")
});

/// 이메일 주소 패턴
static MAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_.0-9A-Za-z]{1,64}@[-_0-9A-Za-z]{1,255}[-_.0-9A-Za-z]{1,255}")
        .expect("valid regex")
});

/// 고정점에 도달할 때까지 반복하는 최대 횟수
const MAX_PASSES: usize = 4;

/// Latin Extended Additional 영역 (베트남어 등, 비라틴으로 세지 않음)
const LATIN_EXTENDED_ADDITIONAL: std::ops::RangeInclusive<u32> = 0x1E00..=0x1EFF;

/// 정규화 정책
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizerPolicy {
    /// URL, 이메일 주소 제거
    #[serde(default = "default_true")]
    pub strip_urls: bool,
    /// 비라틴 문자가 대부분이면 ASCII 알파벳 제거
    /// (예: "東京に行きます AB" → "東京に行きます")
    #[serde(default = "default_true")]
    pub strip_minority_latin: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self {
            strip_urls: true,
            strip_minority_latin: true,
        }
    }
}

/// 텍스트 정규화기
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: NormalizerPolicy,
}

impl Normalizer {
    /// 기본 정책으로 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 정책 지정
    pub fn with_policy(policy: NormalizerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NormalizerPolicy {
        self.policy
    }

    /// 텍스트 정규화
    ///
    /// 1. NFKC: 전각 라틴 → ASCII, 반각 가타카나 → 가타카나, 전각 공백 → 공백
    /// 2. URL/이메일 제거 (정책)
    /// 3. 글자/결합 부호가 아닌 문자 → 공백
    /// 4. 비라틴 우세 시 ASCII 알파벳 제거 (정책)
    /// 5. 연속 공백을 하나로, 앞뒤 공백 제거
    ///
    /// 제거로 인해 새 결합이 생길 수 있으므로 결과가 바뀌지 않을 때까지 반복합니다.
    ///
    /// # Examples
    /// ```
    /// use langdetect::text::Normalizer;
    ///
    /// let normalizer = Normalizer::new();
    /// assert_eq!(normalizer.normalize("ｼｰｻｲﾄﾞ_ﾗｲﾅｰ"), "シーサイド ライナー");
    /// assert_eq!(normalizer.normalize("  1234567 ... "), "");
    /// ```
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        // 전각 URL도 지우도록 NFKC 먼저
        let composed: String = text.nfkc().collect();
        let text = if self.policy.strip_urls {
            strip_urls(&composed)
        } else {
            Cow::Borrowed(composed.as_str())
        };

        let mut current = self.clean(&text);
        for _ in 0..MAX_PASSES {
            let next = self.clean(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn clean(&self, text: &str) -> String {
        let mapped: String = text
            .nfkc()
            .map(|c| if is_classifiable(c) { c } else { ' ' })
            .collect();

        let stripped = if self.policy.strip_minority_latin {
            strip_minority_latin(&mapped)
        } else {
            Cow::Borrowed(mapped.as_str())
        };

        collapse_whitespace(&stripped)
    }
}

/// 기본 정책으로 텍스트 정규화
pub fn normalize(text: &str) -> String {
    Normalizer::new().normalize(text)
}

/// 분류에 사용하는 문자인지 (글자 또는 결합 부호)
fn is_classifiable(c: char) -> bool {
    c.is_alphabetic() || is_combining_mark(c)
}

fn strip_urls(text: &str) -> Cow<'_, str> {
    let without_urls = URL_PATTERN.replace_all(text, " ");
    if !MAIL_PATTERN.is_match(&without_urls) {
        return without_urls;
    }
    Cow::Owned(MAIL_PATTERN.replace_all(&without_urls, " ").into_owned())
}

/// 비라틴 문자 (U+0300 이상, Latin Extended Additional 제외)
fn is_non_latin(c: char) -> bool {
    let cp = c as u32;
    cp >= 0x0300 && !LATIN_EXTENDED_ADDITIONAL.contains(&cp)
}

/// ASCII 알파벳 수 × 2 < 비라틴 문자 수 이면 ASCII 알파벳 제거
fn strip_minority_latin(text: &str) -> Cow<'_, str> {
    let mut latin = 0usize;
    let mut non_latin = 0usize;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            latin += 1;
        } else if is_non_latin(c) {
            non_latin += 1;
        }
    }

    if latin > 0 && latin * 2 < non_latin {
        Cow::Owned(text.chars().filter(|c| !c.is_ascii_alphabetic()).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
