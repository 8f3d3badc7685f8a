//! N-gram 추출
//!
//! 정규화된 텍스트의 각 토큰 안에서 길이 1..=max_len 창을 밀며 n-gram을 만듭니다.
//! n-gram은 공백을 넘지 않고, 같은 n-gram이 여러 번 나오면 모두 유지합니다.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::script::is_single_script;

/// 지원하는 최대 n-gram 길이
pub const MAX_NGRAM_LENGTH: usize = 3;

/// 한 토큰 안의 연속된 1~3 글자
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ngram(String);

impl Ngram {
    /// 길이가 1..=3 글자이고 공백이 없을 때만 생성
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let order = text.chars().count();
        if order == 0 || order > MAX_NGRAM_LENGTH || text.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 글자 수 (1, 2, 3)
    pub fn order(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for Ngram {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ngram {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 정규화된 텍스트에서 n-gram 추출
///
/// `max_len`은 1..=3 범위로 보정됩니다. 결과는 토큰 순서, 토큰 안에서는 길이 순서입니다.
///
/// # Examples
/// ```
/// use langdetect::text::extract;
///
/// let grams: Vec<String> = extract("ab c", 2).into_iter().map(|g| g.into_string()).collect();
/// assert_eq!(grams, vec!["a", "b", "ab", "c"]);
/// ```
pub fn extract(sanitized: &str, max_len: usize) -> Vec<Ngram> {
    let max_len = max_len.clamp(1, MAX_NGRAM_LENGTH);
    let mut grams = Vec::new();
    for token in sanitized.split_whitespace() {
        extract_token_into(token, max_len, true, &mut grams);
    }
    grams
}

/// 공백 없는 토큰 하나의 n-gram을 `out`에 추가
///
/// 토큰이 n보다 짧으면 길이 n은 건너뜁니다.
/// `script_filter`이면 길이 2 이상에서 문자 체계가 섞인 창을 버립니다.
pub(crate) fn extract_token_into(
    token: &str,
    max_len: usize,
    script_filter: bool,
    out: &mut Vec<Ngram>,
) {
    let chars: Vec<char> = token.chars().collect();

    for n in 1..=max_len {
        if chars.len() < n {
            break;
        }
        for window in chars.windows(n) {
            if script_filter && n >= 2 && !is_single_script(window) {
                continue;
            }
            out.push(Ngram(window.iter().collect()));
        }
    }
}
