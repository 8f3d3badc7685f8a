//! 텍스트 전처리
//!
//! 분류 파이프라인의 앞단입니다:
//!
//! 1. **정규화** (`normalizer`): NFKC, 비문자 제거, 공백 정리
//! 2. **N-gram 추출** (`ngram`): 토큰 내부에서 길이 1~3 n-gram 생성
//! 3. **스크립트 판정** (`script`): 여러 문자 체계가 섞인 n-gram 걸러내기
//!
//! ```
//! use langdetect::text::{extract, normalize};
//!
//! let sanitized = normalize("Ｃｕｌｔｕｒｅ　ｏｆ　Ｊａｐａｎ!!");
//! assert_eq!(sanitized, "Culture of Japan");
//!
//! let grams = extract("ab", 3);
//! let grams: Vec<&str> = grams.iter().map(|g| g.as_str()).collect();
//! assert_eq!(grams, vec!["a", "b", "ab"]);
//! ```

mod ngram;
mod normalizer;
pub mod script;

pub use ngram::{extract, Ngram, MAX_NGRAM_LENGTH};
pub(crate) use ngram::extract_token_into;
pub use normalizer::{normalize, Normalizer, NormalizerPolicy};
