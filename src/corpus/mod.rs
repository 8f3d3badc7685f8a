//! 언어 코퍼스 구성
//!
//! 프로파일 공급원에서 선택한 언어의 프로파일을 읽어 하나의 확률 테이블을 만듭니다.
//!
//! ```
//! use langdetect::corpus::{CorpusRegistry, MemorySource, ProfileVariant, Smoothing};
//! use langdetect::profile::ProfileBuilder;
//!
//! let mut en = ProfileBuilder::new("en");
//! en.add("the");
//! let source = MemorySource::new().with_profile(ProfileVariant::Default, en.build());
//!
//! let table = CorpusRegistry::build(&source, &[], ProfileVariant::Default, Smoothing::default())
//!     .unwrap();
//! assert_eq!(table.language_codes(), ["en"]);
//! ```

mod registry;
mod source;
mod table;
mod variant;

pub use registry::{CorpusError, CorpusRegistry, Smoothing};
pub use source::{DirectorySource, MemorySource, ProfileSource};
pub use table::CorpusTable;
pub use variant::ProfileVariant;
