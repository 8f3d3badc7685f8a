//! 언어별 n-gram 빈도 프로파일
//!
//! ```
//! use langdetect::profile::{LanguageProfile, ProfileBuilder};
//!
//! let mut builder = ProfileBuilder::new("en");
//! builder.add("the").add("then");
//! let profile = builder.build();
//! assert_eq!(profile.count("th"), 2);
//!
//! let json = profile.to_json().unwrap();
//! assert_eq!(LanguageProfile::from_json(&json).unwrap(), profile);
//! ```

mod builder;
mod model;

pub use builder::ProfileBuilder;
pub use model::{LanguageProfile, ProfileError};
