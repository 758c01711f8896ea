pub mod frequency;
pub mod keywords;

pub use frequency::{count_frequencies, FrequencyRecord, KeywordCounter};
pub use keywords::{normalize_keywords, parse_keywords};
