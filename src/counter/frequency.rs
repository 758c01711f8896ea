use crate::error::{Result, WordFreqError};
use regex::Regex;
use serde::Serialize;

/// Per-document keyword counts, one entry per keyword position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyRecord {
    entries: Vec<(String, usize)>,
}

impl FrequencyRecord {
    pub fn new(entries: Vec<(String, usize)>) -> Self {
        Self { entries }
    }

    /// Count for the first occurrence of `keyword`.
    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, count)| (k.as_str(), *count))
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whole-word, case-insensitive keyword matcher.
///
/// Each keyword is escaped before compilation, so characters such as `.` or
/// `(` only ever match themselves. A hit counts only when the characters
/// directly around it are not alphanumeric or `_`, which also holds for
/// keywords that begin or end with punctuation.
#[derive(Debug, Clone)]
pub struct KeywordCounter {
    patterns: Vec<(String, Regex)>,
}

impl KeywordCounter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let keyword = keyword.as_ref();
                Regex::new(&regex::escape(&keyword.to_lowercase()))
                    .map(|regex| (keyword.to_string(), regex))
                    .map_err(|e| WordFreqError::Pattern {
                        keyword: keyword.to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn count(&self, text: &str) -> FrequencyRecord {
        let text = text.to_lowercase();
        let entries = self
            .patterns
            .iter()
            .map(|(keyword, regex)| (keyword.clone(), count_whole_words(regex, &text)))
            .collect();

        FrequencyRecord::new(entries)
    }
}

fn count_whole_words(regex: &Regex, text: &str) -> usize {
    let mut count = 0;
    let mut start = 0;

    while let Some(hit) = regex.find_at(text, start) {
        // an empty keyword never matches
        if hit.as_str().is_empty() {
            break;
        }

        if stands_alone(text, hit.start(), hit.end()) {
            count += 1;
            start = hit.end();
        } else {
            let first_len = text[hit.start()..].chars().next().map_or(1, char::len_utf8);
            start = hit.start() + first_len;
        }
    }

    count
}

fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn count_frequencies<S: AsRef<str>>(text: &str, keywords: &[S]) -> Result<FrequencyRecord> {
    Ok(KeywordCounter::new(keywords)?.count(text))
}
