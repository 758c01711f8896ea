/// Split a comma-separated keyword list into normalized search terms.
///
/// Terms are trimmed and lower-cased. Empty and duplicate terms are kept in
/// place, so an empty input yields a single empty term.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',').map(normalize_keyword).collect()
}

/// Normalize a keyword list that did not come from a comma-separated string.
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|keyword| normalize_keyword(keyword.as_ref()))
        .collect()
}

fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}
