//! Text normalisation applied before vectorisation.

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid URL regex"));

/// Emoticons block, the only non-ASCII characters that survive normalisation.
const EMOTICONS: std::ops::RangeInclusive<char> = '\u{1F600}'..='\u{1F64F}';

/// ASCII information separators, treated as whitespace.
const SEPARATORS: std::ops::RangeInclusive<char> = '\u{1C}'..='\u{1F}';

/// Normalise raw text for the vectoriser.
///
/// Lowercases, strips URL tokens, keeps only ASCII letters, digits,
/// whitespace and emoticons, collapses whitespace runs to a single space and
/// trims. Never fails: text made only of stripped characters yields `""`.
///
/// URL stripping runs again after the character filter so fragments glued
/// together by punctuation removal (`h.ttp://x` → `httpx`) are removed too.
/// This keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();
    let without_urls = URL.replace_all(&lowered, "");
    let filtered: String = without_urls.chars().filter(|&c| keep(c)).collect();
    let filtered = URL.replace_all(&filtered, "");

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn keep(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || EMOTICONS.contains(&c)
}
