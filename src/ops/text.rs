//! Pure string transformations: counting, case conversion, extraction,
//! truncation. No I/O and no failure modes, so everything returns values
//! directly rather than `Result`.

use regex::Regex;
use std::sync::OnceLock;

/// Count whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count characters, optionally excluding the literal space character.
///
/// Only `' '` is excluded when `include_spaces` is false; tabs and newlines
/// still count, matching the historical behavior of this helper.
pub fn count_characters(text: &str, include_spaces: bool) -> usize {
    if include_spaces {
        text.chars().count()
    } else {
        text.chars().filter(|c| *c != ' ').count()
    }
}

/// Reverse a string by characters.
pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}

/// Uppercase the first letter of every whitespace-delimited word and
/// lowercase the rest.
pub fn to_title_case(text: &str) -> String {
    text.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert to snake_case: strip characters that are neither word characters
/// nor whitespace, collapse whitespace runs to a single underscore, lowercase.
pub fn to_snake_case(text: &str) -> String {
    join_words(text, "_")
}

/// Convert to kebab-case with the same stripping rules as [`to_snake_case`].
pub fn to_kebab_case(text: &str) -> String {
    join_words(text, "-")
}

/// Convert to camelCase. The first word is lowercased verbatim, subsequent
/// words are capitalized and concatenated. Empty input is returned unchanged.
pub fn to_camel_case(text: &str) -> String {
    let mut words = text.split_whitespace();
    let first = match words.next() {
        Some(w) => w,
        None => return text.to_string(),
    };
    let mut result = first.to_lowercase();
    for word in words {
        result.push_str(&capitalize(word));
    }
    result
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn remove_extra_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract email addresses, in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .unwrap()
    });
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Extract http/https URLs, in order of appearance. The pattern is
/// deliberately permissive: it requires no path and does not validate TLDs.
pub fn extract_urls(text: &str) -> Vec<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    let re = URL.get_or_init(|| {
        Regex::new(r"https?://[A-Za-z0-9$\-_@.&+!*(),%/:=?#~]+").unwrap()
    });
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Truncate to at most `max_length` characters, appending `suffix` when the
/// text was cut. The result is never longer than `max_length`.
///
/// When `max_length` is shorter than the suffix itself, the suffix is
/// truncated to fit; there is no longer text to preserve at that point.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let suffix_len = suffix.chars().count();
    if max_length <= suffix_len {
        return suffix.chars().take(max_length).collect();
    }
    let mut result: String = text.chars().take(max_length - suffix_len).collect();
    result.push_str(suffix);
    result
}

/// Strip substrings matching `<...>` non-greedily. This is not a structural
/// HTML parser: tags containing `>` inside attribute values will be cut short.
pub fn remove_html_tags(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    re.replace_all(text, "").into_owned()
}

/// Count non-overlapping occurrences of a substring.
pub fn count_occurrences(text: &str, substring: &str, case_sensitive: bool) -> usize {
    if substring.is_empty() {
        return 0;
    }
    if case_sensitive {
        text.matches(substring).count()
    } else {
        text.to_lowercase()
            .matches(&substring.to_lowercase())
            .count()
    }
}

/// Apply a sequence of (old, new) replacements in order.
pub fn replace_multiple(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut result = text.to_string();
    for (old, new) in replacements {
        result = result.replace(old, new);
    }
    result
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn join_words(text: &str, separator: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(separator)
        .to_lowercase()
}
