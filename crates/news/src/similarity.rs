//! Duplicate screening for titles and article bodies.
//!
//! Titles are compared case-insensitively for exact equality. Bodies use the
//! `quick_ratio` upper bound from sequence matching, taken over word tokens:
//! it ignores word order and only counts how many words the two bodies
//! share.

use std::collections::HashMap;

/// Bodies at or above this quick ratio are treated as the same story.
pub const DUPLICATE_RATIO: f64 = 0.85;

/// Splits `text` into lowercase alphanumeric words. Punctuation separates
/// words and is dropped.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns `2 * M / T`, where `M` is the size of the word multiset
/// intersection of `a` and `b` and `T` is their combined word count.
///
/// Two texts without any words are identical (`1.0`).
#[must_use]
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let words_a = words(a);
    let words_b = words(b);
    let total = words_a.len() + words_b.len();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<&str, usize> = HashMap::new();
    for w in &words_b {
        *available.entry(w.as_str()).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for w in &words_a {
        if let Some(n) = available.get_mut(w.as_str()) {
            if *n > 0 {
                *n -= 1;
                matches += 1;
            }
        }
    }

    2.0 * matches as f64 / total as f64
}

/// `true` if `title` equals any of `history`, ignoring case.
#[must_use]
pub fn is_duplicate_title<S: AsRef<str>>(title: &str, history: &[S]) -> bool {
    let folded = title.to_lowercase();
    history
        .iter()
        .any(|old| old.as_ref().to_lowercase() == folded)
}

/// `true` if `body` reaches [`DUPLICATE_RATIO`] against any of `previous`.
#[must_use]
pub fn is_duplicate_body<S: AsRef<str>>(body: &str, previous: &[S]) -> bool {
    previous
        .iter()
        .any(|old| quick_ratio(body, old.as_ref()) >= DUPLICATE_RATIO)
}
