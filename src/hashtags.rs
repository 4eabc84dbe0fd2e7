//! Hashtag suggestions for the composer.
//!
//! Words are whitespace-separated pieces of the lower-cased text; punctuation
//! stays attached, so "project," does not match the trigger "project". Topic
//! categories are evaluated in table order and their tags appended to an
//! ordered list guarded by a membership set: a tag shared by two categories
//! keeps the position of the first one.

use std::collections::HashSet;

use crate::lexicon::{Lexicons, TopicCategory};

/// Default cap on suggestions.
pub const MAX_SUGGESTIONS: usize = 4;

fn category_fires(cat: &TopicCategory, words: &HashSet<&str>, lex: &Lexicons) -> bool {
    let polarity: &[String] = cat.polarity.map(|p| lex.polarity(p)).unwrap_or(&[]);
    cat.triggers
        .iter()
        .chain(polarity.iter())
        .any(|t| words.contains(t.as_str()))
}

/// Suggest up to `limit` tags for `text` using `lex`.
pub fn suggest_with(text: &str, lex: &Lexicons, limit: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: HashSet<&str> = lower.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for cat in lex.topics.iter().filter(|c| category_fires(c, &words, lex)) {
        for tag in &cat.tags {
            if seen.insert(tag.as_str()) {
                out.push(tag.clone());
            }
        }
    }
    out.truncate(limit);
    out
}

/// Suggest up to four tags with the built-in lexicons.
pub fn suggest(text: &str) -> Vec<String> {
    suggest_with(text, Lexicons::builtin(), MAX_SUGGESTIONS)
}
