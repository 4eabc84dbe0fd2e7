//! Canned reply suggestions attached to a post at creation time.
//!
//! First-fit: the sentiment templates come first, content-triggered extras
//! are appended after them, and the list is cut at `limit`. With the
//! built-in tables every sentiment has three templates, so extras only
//! surface when a custom table set provides fewer.

use crate::lexicon::Lexicons;
use crate::post::Sentiment;

/// Default cap on reply suggestions.
pub const MAX_REPLIES: usize = 3;

/// Generate replies for `text` already classified as `sentiment`.
pub fn generate_with(text: &str, sentiment: Sentiment, lex: &Lexicons, limit: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    lex.replies
        .for_sentiment(sentiment)
        .iter()
        .chain(
            lex.reply_triggers
                .iter()
                .filter(|t| t.any_of.iter().any(|p| lower.contains(p.as_str())))
                .map(|t| &t.reply),
        )
        .take(limit)
        .cloned()
        .collect()
}

/// Generate up to three replies with the built-in tables.
pub fn generate(text: &str, sentiment: Sentiment) -> Vec<String> {
    generate_with(text, sentiment, Lexicons::builtin(), MAX_REPLIES)
}
