//! Polarity classifier over the keyword lexicons.
//!
//! Matching is plain substring containment on the lower-cased text: an entry
//! counts if it appears anywhere, including inside a longer word ("sadly"
//! hits "sad") or as a bare glyph ("!" or an emoji). Each lexicon entry
//! counts at most once per text.

use crate::lexicon::Lexicons;
use crate::post::Sentiment;

/// Number of distinct positive / negative lexicon entries found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolarityHits {
    pub positive: usize,
    pub negative: usize,
}

impl PolarityHits {
    /// Strict majority decides; a tie (including 0:0) is neutral.
    pub fn verdict(self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else if self.negative > self.positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Count lexicon hits for `text`.
pub fn polarity_hits(text: &str, lex: &Lexicons) -> PolarityHits {
    let lower = text.to_lowercase();
    let count = |entries: &[String]| entries.iter().filter(|e| lower.contains(e.as_str())).count();
    PolarityHits {
        positive: count(&lex.positive),
        negative: count(&lex.negative),
    }
}

/// Classify with an explicit table set.
pub fn classify_with(text: &str, lex: &Lexicons) -> Sentiment {
    polarity_hits(text, lex).verdict()
}

/// Classify with the built-in lexicons.
pub fn classify(text: &str) -> Sentiment {
    classify_with(text, Lexicons::builtin())
}
