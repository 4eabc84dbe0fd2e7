//! # Lexicons
//!
//! Static, ordered keyword tables driving every text heuristic in the crate:
//! polarity word lists, topic categories (trigger words → tags), reply
//! templates, content-triggered replies, and the recommendation rule table.
//!
//! - The built-in tables live in `assets/lexicons.json` and are embedded at
//!   compile time.
//! - A replacement table set can be loaded from JSON or TOML at startup.
//! - All trigger words are lower-cased on load, so lookups can compare
//!   against lower-cased input directly.
//!
//! Order matters everywhere: topic order decides hashtag priority, template
//! order decides which replies survive truncation, rule order decides which
//! tips are shown.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::post::Sentiment;
use crate::recommend::RecommendationRule;

static BUILTIN: Lazy<Lexicons> = Lazy::new(|| {
    let raw = include_str!("../assets/lexicons.json");
    serde_json::from_str::<Lexicons>(raw)
        .expect("valid embedded lexicons")
        .normalized()
});

/// Full table set used by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicons {
    /// Positive polarity entries (words, punctuation, emoji).
    pub positive: Vec<String>,
    /// Negative polarity entries.
    pub negative: Vec<String>,
    /// Topic categories in priority order.
    pub topics: Vec<TopicCategory>,
    pub replies: ReplyTemplates,
    #[serde(default)]
    pub reply_triggers: Vec<ReplyTrigger>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationRule>,
}

/// One hashtag category: if any trigger word occurs, its tags are proposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCategory {
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Reuse a polarity lexicon as (additional) trigger set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Sentiment>,
    pub tags: Vec<String>,
}

/// Canned replies per sentiment, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTemplates {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

impl ReplyTemplates {
    pub fn for_sentiment(&self, s: Sentiment) -> &[String] {
        match s {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
        }
    }
}

/// Extra reply surfaced when any phrase occurs in the post text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTrigger {
    pub any_of: Vec<String>,
    pub reply: String,
}

impl Lexicons {
    /// Tables embedded in the binary.
    pub fn builtin() -> &'static Lexicons {
        &BUILTIN
    }

    /// Polarity list for a sentiment; `Neutral` has none.
    pub fn polarity(&self, s: Sentiment) -> &[String] {
        match s {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &[],
        }
    }

    /// Load a replacement table set (JSON or TOML, chosen by extension).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicons from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let lex: Lexicons = match ext.as_str() {
            "toml" => toml::from_str(&content)
                .with_context(|| format!("parsing TOML lexicons {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON lexicons {}", path.display()))?,
        };
        let lex = lex.normalized();
        lex.validate()?;
        Ok(lex)
    }

    /// Lower-case and trim every matching key; drop empty entries.
    pub(crate) fn normalized(mut self) -> Self {
        clean(&mut self.positive);
        clean(&mut self.negative);
        for t in &mut self.topics {
            clean(&mut t.triggers);
        }
        for r in &mut self.reply_triggers {
            clean(&mut r.any_of);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        for t in &self.topics {
            if t.tags.is_empty() {
                bail!("topic '{}' has no tags", t.name);
            }
            if t.triggers.is_empty() && t.polarity.is_none() {
                bail!("topic '{}' has neither triggers nor polarity", t.name);
            }
            if t.polarity == Some(Sentiment::Neutral) {
                bail!("topic '{}' cannot key off the neutral polarity", t.name);
            }
        }
        Ok(())
    }
}

fn clean(items: &mut Vec<String>) {
    for it in items.iter_mut() {
        *it = it.trim().to_lowercase();
    }
    items.retain(|s| !s.is_empty());
}
