//! post.rs — Post snapshot and sentiment label shared by every analyzer.
//!
//! The engine only ever reads these records. The one exception is creation
//! time, where `sentiment` and `reply_suggestions` are stamped once (see
//! [`crate::engine::InsightEngine::create_post`]) and never touched again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse polarity of a post's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable post record as delivered by the feed backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier assigned by the backend.
    pub id: String,
    pub content: String,
    /// Creation time (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub replies: u32,
    #[serde(default)]
    pub retweets: u32,
    /// Tags in the order the author picked them. Duplicates are kept.
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// `None` means the post was never classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reply_suggestions: Vec<String>,
}

impl Post {
    /// Bare post with zero engagement and no classification.
    pub fn new(id: impl Into<String>, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp,
            likes: 0,
            replies: 0,
            retweets: 0,
            hashtags: Vec::new(),
            sentiment: None,
            author: None,
            reply_suggestions: Vec::new(),
        }
    }

    /// Builder: set like/reply/retweet counters.
    pub fn engagement(mut self, likes: u32, replies: u32, retweets: u32) -> Self {
        self.likes = likes;
        self.replies = replies;
        self.retweets = retweets;
        self
    }

    /// Builder: replace the hashtag list.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the sentiment label.
    pub fn sentiment(mut self, s: Sentiment) -> Self {
        self.sentiment = Some(s);
        self
    }

    /// Engagement score: likes + replies + retweets.
    pub fn engagement_total(&self) -> u64 {
        u64::from(self.likes) + u64::from(self.replies) + u64::from(self.retweets)
    }
}

/// Input for creating a post; the engine fills in the derived attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}
