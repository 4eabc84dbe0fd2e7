//! # Insight Engine
//! Pure facade over the analyzers: one creation-time call (`compose`,
//! `create_post`) and one render-time call (`feed_insights`).
//! No I/O, no interior state; safe to share behind an `Arc`.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::analyze::{
    aggregate, distribution, optimal_hour_in, trending_with_limit, EngagementSummary, HashtagStat,
    SentimentDistribution,
};
use crate::config::EngineConfig;
use crate::hashtags::suggest_with;
use crate::lexicon::Lexicons;
use crate::post::{NewPost, Post, Sentiment};
use crate::recommend::{recent_sentiment_is_uniform, recommend_from, Recommendation, RuleInputs};
use crate::replies::generate_with;
use crate::sentiment::classify_with;

/// Result of the composer-time call; persisted alongside the new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerInsights {
    pub sentiment: Sentiment,
    pub hashtag_suggestions: Vec<String>,
    pub reply_suggestions: Vec<String>,
}

/// Result of the render-time call; display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedInsights<'a> {
    pub trending: Vec<HashtagStat>,
    pub sentiment: SentimentDistribution,
    pub engagement: Option<EngagementSummary<'a>>,
    pub recommendations: Vec<Recommendation>,
    pub optimal_hour: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InsightEngine {
    config: EngineConfig,
    lexicons: Arc<Lexicons>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(Lexicons::builtin().clone()))
    }
}

impl InsightEngine {
    pub fn new(config: EngineConfig, lexicons: Arc<Lexicons>) -> Self {
        Self {
            config: config.sanitized(),
            lexicons,
        }
    }

    /// Build from config, loading the lexicon override if one is named.
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        let lexicons = Arc::new(config.lexicons()?);
        Ok(Self::new(config, lexicons))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicons(&self) -> &Lexicons {
        &self.lexicons
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        classify_with(text, &self.lexicons)
    }

    /// Hashtag suggestions without the composer's length gate.
    pub fn suggest_hashtags(&self, text: &str) -> Vec<String> {
        suggest_with(text, &self.lexicons, self.config.max_hashtag_suggestions)
    }

    pub fn reply_suggestions(&self, text: &str, sentiment: Sentiment) -> Vec<String> {
        generate_with(text, sentiment, &self.lexicons, self.config.max_reply_suggestions)
    }

    /// Composer-time call. Hashtags are only proposed once the text is longer
    /// than `min_suggest_chars`.
    pub fn compose(&self, content: &str) -> ComposerInsights {
        let sentiment = self.classify(content);
        let hashtag_suggestions = if content.chars().count() > self.config.min_suggest_chars {
            self.suggest_hashtags(content)
        } else {
            Vec::new()
        };
        let reply_suggestions = self.reply_suggestions(content, sentiment);

        debug!(
            target: "insights",
            %sentiment,
            chars = content.chars().count(),
            hashtags = hashtag_suggestions.len(),
            replies = reply_suggestions.len(),
            "composed"
        );

        ComposerInsights {
            sentiment,
            hashtag_suggestions,
            reply_suggestions,
        }
    }

    /// Materialize a new post, stamping sentiment and reply suggestions once.
    /// `now` is used when the request carries no timestamp.
    pub fn create_post(&self, new: NewPost, now: DateTime<Utc>) -> Post {
        let sentiment = self.classify(&new.content);
        let reply_suggestions = self.reply_suggestions(&new.content, sentiment);
        Post {
            id: new.id,
            timestamp: new.timestamp.unwrap_or(now),
            likes: 0,
            replies: 0,
            retweets: 0,
            hashtags: new.hashtags,
            sentiment: Some(sentiment),
            author: new.author,
            reply_suggestions,
            content: new.content,
        }
    }

    /// Render-time call with hours bucketed in zone `tz`.
    pub fn feed_insights_in<'a, Tz: TimeZone>(&self, posts: &'a [Post], tz: &Tz) -> FeedInsights<'a> {
        let cfg = &self.config;
        let trending = trending_with_limit(posts, cfg.trending_limit);
        let sentiment = distribution(posts);
        let engagement = aggregate(posts);

        let inputs = RuleInputs {
            distribution: sentiment,
            average_likes: engagement.as_ref().map(|e| e.average_likes),
            top_tag: trending.first().map(|s| s.tag.clone()),
            uniform_recent: recent_sentiment_is_uniform(posts, cfg.diversity_window),
        };
        let recommendations = recommend_from(&inputs, &self.lexicons.recommendations, cfg);
        let optimal_hour = optimal_hour_in(posts, tz);

        debug!(
            target: "insights",
            posts = posts.len(),
            trending = trending.len(),
            recommendations = recommendations.len(),
            "feed insights"
        );

        FeedInsights {
            trending,
            sentiment,
            engagement,
            recommendations,
            optimal_hour,
        }
    }

    /// Render-time call in the configured UTC offset.
    pub fn feed_insights<'a>(&self, posts: &'a [Post]) -> FeedInsights<'a> {
        self.feed_insights_in(posts, &self.config.utc_offset())
    }
}
