//! Recommendation rules (table-driven).
//!
//! Each rule in the lexicon table pairs a condition with the tip it emits:
//! - `low_positive_share`:        positive share below the threshold (percent)
//! - `low_average_likes`:         engagement exists and average likes below the minimum
//! - `trending_tag`:              at least one trending tag (`{tag}` in the text is replaced)
//! - `uniform_recent_sentiment`:  the most recent posts all carry the same label
//!
//! Rules are evaluated in table order and the output is cut at
//! `max_recommendations`.

use serde::{Deserialize, Serialize};

use crate::analyze::{aggregate, distribution, trending_with_limit, SentimentDistribution};
use crate::config::EngineConfig;
use crate::lexicon::Lexicons;
use crate::post::Post;

/// Most tips shown at once.
pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    LowPositiveShare,
    LowAverageLikes,
    TrendingTag,
    UniformRecentSentiment,
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub rule: RuleKind,
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Tip shown to the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Aggregates the rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleInputs {
    pub distribution: SentimentDistribution,
    /// `None` when the collection is empty.
    pub average_likes: Option<u64>,
    pub top_tag: Option<String>,
    pub uniform_recent: bool,
}

impl RuleInputs {
    /// Compute every input from the raw collection.
    pub fn from_posts(posts: &[Post], cfg: &EngineConfig) -> Self {
        Self {
            distribution: distribution(posts),
            average_likes: aggregate(posts).map(|s| s.average_likes),
            top_tag: trending_with_limit(posts, 1).into_iter().next().map(|s| s.tag),
            uniform_recent: recent_sentiment_is_uniform(posts, cfg.diversity_window),
        }
    }
}

impl RuleKind {
    fn holds(self, inputs: &RuleInputs, cfg: &EngineConfig) -> bool {
        match self {
            RuleKind::LowPositiveShare => {
                inputs.distribution.positive_pct < cfg.positive_share_threshold
            }
            RuleKind::LowAverageLikes => inputs
                .average_likes
                .is_some_and(|avg| avg < cfg.min_average_likes),
            RuleKind::TrendingTag => inputs.top_tag.is_some(),
            RuleKind::UniformRecentSentiment => inputs.uniform_recent,
        }
    }
}

/// True when the collection is non-empty and the `window` most recent posts
/// (newest first, input order on equal timestamps) share one label. An
/// unlabelled post counts as its own label.
pub fn recent_sentiment_is_uniform(posts: &[Post], window: usize) -> bool {
    let mut recent: Vec<&Post> = posts.iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let mut labels = recent.into_iter().take(window.max(1)).map(|p| p.sentiment);
    let Some(first) = labels.next() else {
        return false;
    };
    labels.all(|s| s == first)
}

/// Evaluate the rule table against precomputed inputs.
pub fn recommend_from(
    inputs: &RuleInputs,
    rules: &[RecommendationRule],
    cfg: &EngineConfig,
) -> Vec<Recommendation> {
    rules
        .iter()
        .filter(|r| r.rule.holds(inputs, cfg))
        .take(cfg.max_recommendations)
        .map(|r| Recommendation {
            icon: r.icon.clone(),
            title: r.title.clone(),
            description: match &inputs.top_tag {
                Some(tag) => r.description.replace("{tag}", tag),
                None => r.description.clone(),
            },
        })
        .collect()
}

/// Tips for `posts` with explicit tables and thresholds.
pub fn recommend_with(posts: &[Post], lex: &Lexicons, cfg: &EngineConfig) -> Vec<Recommendation> {
    let inputs = RuleInputs::from_posts(posts, cfg);
    recommend_from(&inputs, &lex.recommendations, cfg)
}

/// Tips for `posts` with the built-in tables and default thresholds.
pub fn recommend(posts: &[Post]) -> Vec<Recommendation> {
    recommend_with(posts, Lexicons::builtin(), &EngineConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Sentiment;
    use chrono::{Duration, TimeZone, Utc};

    fn post(i: i64, likes: u32, sentiment: Option<Sentiment>, tags: &[&str]) -> Post {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(i);
        let mut p = Post::new(i.to_string(), "", ts)
            .engagement(likes, 0, 0)
            .tags(tags.iter().copied());
        p.sentiment = sentiment;
        p
    }

    fn titles(v: &[Recommendation]) -> Vec<&str> {
        v.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn empty_feed_only_asks_for_positivity() {
        // 0% positive < 30; no engagement, no tags, no posts for diversity
        assert_eq!(titles(&recommend(&[])), vec!["Boost Positivity"]);
    }

    #[test]
    fn trending_tip_names_the_top_tag() {
        let posts = vec![
            post(0, 5, Some(Sentiment::Positive), &["rust", "wasm"]),
            post(1, 5, Some(Sentiment::Negative), &["wasm"]),
        ];
        let out = recommend(&posts);
        // 50% positive, avg likes 5, mixed sentiment
        assert_eq!(titles(&out), vec!["Use Trending Tags"]);
        assert_eq!(out[0].description, "Consider using #wasm in your next post");
        assert_eq!(out[0].icon, "#️⃣");
    }

    #[test]
    fn capped_at_three_in_rule_order() {
        let posts = vec![
            post(0, 0, Some(Sentiment::Negative), &["x"]),
            post(1, 1, Some(Sentiment::Negative), &[]),
        ];
        let out = recommend(&posts);
        assert_eq!(
            titles(&out),
            vec!["Boost Positivity", "Increase Engagement", "Use Trending Tags"]
        );
    }

    #[test]
    fn diversity_tip_when_recent_posts_agree() {
        let posts = vec![
            post(0, 9, Some(Sentiment::Positive), &[]),
            post(1, 9, Some(Sentiment::Positive), &[]),
        ];
        assert_eq!(titles(&recommend(&posts)), vec!["Diversify Content"]);
    }

    #[test]
    fn window_only_looks_at_newest_posts() {
        let mut posts = vec![post(0, 9, Some(Sentiment::Negative), &[])];
        for i in 1..=5 {
            posts.push(post(i, 9, Some(Sentiment::Positive), &[]));
        }
        assert!(recent_sentiment_is_uniform(&posts, 5));
        assert!(!recent_sentiment_is_uniform(&posts, 6));
    }

    #[test]
    fn unlabelled_posts_break_uniformity() {
        let posts = vec![
            post(0, 9, None, &[]),
            post(1, 9, Some(Sentiment::Neutral), &[]),
        ];
        assert!(!recent_sentiment_is_uniform(&posts, 5));
        assert!(recent_sentiment_is_uniform(&[post(0, 0, None, &[])], 5));
        assert!(!recent_sentiment_is_uniform(&[], 5));
    }

    #[test]
    fn thresholds_come_from_config() {
        let cfg = EngineConfig {
            positive_share_threshold: 0,
            min_average_likes: 100,
            max_recommendations: 1,
            ..EngineConfig::default()
        };
        let posts = vec![post(0, 50, Some(Sentiment::Negative), &["a"])];
        let out = recommend_with(&posts, Lexicons::builtin(), &cfg);
        assert_eq!(titles(&out), vec!["Increase Engagement"]);
    }
}
