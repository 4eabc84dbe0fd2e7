// src/config/engine.rs
use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::analyze::trending::TRENDING_LIMIT;
use crate::hashtags::MAX_SUGGESTIONS;
use crate::lexicon::Lexicons;
use crate::recommend::MAX_RECOMMENDATIONS;
use crate::replies::MAX_REPLIES;

pub const DEFAULT_CONFIG_PATH: &str = "config/insights.toml";
pub const ENV_CONFIG_PATH: &str = "INSIGHTS_CONFIG_PATH";
pub const ENV_UTC_OFFSET: &str = "INSIGHTS_UTC_OFFSET_MINUTES";
pub const ENV_LEXICON_PATH: &str = "INSIGHTS_LEXICON_PATH";
pub const ENV_METRICS: &str = "INSIGHTS_METRICS";

/// Largest offset `FixedOffset` accepts, in minutes.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

fn default_min_suggest_chars() -> usize {
    15
}
fn default_max_hashtag_suggestions() -> usize {
    MAX_SUGGESTIONS
}
fn default_max_reply_suggestions() -> usize {
    MAX_REPLIES
}
fn default_trending_limit() -> usize {
    TRENDING_LIMIT
}
fn default_max_recommendations() -> usize {
    MAX_RECOMMENDATIONS
}
fn default_positive_share_threshold() -> u32 {
    30
}
fn default_min_average_likes() -> u64 {
    2
}
fn default_diversity_window() -> usize {
    5
}
fn default_max_content_chars() -> usize {
    280
}
fn default_max_posts() -> usize {
    10_000
}

/// Engine thresholds and HTTP shell limits. Every field has a default, so an
/// empty file (or no file) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Composer text must be longer than this before hashtags are proposed.
    #[serde(default = "default_min_suggest_chars")]
    pub min_suggest_chars: usize,
    #[serde(default = "default_max_hashtag_suggestions")]
    pub max_hashtag_suggestions: usize,
    #[serde(default = "default_max_reply_suggestions")]
    pub max_reply_suggestions: usize,
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    /// Positive share (percent) below which the positivity tip fires.
    #[serde(default = "default_positive_share_threshold")]
    pub positive_share_threshold: u32,
    /// Average likes below which the engagement tip fires.
    #[serde(default = "default_min_average_likes")]
    pub min_average_likes: u64,
    /// How many of the most recent posts the diversity tip looks at.
    #[serde(default = "default_diversity_window")]
    pub diversity_window: usize,
    /// Zone used for hour-of-day bucketing, as minutes east of UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Upper bound on posts accepted by one `/insights` request.
    #[serde(default = "default_max_posts")]
    pub max_posts: usize,
    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default)]
    pub metrics: bool,
    /// Optional lexicon replacement (JSON or TOML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_suggest_chars: default_min_suggest_chars(),
            max_hashtag_suggestions: default_max_hashtag_suggestions(),
            max_reply_suggestions: default_max_reply_suggestions(),
            trending_limit: default_trending_limit(),
            max_recommendations: default_max_recommendations(),
            positive_share_threshold: default_positive_share_threshold(),
            min_average_likes: default_min_average_likes(),
            diversity_window: default_diversity_window(),
            utc_offset_minutes: 0,
            max_content_chars: default_max_content_chars(),
            max_posts: default_max_posts(),
            metrics: false,
            lexicon_path: None,
        }
    }
}

impl EngineConfig {
    /// Load from an explicit path. TOML or JSON, chosen by extension.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading engine config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: EngineConfig = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("parsing TOML config {}", path.display()))?,
        };
        Ok(cfg.sanitized())
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $INSIGHTS_CONFIG_PATH (must exist)
    /// 2) config/insights.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from_file(&default_p)?
            } else {
                info!(target: "insights", "no config file found, using defaults");
                Self::default()
            }
        };
        Ok(base.with_overrides(|k| std::env::var(k).ok()))
    }

    /// Apply the individual env overrides; `get` abstracts the environment.
    pub fn with_overrides<F>(mut self, get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get(ENV_UTC_OFFSET).and_then(|s| s.trim().parse::<i32>().ok()) {
            self.utc_offset_minutes = v;
        }
        if let Some(p) = get(ENV_LEXICON_PATH).filter(|s| !s.trim().is_empty()) {
            self.lexicon_path = Some(PathBuf::from(p.trim()));
        }
        if let Some(v) = get(ENV_METRICS) {
            self.metrics = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self.sanitized()
    }

    /// Clamp out-of-range values instead of failing. Output limits may be
    /// lowered but never raised above the built-in caps.
    pub fn sanitized(mut self) -> Self {
        self.max_hashtag_suggestions = self.max_hashtag_suggestions.min(MAX_SUGGESTIONS);
        self.max_reply_suggestions = self.max_reply_suggestions.min(MAX_REPLIES);
        self.trending_limit = self.trending_limit.min(TRENDING_LIMIT);
        self.max_recommendations = self.max_recommendations.min(MAX_RECOMMENDATIONS);
        self.positive_share_threshold = self.positive_share_threshold.min(100);
        self.utc_offset_minutes = self
            .utc_offset_minutes
            .clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES);
        if self.max_content_chars == 0 {
            self.max_content_chars = default_max_content_chars();
        }
        if self.diversity_window == 0 {
            self.diversity_window = default_diversity_window();
        }
        self
    }

    /// Zone for hour-of-day bucketing.
    pub fn utc_offset(&self) -> FixedOffset {
        let minutes = self
            .utc_offset_minutes
            .clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES);
        FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Lexicons named by `lexicon_path`, or the built-in tables.
    pub fn lexicons(&self) -> Result<Lexicons> {
        match &self.lexicon_path {
            Some(p) => {
                info!(target: "insights", path = %p.display(), "loading lexicon override");
                Lexicons::load_from_file(p)
            }
            None => Ok(Lexicons::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;

    #[test]
    fn empty_toml_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("insights.toml");
        fs::write(&p, "").unwrap();
        assert_eq!(EngineConfig::load_from_file(&p).unwrap(), EngineConfig::default());
    }

    #[test]
    fn json_and_sanitizing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("insights.json");
        fs::write(
            &p,
            r#"{"positive_share_threshold": 250, "utc_offset_minutes": 99999, "diversity_window": 0,
                "max_hashtag_suggestions": 10, "max_reply_suggestions": 7,
                "trending_limit": 8, "max_recommendations": 4}"#,
        )
        .unwrap();
        let cfg = EngineConfig::load_from_file(&p).unwrap();
        assert_eq!(cfg.max_hashtag_suggestions, 4);
        assert_eq!(cfg.max_reply_suggestions, 3);
        assert_eq!(cfg.trending_limit, 5);
        assert_eq!(cfg.max_recommendations, 3);
        assert_eq!(cfg.positive_share_threshold, 100);
        assert_eq!(cfg.utc_offset_minutes, MAX_OFFSET_MINUTES);
        assert_eq!(cfg.diversity_window, 5);
        assert_eq!(cfg.utc_offset().local_minus_utc(), MAX_OFFSET_MINUTES * 60);
    }

    #[test]
    fn overrides_apply_on_top_of_file_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_UTC_OFFSET, " -300 "),
            (ENV_METRICS, "true"),
            (ENV_LEXICON_PATH, "custom/lex.json"),
        ]
        .into_iter()
        .collect();
        let cfg = EngineConfig::default().with_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.utc_offset_minutes, -300);
        assert!(cfg.metrics);
        assert_eq!(cfg.lexicon_path, Some(PathBuf::from("custom/lex.json")));
    }

    #[test]
    fn lower_output_limits_are_kept() {
        let cfg = EngineConfig {
            max_hashtag_suggestions: 2,
            trending_limit: 1,
            ..EngineConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.max_hashtag_suggestions, 2);
        assert_eq!(cfg.trending_limit, 1);
    }

    #[test]
    fn unparsable_override_is_ignored() {
        let cfg = EngineConfig::default()
            .with_overrides(|k| (k == ENV_UTC_OFFSET).then(|| "east".to_string()));
        assert_eq!(cfg.utc_offset_minutes, 0);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // isolate CWD so a real config/ in the repo does not interfere
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_UTC_OFFSET);
        env::remove_var(ENV_METRICS);
        env::remove_var(ENV_LEXICON_PATH);

        let cfg = EngineConfig::load_default().unwrap();
        assert_eq!(cfg, EngineConfig::default());

        let p = tmp.path().join("custom.toml");
        fs::write(&p, "trending_limit = 3\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        assert_eq!(EngineConfig::load_default().unwrap().trending_limit, 3);

        env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
        assert!(EngineConfig::load_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }

    #[test]
    fn builtin_lexicons_without_override() {
        let lex = EngineConfig::default().lexicons().unwrap();
        assert_eq!(&lex, Lexicons::builtin());
    }
}
