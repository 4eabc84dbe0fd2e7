// src/lib.rs
// Public library surface for integration tests (and reuse by other front ends).

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod hashtags;
pub mod lexicon;
pub mod metrics;
pub mod post;
pub mod recommend;
pub mod replies;
pub mod sentiment;

// Feed-level analytics (trending, engagement, timing, distribution)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::EngineConfig;
pub use crate::engine::{ComposerInsights, FeedInsights, InsightEngine};
pub use crate::post::{NewPost, Post, Sentiment};

use tracing::info;

/// Build the full application router: API routes plus `/metrics` when
/// enabled in config. Used by the binary and by integration tests.
pub fn app() -> anyhow::Result<axum::Router> {
    let state = AppState::from_env()?;
    let mut router = api::router(state.clone());
    if state.engine().config().metrics {
        let m = metrics::Metrics::init(state.engine().config().max_posts)?;
        router = router.merge(m.router());
        info!(target: "insights", "metrics endpoint enabled");
    }
    Ok(router)
}
