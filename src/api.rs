//! HTTP shell around the insight engine.
//!
//! Stateless: the composer posts text, the feed view posts its current
//! snapshot, and nothing is stored between requests.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::EngineConfig;
use crate::engine::{ComposerInsights, InsightEngine};
use crate::error::{validate_content, ApiError};
use crate::metrics::{record_compose, record_feed, record_post_created};
use crate::post::{NewPost, Post};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<InsightEngine>,
}

impl AppState {
    pub fn new(engine: InsightEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Engine built from `EngineConfig::load_default()` (file + env).
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = EngineConfig::load_default()?;
        info!(
            target: "insights",
            utc_offset_minutes = cfg.utc_offset_minutes,
            lexicon_override = cfg.lexicon_path.is_some(),
            "engine config loaded"
        );
        Ok(Self::new(InsightEngine::from_config(cfg)?))
    }

    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/compose", post(compose))
        .route("/posts", post(create_post))
        .route("/insights", post(feed_insights))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct ComposeReq {
    content: String,
}

async fn compose(
    State(state): State<AppState>,
    Json(body): Json<ComposeReq>,
) -> Result<Json<ComposerInsights>, ApiError> {
    validate_content(&body.content, state.engine.config().max_content_chars)?;
    let out = state.engine.compose(&body.content);
    record_compose(out.sentiment);
    Ok(Json(out))
}

async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<NewPost>,
) -> Result<Json<Post>, ApiError> {
    if body.id.trim().is_empty() {
        return Err(ApiError::MissingField("id"));
    }
    validate_content(&body.content, state.engine.config().max_content_chars)?;
    let post = state.engine.create_post(body, Utc::now());
    if let Some(s) = post.sentiment {
        record_post_created(s);
    }
    Ok(Json(post))
}

async fn feed_insights(
    State(state): State<AppState>,
    Json(posts): Json<Vec<Post>>,
) -> Result<Response, ApiError> {
    let max = state.engine.config().max_posts;
    if posts.len() > max {
        return Err(ApiError::TooManyPosts {
            got: posts.len(),
            max,
        });
    }
    record_feed(posts.len());
    // serialized here because the summary borrows from `posts`
    Ok(Json(state.engine.feed_insights(&posts)).into_response())
}
