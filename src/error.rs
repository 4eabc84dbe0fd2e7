//! Error type for the HTTP shell.
//!
//! The engine itself is total; these are the caller-side validation failures
//! the shell rejects before invoking it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Post text is empty or whitespace only.
    #[error("content must not be blank")]
    BlankContent,

    /// Post text exceeds the configured character limit.
    #[error("content has {len} characters, limit is {max}")]
    ContentTooLong { len: usize, max: usize },

    /// A required identifier is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// More posts than one request may carry.
    #[error("{got} posts submitted, limit is {max}")]
    TooManyPosts { got: usize, max: usize },
}

impl ApiError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::BlankContent => "blank_content",
            Self::ContentTooLong { .. } => "content_too_long",
            Self::MissingField(_) => "missing_field",
            Self::TooManyPosts { .. } => "too_many_posts",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let reason = self.reason();
        warn!(target: "insights", reason, error = %self, "request rejected");
        counter!("insights_rejected_total", "reason" => reason).increment(1);

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Reject blank or over-long post text.
pub fn validate_content(content: &str, max_chars: usize) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::BlankContent);
    }
    let len = content.chars().count();
    if len > max_chars {
        return Err(ApiError::ContentTooLong { len, max: max_chars });
    }
    Ok(())
}
