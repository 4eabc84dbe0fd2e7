use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::post::Sentiment;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder. Fails if a recorder is
    /// already installed.
    pub fn init(max_posts: usize) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        // Static gauge with the configured request cap
        gauge!("insights_max_posts").set(max_posts as f64);

        Ok(Self { handle })
    }

    /// `/metrics` route rendering the installed recorder; merged into the app
    /// router by [`crate::app`].
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_compose(sentiment: Sentiment) {
    counter!("insights_compose_total", "sentiment" => sentiment.as_str()).increment(1);
}

/// Counted separately from composer previews.
pub fn record_post_created(sentiment: Sentiment) {
    counter!("insights_posts_created_total", "sentiment" => sentiment.as_str()).increment(1);
}

pub fn record_feed(posts: usize) {
    counter!("insights_feed_total").increment(1);
    histogram!("insights_feed_posts").record(posts as f64);
}
