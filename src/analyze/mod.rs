// src/analyze/mod.rs
//! Feed-level analytics over a snapshot of posts: trending tags, engagement,
//! sentiment mix, and the best posting hour. Everything here is a pure
//! function of the slice it is given.

pub mod distribution;
pub mod engagement;
pub mod timing;
pub mod trending;

// Re-export convenient types.
pub use crate::analyze::distribution::{distribution, SentimentDistribution};
pub use crate::analyze::engagement::{aggregate, EngagementSummary};
pub use crate::analyze::timing::{best_hour, format_hour_12h, optimal_hour, optimal_hour_in, HourBucket};
pub use crate::analyze::trending::{trending, trending_with_limit, HashtagStat};
