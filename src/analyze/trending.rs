//! Trending hashtags: occurrence counts across the whole collection.
//!
//! Every occurrence counts, including a tag repeated within one post. Ties
//! keep the order in which tags were first seen while scanning posts in
//! input order (stable sort over first-seen order).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::post::Post;

/// Default number of trending tags returned.
pub const TRENDING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagStat {
    pub tag: String,
    pub count: u32,
}

/// Top `limit` tags by count.
pub fn trending_with_limit(posts: &[Post], limit: usize) -> Vec<HashtagStat> {
    // first-seen order is the vector order; the map only points into it
    let mut stats: Vec<HashtagStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in posts.iter().flat_map(|p| p.hashtags.iter()) {
        match index.get(tag.as_str()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(tag.as_str(), stats.len());
                stats.push(HashtagStat {
                    tag: tag.clone(),
                    count: 1,
                });
            }
        }
    }

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(limit);
    stats
}

/// Top five tags.
pub fn trending(posts: &[Post]) -> Vec<HashtagStat> {
    trending_with_limit(posts, TRENDING_LIMIT)
}
