//! Engagement summary: rounded per-post averages and the best performer.

use serde::Serialize;

use crate::post::Post;

/// Averages are rounded half up. `best_post` borrows from the input slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSummary<'a> {
    pub average_likes: u64,
    pub average_replies: u64,
    pub average_retweets: u64,
    pub total_posts: usize,
    pub best_post: &'a Post,
}

/// `None` for an empty collection.
pub fn aggregate(posts: &[Post]) -> Option<EngagementSummary<'_>> {
    let (first, rest) = posts.split_first()?;

    let (mut likes, mut replies, mut retweets) = (0u64, 0u64, 0u64);
    for p in posts {
        likes += u64::from(p.likes);
        replies += u64::from(p.replies);
        retweets += u64::from(p.retweets);
    }

    // strict `>`: the earliest maximal post wins
    let best_post = rest.iter().fold(first, |best, cur| {
        if cur.engagement_total() > best.engagement_total() {
            cur
        } else {
            best
        }
    });

    let n = posts.len() as u64;
    Some(EngagementSummary {
        average_likes: round_half_up(likes, n),
        average_replies: round_half_up(replies, n),
        average_retweets: round_half_up(retweets, n),
        total_posts: posts.len(),
        best_post,
    })
}

/// `round(sum / n)` with .5 rounding up, in integer arithmetic.
pub(crate) fn round_half_up(sum: u64, n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    (2 * sum + n) / (2 * n)
}
