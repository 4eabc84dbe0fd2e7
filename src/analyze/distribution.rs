//! Sentiment mix of a collection, as whole percentages.
//!
//! Only posts with a label count towards `total`. Percentages use the
//! largest-remainder method so a non-empty mix always adds up to exactly 100.
//! Remainder ties go to positive, then negative, then neutral.

use serde::{Deserialize, Serialize};

use crate::post::{Post, Sentiment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive_pct: u32,
    pub negative_pct: u32,
    pub neutral_pct: u32,
    /// Number of labelled posts.
    pub total: usize,
}

impl SentimentDistribution {
    pub fn pct(&self, s: Sentiment) -> u32 {
        match s {
            Sentiment::Positive => self.positive_pct,
            Sentiment::Negative => self.negative_pct,
            Sentiment::Neutral => self.neutral_pct,
        }
    }
}

pub fn distribution(posts: &[Post]) -> SentimentDistribution {
    let mut counts = [0usize; 3];
    for s in posts.iter().filter_map(|p| p.sentiment) {
        counts[slot(s)] += 1;
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return SentimentDistribution::default();
    }

    let mut pct = [0u32; 3];
    let mut remainders = [(0usize, 0usize); 3];
    for i in 0..3 {
        let scaled = counts[i] * 100;
        pct[i] = (scaled / total) as u32;
        remainders[i] = (scaled % total, i);
    }

    let mut left = 100 - pct.iter().sum::<u32>();
    // larger remainder first, declaration order on ties
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter() {
        if left == 0 {
            break;
        }
        pct[i] += 1;
        left -= 1;
    }

    SentimentDistribution {
        positive_pct: pct[0],
        negative_pct: pct[1],
        neutral_pct: pct[2],
        total,
    }
}

fn slot(s: Sentiment) -> usize {
    match s {
        Sentiment::Positive => 0,
        Sentiment::Negative => 1,
        Sentiment::Neutral => 2,
    }
}
