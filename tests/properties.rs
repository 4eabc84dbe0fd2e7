// tests/properties.rs
//
// Randomized invariant checks (seeded, so failures are reproducible).

use chrono::{Duration, TimeZone, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

use feed_insights::analyze::{aggregate, distribution, trending};
use feed_insights::hashtags::suggest;
use feed_insights::recommend::recommend;
use feed_insights::replies::generate;
use feed_insights::sentiment::classify;
use feed_insights::{Post, Sentiment};

const VOCAB: &[&str] = &[
    "ai", "work", "launch", "love", "sad", "terrible", "happy", "food", "travel", "the", "a",
    "great!", "🚀", "💔", "learn", "fitness", "startup", "meeting", "hello", "world", "",
];
const TAGS: &[&str] = &["rust", "go", "zig", "ai", "food", "travel"];

fn random_text(rng: &mut StdRng) -> String {
    let n = rng.random_range(0..12);
    (0..n)
        .map(|_| VOCAB[rng.random_range(0..VOCAB.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_posts(rng: &mut StdRng) -> Vec<Post> {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let n = rng.random_range(0..20);
    (0..n)
        .map(|i| {
            let tags: Vec<&str> = (0..rng.random_range(0..4))
                .map(|_| TAGS[rng.random_range(0..TAGS.len())])
                .collect();
            let mut p = Post::new(i.to_string(), "", base + Duration::minutes(rng.random_range(0..5000)))
                .engagement(rng.random_range(0..50), rng.random_range(0..20), rng.random_range(0..20))
                .tags(tags);
            p.sentiment = match rng.random_range(0..4) {
                0 => None,
                1 => Some(Sentiment::Positive),
                2 => Some(Sentiment::Negative),
                _ => Some(Sentiment::Neutral),
            };
            p
        })
        .collect()
}

#[test]
fn text_properties_hold_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let text = random_text(&mut rng);
        let s = classify(&text);
        assert!(Sentiment::ALL.contains(&s));

        let tags = suggest(&text);
        assert!(tags.len() <= 4, "too many tags for {text:?}: {tags:?}");
        let uniq: HashSet<&String> = tags.iter().collect();
        assert_eq!(uniq.len(), tags.len(), "duplicate tag for {text:?}");

        assert!(generate(&text, s).len() <= 3);
    }
}

#[test]
fn feed_properties_hold_for_random_snapshots() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let posts = random_posts(&mut rng);

        // trending: non-increasing counts, ties in first-seen order
        let t = trending(&posts);
        assert!(t.len() <= 5);
        let first_seen: Vec<&str> = {
            let mut seen = HashSet::new();
            posts
                .iter()
                .flat_map(|p| p.hashtags.iter())
                .map(String::as_str)
                .filter(|tag| seen.insert(*tag))
                .collect()
        };
        for w in t.windows(2) {
            assert!(w[0].count >= w[1].count);
            if w[0].count == w[1].count {
                let i = first_seen.iter().position(|x| *x == w[0].tag).unwrap();
                let j = first_seen.iter().position(|x| *x == w[1].tag).unwrap();
                assert!(i < j);
            }
        }

        // engagement: average and best post
        match aggregate(&posts) {
            None => assert!(posts.is_empty()),
            Some(s) => {
                let n = posts.len() as f64;
                let likes: u64 = posts.iter().map(|p| u64::from(p.likes)).sum();
                assert_eq!(s.average_likes, (likes as f64 / n + 0.5).floor() as u64);
                assert!(posts
                    .iter()
                    .all(|p| p.engagement_total() <= s.best_post.engagement_total()));
                let first_max = posts
                    .iter()
                    .find(|p| p.engagement_total() == s.best_post.engagement_total())
                    .unwrap();
                assert_eq!(first_max.id, s.best_post.id);
            }
        }

        // distribution: exact 100 or all zero
        let d = distribution(&posts);
        let sum = d.positive_pct + d.negative_pct + d.neutral_pct;
        if d.total == 0 {
            assert_eq!(sum, 0);
        } else {
            assert_eq!(sum, 100);
        }

        assert!(recommend(&posts).len() <= 3);
    }
}
