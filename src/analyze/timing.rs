//! # Optimal posting hour
//!
//! Each post adds `likes + replies` to the bucket of its hour-of-day in the
//! requested time zone. Only hours that actually hold a post compete; the
//! highest total wins and equal totals resolve to the smallest hour.

use chrono::{Local, TimeZone, Timelike};
use serde::Serialize;

use crate::post::Post;

/// Winning hour with its accumulated weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    /// 0..=23 in the requested zone.
    pub hour: u32,
    pub engagement: u64,
}

impl HourBucket {
    pub fn label(&self) -> String {
        format_hour_12h(self.hour)
    }
}

/// Best hour in zone `tz`, or `None` for an empty collection.
pub fn best_hour<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> Option<HourBucket> {
    let mut buckets: [Option<u64>; 24] = [None; 24];
    for p in posts {
        let hour = p.timestamp.with_timezone(tz).hour() as usize;
        let weight = u64::from(p.likes) + u64::from(p.replies);
        *buckets[hour].get_or_insert(0) += weight;
    }

    let mut best: Option<HourBucket> = None;
    for (hour, total) in buckets.iter().enumerate() {
        let Some(total) = *total else { continue };
        // ascending scan + strict `>` keeps the smallest hour on ties
        if best.map_or(true, |b| total > b.engagement) {
            best = Some(HourBucket {
                hour: hour as u32,
                engagement: total,
            });
        }
    }
    best
}

/// Formatted best hour in zone `tz`.
pub fn optimal_hour_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> Option<String> {
    best_hour(posts, tz).map(|b| b.label())
}

/// Formatted best hour in the machine's local zone.
pub fn optimal_hour(posts: &[Post]) -> Option<String> {
    optimal_hour_in(posts, &Local)
}

/// 12-hour clock label: 0 → "12:00 AM", 13 → "1:00 PM".
pub fn format_hour_12h(hour: u32) -> String {
    match hour % 24 {
        0 => "12:00 AM".to_string(),
        h @ 1..=11 => format!("{h}:00 AM"),
        12 => "12:00 PM".to_string(),
        h => format!("{}:00 PM", h - 12),
    }
}
