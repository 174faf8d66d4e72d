//! Engagement statistics over an account's recent posts.
//!
//! Per-post engagement rate is `(likes + comments) / followers * 100`. It is
//! only defined when the follower count is known and positive; otherwise the
//! chart is empty and the average engagement is zero.

use tracing::debug;

use crate::media::{AccountAnalysis, BusinessDiscovery, EngagementPoint, PostSummary};

/// Compute the engagement report for `username` from a business discovery payload.
///
/// Averages are taken over the posts actually returned. Likes and comments
/// are rounded to 2 decimals, engagement percentages to 4.
pub fn compute_metrics(
    username: &str,
    discovery: &BusinessDiscovery,
    scraped_at: i64,
) -> AccountAnalysis {
    let media = discovery.posts();
    let followers = discovery.followers_count;
    let n = media.len();

    // A zero media_count is treated the same as a missing one.
    let posts_count = match discovery.media_count {
        Some(count) if count > 0 => count,
        _ => n as u64,
    };

    let mut posts = Vec::with_capacity(n);
    let mut er_chart = Vec::new();
    let mut likes_sum = 0u64;
    let mut comments_sum = 0u64;
    let mut er_sum = 0.0f64;

    for post in media {
        let likes = post.like_count.unwrap_or(0);
        let comments = post.comments_count.unwrap_or(0);
        likes_sum += likes;
        comments_sum += comments;

        if let Some(f) = followers
            && f > 0
        {
            let er = (likes + comments) as f64 / f as f64 * 100.0;
            er_sum += er;
            er_chart.push(EngagementPoint {
                timestamp: post.timestamp.clone(),
                permalink: post.permalink.clone(),
                er_percent: round_to(er, 4),
            });
        }

        posts.push(PostSummary {
            id: post.id.clone(),
            caption: post.caption.clone().unwrap_or_default(),
            likes,
            comments,
            timestamp: post.timestamp.clone(),
            permalink: post.permalink.clone(),
            media_type: post.media_type.clone(),
        });
    }

    let (avg_likes, avg_comments, avg_engagement) = if n > 0 {
        (
            likes_sum as f64 / n as f64,
            comments_sum as f64 / n as f64,
            er_sum / n as f64,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    debug!(username, n, ?followers, "computed engagement metrics");

    AccountAnalysis {
        username: username.to_string(),
        scraped_at,
        followers,
        posts_count,
        n_returned_posts: n,
        avg_likes: round_to(avg_likes, 2),
        avg_comments: round_to(avg_comments, 2),
        avg_engagement_percent: round_to(avg_engagement, 4),
        posts,
        er_chart,
    }
}

/// Round to a fixed number of decimal places, ties to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
