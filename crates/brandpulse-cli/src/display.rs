//! Human-readable cards for account reports and model bundles.

use std::path::Path;

use brandpulse_ai::{BundleSummary, UnknownBrand};
use brandpulse_core::AccountAnalysis;

const MAX_LIST_ITEMS: usize = 10;
const CAPTION_WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;

// ── Public API ──

/// Print an engagement report as a vertical card.
pub fn print_analysis(report: &AccountAnalysis) {
    println!("=== @{} ===", report.username);
    println!("scraped {}", format_timestamp(report.scraped_at));
    println!();

    println!("Account");
    println!("  {:<26} {}", "followers", opt(report.followers));
    println!("  {:<26} {}", "posts", report.posts_count);
    println!("  {:<26} {}", "returned posts", report.n_returned_posts);
    println!();

    println!("Averages");
    println!("  {:<26} {:.2}", "likes", report.avg_likes);
    println!("  {:<26} {:.2}", "comments", report.avg_comments);
    println!(
        "  {:<26} {:.4}%",
        "engagement rate", report.avg_engagement_percent
    );
    println!();

    print_posts(report);
    print_er_chart(report);
}

/// Print the shape of a loaded model bundle.
pub fn print_model_summary(dir: &Path, summary: &BundleSummary) {
    println!("=== {} ===", dir.display());
    println!();

    println!("Features");
    println!("  {:<26} {}", "text (tf-idf)", summary.text_dim);
    println!("  {:<26} {}", "brand (one-hot)", summary.brand_dim);
    println!("  {:<26} {}", "classifier input", summary.n_features);
    println!();

    println!("Labels");
    println!("  {}", summary.labels.join(", "));
    println!();

    println!("Brands ({}):", summary.brands.len());
    for brand in summary.brands.iter().take(MAX_LIST_ITEMS) {
        println!("    {brand}");
    }
    if summary.brands.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", summary.brands.len() - MAX_LIST_ITEMS);
    }
    println!("  {:<26} {}", "unseen brands", unknown_policy(&summary.unknown_brand));
}

// ── Sections ──

fn print_posts(report: &AccountAnalysis) {
    if report.posts.is_empty() {
        return;
    }
    println!("Posts ({}):", report.posts.len());
    for post in report.posts.iter().take(MAX_LIST_ITEMS) {
        print!(
            "    {:<16}",
            post.media_type.as_deref().unwrap_or("-")
        );
        print!("  {:>7} likes  {:>5} comments", post.likes, post.comments);
        if let Some(ts) = &post.timestamp {
            print!("  {ts}");
        }
        println!();
        let caption = truncate(&post.caption, CAPTION_WIDTH);
        if !caption.is_empty() {
            println!("      {caption}");
        }
    }
    if report.posts.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", report.posts.len() - MAX_LIST_ITEMS);
    }
    println!();
}

fn print_er_chart(report: &AccountAnalysis) {
    if report.er_chart.is_empty() {
        return;
    }
    let max = report
        .er_chart
        .iter()
        .map(|p| p.er_percent)
        .fold(0.0f64, f64::max);

    println!("Engagement chart");
    for point in report.er_chart.iter().take(MAX_LIST_ITEMS) {
        let when = point.timestamp.as_deref().unwrap_or("-");
        println!(
            "  {:<26} {:>8.4}%  {}",
            when,
            point.er_percent,
            bar(point.er_percent, max)
        );
    }
    if report.er_chart.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", report.er_chart.len() - MAX_LIST_ITEMS);
    }
    println!();
}

// ── Helpers ──

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn unknown_policy(policy: &UnknownBrand) -> String {
    match policy {
        UnknownBrand::Ignore => "ignored (zero brand block)".to_string(),
        UnknownBrand::Fallback(brand) => format!("encoded as \"{brand}\""),
    }
}

/// Single-line caption, cut at `max` characters with a trailing ellipsis.
fn truncate(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Horizontal bar scaled so that `max` fills [`BAR_WIDTH`].
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}
