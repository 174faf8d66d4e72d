//! Shared types for Instagram business discovery payloads and analysis reports.

use serde::{Deserialize, Serialize};

/// Public metrics of a business/creator account as returned by the
/// `business_discovery` Graph API edge.
///
/// Every field is optional: the Graph API omits fields the account does not
/// expose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessDiscovery {
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub media_count: Option<u64>,
    #[serde(default)]
    pub media: Option<MediaPage>,
}

impl BusinessDiscovery {
    /// Posts returned in the first media page, empty if none.
    pub fn posts(&self) -> &[Media] {
        self.media.as_ref().map(|m| m.data.as_slice()).unwrap_or_default()
    }
}

/// One page of the `media` edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub data: Vec<Media>,
}

/// A single post as returned by the Graph API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comments_count: Option<u64>,
    /// ISO 8601 timestamp string.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Flattened post entry in an [`AccountAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Option<String>,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub timestamp: Option<String>,
    pub permalink: Option<String>,
    pub media_type: Option<String>,
}

/// Per-post engagement rate, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPoint {
    pub timestamp: Option<String>,
    pub permalink: Option<String>,
    pub er_percent: f64,
}

/// Engagement report for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAnalysis {
    pub username: String,
    /// Unix seconds at which the Graph API was queried.
    pub scraped_at: i64,
    pub followers: Option<u64>,
    pub posts_count: u64,
    pub n_returned_posts: usize,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_engagement_percent: f64,
    pub posts: Vec<PostSummary>,
    pub er_chart: Vec<EngagementPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_discovery_parses_graph_payload() {
        let json = r#"{
            "followers_count": 1200,
            "media_count": 87,
            "media": {
                "data": [
                    {
                        "id": "17900000000000001",
                        "caption": "New drop",
                        "like_count": 40,
                        "comments_count": 2,
                        "timestamp": "2025-09-01T10:00:00+0000",
                        "permalink": "https://www.instagram.com/p/abc/",
                        "media_type": "IMAGE"
                    }
                ]
            },
            "id": "17841400000000000"
        }"#;
        let bd: BusinessDiscovery = serde_json::from_str(json).unwrap();
        assert_eq!(bd.followers_count, Some(1200));
        assert_eq!(bd.media_count, Some(87));
        assert_eq!(bd.posts().len(), 1);
        assert_eq!(bd.posts()[0].like_count, Some(40));
    }

    #[test]
    fn business_discovery_tolerates_missing_fields() {
        let bd: BusinessDiscovery = serde_json::from_str("{}").unwrap();
        assert!(bd.followers_count.is_none());
        assert!(bd.posts().is_empty());

        let media: Media = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert!(media.caption.is_none());
        assert!(media.like_count.is_none());
    }
}
