//! HTTP client for the `business_discovery` Graph API edge.

use brandpulse_core::{AccountAnalysis, BusinessDiscovery, compute_metrics};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GraphConfig;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response from Graph API (status {status})")]
    InvalidResponse { status: u16 },
    #[error("Graph API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error(
        "no business_discovery data for {username}; the account may not be a public business/creator account"
    )]
    NotFound { username: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field expression for a business discovery query.
pub fn discovery_fields(username: &str, posts_limit: u32) -> String {
    format!(
        "business_discovery.username({username})\
         {{followers_count,media_count,media.limit({posts_limit})\
         {{id,caption,like_count,comments_count,timestamp,permalink,media_type}}}}"
    )
}

/// Graph API client bound to one set of credentials.
pub struct GraphClient {
    client: reqwest::Client,
    config: GraphConfig,
}

impl GraphClient {
    pub fn new(config: GraphConfig) -> Result<Self, GraphError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// GET a Graph API path, returning the decoded JSON body.
    ///
    /// The access token is appended to `params`. Non-JSON bodies, non-2xx
    /// statuses and payloads carrying an `error` object are all errors.
    pub async fn call(&self, api_path: &str, params: &[(&str, &str)]) -> Result<Value, GraphError> {
        let url = self.config.endpoint(api_path);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("access_token", self.config.access_token.as_str()));

        let resp = self.client.get(&url).query(&query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let data: Value = serde_json::from_str(&body).map_err(|_| GraphError::InvalidResponse {
            status: status.as_u16(),
        })?;

        if !status.is_success() || data.get("error").is_some() {
            let message = error_message(&data);
            warn!(status = status.as_u16(), %message, "Graph API returned an error");
            return Err(GraphError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }

    /// Fetch public metrics and the latest `posts_limit` posts of `username`.
    pub async fn business_discovery(
        &self,
        username: &str,
        posts_limit: u32,
    ) -> Result<BusinessDiscovery, GraphError> {
        info!(username, posts_limit, "requesting business discovery");
        let fields = discovery_fields(username, posts_limit);
        let mut data = self
            .call(&self.config.ig_business_id, &[("fields", fields.as_str())])
            .await?;

        match data.get_mut("business_discovery").map(Value::take) {
            None | Some(Value::Null) => Err(GraphError::NotFound {
                username: username.to_string(),
            }),
            Some(Value::Object(m)) if m.is_empty() => Err(GraphError::NotFound {
                username: username.to_string(),
            }),
            Some(bd) => {
                let discovery: BusinessDiscovery = serde_json::from_value(bd)?;
                info!(
                    username,
                    followers = ?discovery.followers_count,
                    posts = discovery.posts().len(),
                    "received business discovery"
                );
                Ok(discovery)
            }
        }
    }

    /// Fetch and compute the engagement report for `username`.
    pub async fn analyze(
        &self,
        username: &str,
        posts_limit: u32,
    ) -> Result<AccountAnalysis, GraphError> {
        let discovery = self.business_discovery(username, posts_limit).await?;
        let scraped_at = chrono::Utc::now().timestamp();
        Ok(compute_metrics(username, &discovery, scraped_at))
    }
}

/// `error.message` when present, otherwise the whole payload.
fn error_message(data: &Value) -> String {
    data.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| data.to_string())
}
