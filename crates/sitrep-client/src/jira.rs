//! Jira search client.

use async_trait::async_trait;
use serde::Deserialize;
use sitrep_config::SitrepConfig;
use sitrep_core::tracker::TrackerRow;
use tracing::debug;

use crate::error::ClientError;
use crate::http::{build_client, check_response};
use crate::tracker::IssueTracker;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<TrackerRow>,
}

/// Authenticated client for the Jira search API.
///
/// Searches go to the configured search path first. When that endpoint is
/// gone (404/410) the fallback path is tried once.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
    search_path: String,
    fallback_search_path: String,
}

impl JiraClient {
    /// Build a client from the `jira` and `atlassian` sections.
    ///
    /// The API base falls back to the Confluence site root when
    /// `jira.base_url` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConfigured`] when no base URL or no
    /// credentials are set, or [`ClientError::Http`] if the HTTP client
    /// cannot be built.
    pub fn from_config(config: &SitrepConfig) -> Result<Self, ClientError> {
        let base_url = config.browse_base_url();
        if base_url.is_empty() {
            return Err(ClientError::NotConfigured("jira.base_url"));
        }
        if !config.atlassian.is_configured() {
            return Err(ClientError::NotConfigured("atlassian credentials"));
        }
        Ok(Self {
            http: build_client(config.jira.timeout_secs)?,
            base_url,
            email: config.atlassian.email.clone(),
            api_token: config.atlassian.api_token.clone(),
            search_path: config.jira.search_path.clone(),
            fallback_search_path: config.jira.fallback_search_path.clone(),
        })
    }

    fn search_url(&self, path: &str, query: &str, fields: &[String], max_results: usize) -> String {
        format!(
            "{}{}?jql={}&fields={}&maxResults={max_results}",
            self.base_url,
            path,
            urlencoding::encode(query),
            urlencoding::encode(&fields.join(",")),
        )
    }

    async fn search_at(
        &self,
        path: &str,
        query: &str,
        fields: &[String],
        max_results: usize,
    ) -> Result<Vec<TrackerRow>, ClientError> {
        let url = self.search_url(path, query, fields, max_results);
        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body = resp.text().await?;
        parse_search(&body)
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search(
        &self,
        query: &str,
        fields: &[String],
        max_results: usize,
    ) -> Result<Vec<TrackerRow>, ClientError> {
        match self.search_at(&self.search_path, query, fields, max_results).await {
            Err(ClientError::Api {
                status: 404 | 410, ..
            }) if !self.fallback_search_path.is_empty() => {
                debug!(path = %self.fallback_search_path, "search endpoint gone, using fallback");
                self.search_at(&self.fallback_search_path, query, fields, max_results)
                    .await
            }
            result => result,
        }
    }
}

fn parse_search(body: &str) -> Result<Vec<TrackerRow>, ClientError> {
    serde_json::from_str::<SearchResponse>(body)
        .map(|data| data.issues)
        .map_err(|e| ClientError::Parse(format!("search response: {e}")))
}
