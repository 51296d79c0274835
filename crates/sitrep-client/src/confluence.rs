//! Confluence page client (REST v2, storage representation).

use async_trait::async_trait;
use serde::Deserialize;
use sitrep_config::SitrepConfig;
use tracing::debug;

use crate::error::ClientError;
use crate::http::{build_client, check_response};
use crate::source::{DocumentSource, SourceDocument};

#[derive(Deserialize)]
struct PageResponse {
    title: String,
    version: Option<PageVersion>,
    body: Option<PageBody>,
}

#[derive(Deserialize)]
struct PageVersion {
    number: u64,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct PageBody {
    storage: Option<StorageBody>,
}

#[derive(Deserialize)]
struct StorageBody {
    value: String,
}

/// Fetches one configured page in storage format.
pub struct ConfluenceClient {
    http: reqwest::Client,
    base_url: String,
    page_id: String,
    email: String,
    api_token: String,
}

impl ConfluenceClient {
    /// # Errors
    ///
    /// Returns [`ClientError::NotConfigured`] when the page or credentials
    /// are missing, or [`ClientError::Http`] if the HTTP client cannot be
    /// built.
    pub fn from_config(config: &SitrepConfig) -> Result<Self, ClientError> {
        if !config.confluence.is_configured() {
            return Err(ClientError::NotConfigured("confluence.base_url/page_id"));
        }
        if !config.atlassian.is_configured() {
            return Err(ClientError::NotConfigured("atlassian credentials"));
        }
        Ok(Self {
            http: build_client(config.confluence.timeout_secs)?,
            base_url: config.confluence.base_url.trim_end_matches('/').to_string(),
            page_id: config.confluence.page_id.clone(),
            email: config.atlassian.email.clone(),
            api_token: config.atlassian.api_token.clone(),
        })
    }

    fn page_url(&self) -> String {
        format!(
            "{}/api/v2/pages/{}?body-format=storage",
            self.base_url,
            urlencoding::encode(&self.page_id)
        )
    }
}

#[async_trait]
impl DocumentSource for ConfluenceClient {
    async fn fetch(&self) -> Result<SourceDocument, ClientError> {
        let url = self.page_url();
        debug!(%url, "fetching page");
        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let resp = check_response(resp).await?;
        parse_page(&resp.text().await?)
    }
}

fn parse_page(body: &str) -> Result<SourceDocument, ClientError> {
    let page: PageResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Parse(format!("page response: {e}")))?;
    let storage = page
        .body
        .and_then(|b| b.storage)
        .ok_or_else(|| ClientError::Parse("page response has no storage body".into()))?;
    let (version, last_modified) = page
        .version
        .map_or((0, None), |v| (v.number, v.created_at));

    Ok(SourceDocument {
        title: page.title,
        version,
        last_modified,
        body: storage.value,
    })
}
