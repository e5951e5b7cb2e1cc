use crate::config::{self, Settings};
use crate::domain::search::SearchResult;
use crate::outcome::Outcome;
use crate::time::ist::query_date;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_ENGINE: &str = "google_ai";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const SEARCH_PATH: &str = "/search";

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Single attempt. A non-2xx status comes back as `Outcome::SoftFailure`
    /// carrying whatever body the provider returned.
    async fn fetch(&self, as_of_date: NaiveDate) -> Result<Outcome<SearchResult>>;
}

pub fn build_query(as_of_date: NaiveDate) -> String {
    format!(
        "Top penny stocks to buy in India for long-term investment, \
including stock names and IDs for {}",
        query_date(as_of_date)
    )
}

#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    engine: String,
}

impl SerpApiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_serpapi_key()?.to_string();
        let base_url =
            config::env_string("SERPAPI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let engine =
            config::env_string("SERPAPI_ENGINE").unwrap_or_else(|| DEFAULT_ENGINE.to_string());
        let timeout_secs = config::env_u64("SERPAPI_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = build_http(Duration::from_secs(timeout_secs))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            engine,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEARCH_PATH)
    }
}

fn build_http(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build search http client")
}

#[async_trait::async_trait]
impl SearchProvider for SerpApiClient {
    fn provider_name(&self) -> &'static str {
        "serpapi"
    }

    async fn fetch(&self, as_of_date: NaiveDate) -> Result<Outcome<SearchResult>> {
        let query = build_query(as_of_date);

        let res = self
            .http
            .get(self.url())
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                // The query string carries api_key; drop the URL before it reaches logs.
                let err = err.without_url();
                if err.is_timeout() {
                    anyhow::Error::new(err).context("SerpApi request timed out")
                } else {
                    anyhow::Error::new(err).context("SerpApi request failed")
                }
            })?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|err| err.without_url())
            .context("failed to read SerpApi response body")?;

        if status.is_success() {
            tracing::debug!(%status, body = %text, "SerpApi response");
        } else {
            tracing::error!(%status, body = %text, "error fetching SerpApi data");
        }

        let result = SearchResult::from_body(&text)?;
        Ok(Outcome::from_status(status, text, result))
    }
}
