// HTTP client for the upstream statistics API.
//
// Endpoints used:
//   GET /countries                  — country directory (Country, Slug, ISO2)
//   GET /summary                    — Global totals + per-country summaries
//   GET /total/country/{slug}       — day-by-day running totals for a country
//
// A body that doesn't decode into the expected shape is reported as
// StatsError::UpstreamDataUnavailable rather than defaulted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::traits::StatsProvider;
use crate::stats::error::StatsError;
use crate::stats::models::{CountryDirectoryEntry, CountryTotals, ProviderSummary};

pub const DEFAULT_API_URL: &str = "https://api.covid19api.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpStatsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatsProvider {
    /// Create a client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("covid-watch/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Statistics provider request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Statistics provider returned {} for {}: {}", status, path, body);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read statistics provider response: {path}"))?;

        debug!(path, bytes = bytes.len(), "Statistics provider response received");

        serde_json::from_slice(&bytes)
            .map_err(|e| StatsError::UpstreamDataUnavailable(format!("{path}: {e}")).into())
    }
}

#[async_trait]
impl StatsProvider for HttpStatsProvider {
    async fn countries(&self) -> Result<Arc<Vec<CountryDirectoryEntry>>> {
        self.get_json("/countries").await.map(Arc::new)
    }

    async fn summary(&self) -> Result<Arc<ProviderSummary>> {
        self.get_json("/summary").await.map(Arc::new)
    }

    async fn latest_totals(&self, slug: &str) -> Result<CountryTotals> {
        let days: Vec<CountryTotals> = self.get_json(&format!("/total/country/{slug}")).await?;
        days.into_iter().next_back().ok_or_else(|| {
            StatsError::UpstreamDataUnavailable(format!("no daily totals for {slug}")).into()
        })
    }
}
