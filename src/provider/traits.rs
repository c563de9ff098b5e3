// Provider trait — read-only access to the upstream statistics API.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::stats::models::{CountryDirectoryEntry, CountryTotals, ProviderSummary};

/// Directory and summary come back behind an `Arc` so a cache can hand out
/// the same document to every caller.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// The provider's country directory, in the provider's order.
    async fn countries(&self) -> Result<Arc<Vec<CountryDirectoryEntry>>>;

    /// Global totals plus one summary per country.
    async fn summary(&self) -> Result<Arc<ProviderSummary>>;

    /// The most recent day of running totals for one country.
    async fn latest_totals(&self, slug: &str) -> Result<CountryTotals>;
}
