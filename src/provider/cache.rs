// Response cache in front of a StatsProvider.
//
// Each endpoint gets its own moka cache with the same time-to-live.
// `try_get_with` runs one upstream fetch per key however many requests miss
// at once, and only a successful fetch is stored, so a provider outage is
// retried on the next request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use super::traits::StatsProvider;
use crate::stats::error::StatsError;
use crate::stats::models::{CountryDirectoryEntry, CountryTotals, ProviderSummary};

/// Default time-to-live for cached provider responses: 10 hours.
pub const DEFAULT_TTL_SECS: u64 = 36_000;

/// Upper bound on cached per-country totals.
const MAX_TOTALS_ENTRIES: u64 = 512;

pub struct CachedStatsProvider<P> {
    inner: P,
    directory: Cache<(), Arc<Vec<CountryDirectoryEntry>>>,
    summary: Cache<(), Arc<ProviderSummary>>,
    totals: Cache<String, CountryTotals>,
}

impl<P: StatsProvider> CachedStatsProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            directory: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            summary: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            totals: Cache::builder()
                .max_capacity(MAX_TOTALS_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<P: StatsProvider> StatsProvider for CachedStatsProvider<P> {
    async fn countries(&self) -> Result<Arc<Vec<CountryDirectoryEntry>>> {
        self.directory
            .try_get_with((), async {
                debug!("Fetching country directory");
                self.inner.countries().await
            })
            .await
            .map_err(unshare)
    }

    async fn summary(&self) -> Result<Arc<ProviderSummary>> {
        self.summary
            .try_get_with((), async {
                debug!("Fetching summary");
                self.inner.summary().await
            })
            .await
            .map_err(unshare)
    }

    async fn latest_totals(&self, slug: &str) -> Result<CountryTotals> {
        self.totals
            .try_get_with(slug.to_string(), async {
                debug!(slug, "Fetching country totals");
                self.inner.latest_totals(slug).await
            })
            .await
            .map_err(unshare)
    }
}

/// moka hands a failed fetch's error to every waiting caller behind an
/// `Arc`. Rebuild an owned error, keeping `StatsError` downcastable.
fn unshare(err: Arc<anyhow::Error>) -> anyhow::Error {
    match err.downcast_ref::<StatsError>() {
        Some(stats_err) => stats_err.clone().into(),
        None => anyhow::anyhow!("{err:#}"),
    }
}
