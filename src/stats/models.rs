// Statistics data model — the provider's records as Rust types.
//
// Field names on the wire follow the provider's PascalCase JSON. Records are
// built fresh per request and never persisted; percentages are derived in
// `aggregate`, never stored here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the provider's country directory (`GET /countries`).
///
/// Serialized as `{name, slug, code}` when returned to API callers as a
/// disambiguation candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDirectoryEntry {
    #[serde(rename(deserialize = "Country", serialize = "name"))]
    pub name: String,
    #[serde(rename(deserialize = "Slug", serialize = "slug"))]
    pub slug: String,
    #[serde(rename(deserialize = "ISO2", serialize = "code"))]
    pub iso2: String,
}

/// User-assigned priority on a favorite country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchLevel {
    High,
    Middle,
    Low,
}

impl WatchLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchLevel::High => "high",
            WatchLevel::Middle => "middle",
            WatchLevel::Low => "low",
        }
    }
}

impl fmt::Display for WatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWatchLevel(pub String);

impl fmt::Display for InvalidWatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WatchLevel must be \"high\", \"middle\" or \"low\" (got {:?})",
            self.0
        )
    }
}

impl std::error::Error for InvalidWatchLevel {}

impl FromStr for WatchLevel {
    type Err = InvalidWatchLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(WatchLevel::High),
            "middle" => Ok(WatchLevel::Middle),
            "low" => Ok(WatchLevel::Low),
            other => Err(InvalidWatchLevel(other.to_string())),
        }
    }
}

/// A country's cumulative and daily-new counts as of `date`.
///
/// `watch_level` is only present when the summary was hydrated from a
/// user's favorites list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountrySummary {
    pub country: String,
    pub slug: String,
    pub date: DateTime<Utc>,
    pub new_confirmed: i64,
    pub new_deaths: i64,
    pub new_recovered: i64,
    pub total_confirmed: i64,
    pub total_deaths: i64,
    pub total_recovered: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_level: Option<WatchLevel>,
}

impl CountrySummary {
    /// Copy of this summary tagged with a favorite's watch level.
    pub fn with_watch_level(&self, level: WatchLevel) -> Self {
        Self {
            watch_level: Some(level),
            ..self.clone()
        }
    }
}

/// World-wide cumulative totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSummary {
    pub total_confirmed: i64,
    pub total_deaths: i64,
    pub total_recovered: i64,
}

/// The provider's `Global` block: world-wide daily-new and cumulative counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalStats {
    pub new_confirmed: i64,
    pub total_confirmed: i64,
    pub new_deaths: i64,
    pub total_deaths: i64,
    pub new_recovered: i64,
    pub total_recovered: i64,
    pub date: DateTime<Utc>,
}

impl GlobalStats {
    /// The cumulative totals percentage reports are computed against.
    pub fn totals(&self) -> GlobalSummary {
        GlobalSummary {
            total_confirmed: self.total_confirmed,
            total_deaths: self.total_deaths,
            total_recovered: self.total_recovered,
        }
    }
}

/// The provider's `GET /summary` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSummary {
    pub global: GlobalStats,
    pub countries: Vec<CountrySummary>,
}

impl ProviderSummary {
    /// Look up a country's summary by its provider slug.
    pub fn country_by_slug(&self, slug: &str) -> Option<&CountrySummary> {
        self.countries.iter().find(|c| c.slug == slug)
    }

    /// True if the provider knows a country with this slug.
    pub fn has_slug(&self, slug: &str) -> bool {
        self.country_by_slug(slug).is_some()
    }
}

/// One day of a country's running totals (`GET /total/country/{slug}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryTotals {
    pub country: String,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    pub active: i64,
    pub date: DateTime<Utc>,
}
