// Statistics core — country resolution, ranking, and percentage reports.
//
// Everything here is a pure function over data the provider has already
// returned. Nothing is cached or persisted, and no call shares state with
// another.

pub mod aggregate;
pub mod error;
pub mod favorites;
pub mod models;
pub mod ranking;
pub mod resolver;

pub use aggregate::{percentage_report, PercentageReport};
pub use error::StatsError;
pub use models::{
    CountryDirectoryEntry, CountrySummary, CountryTotals, GlobalStats, GlobalSummary,
    ProviderSummary, WatchLevel,
};
pub use ranking::{rank, RankedCountry, Statistic};
pub use resolver::{resolve, ResolutionResult};
