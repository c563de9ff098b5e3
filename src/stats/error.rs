// Domain error kinds for country resolution, ranking, and aggregation.
//
// NoMatch / AmbiguousMatch / UnknownStatistic are expected outcomes the web
// layer branches on. DivisionByZero / UpstreamDataUnavailable are hard
// failures of a computation and surface as "data unavailable" responses.

use thiserror::Error;

use super::models::CountryDirectoryEntry;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("no country matches the query")]
    NoMatch,

    #[error("query matched {} countries", .0.len())]
    AmbiguousMatch(Vec<CountryDirectoryEntry>),

    #[error("statistic not available: {0}")]
    UnknownStatistic(String),

    #[error("cannot compute percentage: {0} is zero")]
    DivisionByZero(&'static str),

    #[error("statistics data unavailable: {0}")]
    UpstreamDataUnavailable(String),
}

impl StatsError {
    /// True for failures the caller should report as "data unavailable"
    /// rather than as a problem with the request.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            StatsError::DivisionByZero(_) | StatsError::UpstreamDataUnavailable(_)
        )
    }
}
