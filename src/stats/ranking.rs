// Country ranking by a named statistic.
//
// Shared by the all-countries and favorites ranking endpoints. The sort is
// stable, so countries with equal values keep their input order, and ranks
// are dense and 1-based with no shared places.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::StatsError;
use super::models::CountrySummary;

/// A numeric field of `CountrySummary`, named as the provider names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    NewConfirmed,
    NewDeaths,
    NewRecovered,
    TotalConfirmed,
    TotalDeaths,
    TotalRecovered,
}

impl Statistic {
    pub const ALL: [Statistic; 6] = [
        Statistic::NewConfirmed,
        Statistic::NewDeaths,
        Statistic::NewRecovered,
        Statistic::TotalConfirmed,
        Statistic::TotalDeaths,
        Statistic::TotalRecovered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::NewConfirmed => "NewConfirmed",
            Statistic::NewDeaths => "NewDeaths",
            Statistic::NewRecovered => "NewRecovered",
            Statistic::TotalConfirmed => "TotalConfirmed",
            Statistic::TotalDeaths => "TotalDeaths",
            Statistic::TotalRecovered => "TotalRecovered",
        }
    }

    /// Read this statistic off a summary.
    pub fn value_of(&self, summary: &CountrySummary) -> i64 {
        match self {
            Statistic::NewConfirmed => summary.new_confirmed,
            Statistic::NewDeaths => summary.new_deaths,
            Statistic::NewRecovered => summary.new_recovered,
            Statistic::TotalConfirmed => summary.total_confirmed,
            Statistic::TotalDeaths => summary.total_deaths,
            Statistic::TotalRecovered => summary.total_recovered,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| StatsError::UnknownStatistic(s.to_string()))
    }
}

/// One place in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCountry {
    pub rank: usize,
    pub country: String,
    pub value: i64,
}

/// Rank `summaries` in descending order of `stat_name`.
///
/// Fails with `UnknownStatistic` when the name isn't one of the numeric
/// summary fields.
pub fn rank(summaries: &[CountrySummary], stat_name: &str) -> Result<Vec<RankedCountry>, StatsError> {
    let stat: Statistic = stat_name.parse()?;
    Ok(rank_by(summaries, stat))
}

/// Rank by an already-validated statistic.
///
/// `rank` is the entry point for a raw statistic name. Callers that parse
/// the name up front (the ranking endpoints and the CLI, which reject an
/// unknown statistic before fetching anything) come here directly.
pub fn rank_by(summaries: &[CountrySummary], stat: Statistic) -> Vec<RankedCountry> {
    let mut ordered: Vec<&CountrySummary> = summaries.iter().collect();
    // sort_by is stable: equal values stay in input order
    ordered.sort_by(|a, b| stat.value_of(b).cmp(&stat.value_of(a)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedCountry {
            rank: i + 1,
            country: summary.country.clone(),
            value: stat.value_of(summary),
        })
        .collect()
}
