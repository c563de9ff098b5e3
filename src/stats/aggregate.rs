// Percentage report — a single country's totals against the world's.
//
// Every ratio is checked for a zero denominator before dividing, so the
// report never carries NaN or infinity. Values are rounded to two decimal
// places and rendered as "x.yy" strings on the wire.

use serde::{Serialize, Serializer};

use super::error::StatsError;
use super::models::{CountrySummary, GlobalSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageReport {
    pub country: String,
    #[serde(serialize_with = "two_places")]
    pub deaths_pct_of_global: f64,
    #[serde(serialize_with = "two_places")]
    pub cases_pct_of_global: f64,
    #[serde(serialize_with = "two_places")]
    pub recovered_pct_of_global: f64,
    #[serde(serialize_with = "two_places")]
    pub death_rate_global: f64,
    #[serde(serialize_with = "two_places")]
    pub death_rate_country: f64,
}

impl PercentageReport {
    pub fn description(&self) -> String {
        format!(
            "{} statistics presented as a percentage % of global statistics",
            self.country
        )
    }
}

/// Compare `country` against `global`.
///
/// The caller must already have narrowed its query to a single country.
pub fn percentage_report(
    global: &GlobalSummary,
    country: &CountrySummary,
) -> Result<PercentageReport, StatsError> {
    Ok(PercentageReport {
        country: country.country.clone(),
        deaths_pct_of_global: percent(
            country.total_deaths,
            global.total_deaths,
            "global total deaths",
        )?,
        cases_pct_of_global: percent(
            country.total_confirmed,
            global.total_confirmed,
            "global total confirmed",
        )?,
        recovered_pct_of_global: percent(
            country.total_recovered,
            global.total_recovered,
            "global total recovered",
        )?,
        death_rate_global: percent(
            global.total_deaths,
            global.total_confirmed,
            "global total confirmed",
        )?,
        death_rate_country: percent(
            country.total_deaths,
            country.total_confirmed,
            "country total confirmed",
        )?,
    })
}

/// `numerator / denominator * 100`, rounded to two places.
fn percent(numerator: i64, denominator: i64, what: &'static str) -> Result<f64, StatsError> {
    if denominator == 0 {
        return Err(StatsError::DivisionByZero(what));
    }
    Ok(round2(numerator as f64 / denominator as f64 * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn two_places<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(
            percent(5, 0, "global total deaths"),
            Err(StatsError::DivisionByZero("global total deaths"))
        );
    }

    #[test]
    fn test_percent_zero_numerator_is_fine() {
        assert_eq!(percent(0, 10, "x"), Ok(0.0));
    }
}
