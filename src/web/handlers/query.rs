// Country query handlers — free-text / ISO2 lookup against the directory.
//
// GET /api/query/{name}
//   NoMatch         → 404
//   MultipleMatches → 300 with the ordered {name, slug, code} candidates
//   SingleMatch     → 200 with the country's most recent daily totals
//
// GET /api/query/percentage/{name}
//   Same resolution, then the country's totals as a percentage of the
//   world's. A zero denominator → 422.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::stats::{percentage_report, resolve, PercentageReport, ResolutionResult, StatsError};
use crate::web::{stats_error, upstream_error, AppState};

#[derive(Serialize)]
struct PercentageResponse<'a> {
    description: String,
    #[serde(flatten)]
    report: &'a PercentageReport,
}

pub async fn query_country(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let directory = match state.provider.countries().await {
        Ok(directory) => directory,
        Err(e) => return upstream_error(e),
    };

    let resolution = resolve(&name, &directory);
    debug!(query = %name, matches = resolution.candidates().len(), "Resolved country query");

    match resolution {
        ResolutionResult::NoMatch => stats_error(&StatsError::NoMatch),
        ResolutionResult::MultipleMatches(candidates) => (
            StatusCode::MULTIPLE_CHOICES,
            Json(serde_json::json!({ "matches": candidates })),
        )
            .into_response(),
        ResolutionResult::SingleMatch(country) => {
            match state.provider.latest_totals(&country.slug).await {
                Ok(totals) => Json(totals).into_response(),
                Err(e) => upstream_error(e),
            }
        }
    }
}

pub async fn percentage_of_global(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let directory = match state.provider.countries().await {
        Ok(directory) => directory,
        Err(e) => return upstream_error(e),
    };

    let country = match resolve(&name, &directory).into_single() {
        Ok(country) => country,
        Err(e) => return stats_error(&e),
    };

    let summary = match state.provider.summary().await {
        Ok(summary) => summary,
        Err(e) => return upstream_error(e),
    };
    let Some(country_summary) = summary.country_by_slug(&country.slug) else {
        return stats_error(&StatsError::UpstreamDataUnavailable(format!(
            "provider has no summary for {}",
            country.slug
        )));
    };

    match percentage_report(&summary.global.totals(), country_summary) {
        Ok(report) => Json(PercentageResponse {
            description: report.description(),
            report: &report,
        })
        .into_response(),
        Err(e) => stats_error(&e),
    }
}
