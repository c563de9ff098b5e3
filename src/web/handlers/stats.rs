// Provider-wide statistics.
//
// GET /api/global               — world totals, daily-new counts and date
// GET /api/all                  — every country's summary
// GET /api/all/ranking/{stat}   — every country ranked by one statistic

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::stats::ranking::{rank_by, RankedCountry, Statistic};
use crate::web::{stats_error, upstream_error, AppState};

pub async fn get_global(State(state): State<AppState>) -> Response {
    match state.provider.summary().await {
        Ok(summary) => Json(summary.global).into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Response {
    match state.provider.summary().await {
        Ok(summary) => Json(&summary.countries).into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn rank_all(State(state): State<AppState>, Path(stat): Path<String>) -> Response {
    let stat: Statistic = match stat.parse() {
        Ok(stat) => stat,
        Err(e) => return stats_error(&e),
    };
    match state.provider.summary().await {
        Ok(summary) => ranking_response(stat, &rank_by(&summary.countries, stat)),
        Err(e) => upstream_error(e),
    }
}

/// `{"statistic": "...", "ranking": [{"rank": 1, "Country": "...", "<stat>": n}, ...]}`
pub fn ranking_response(stat: Statistic, ranked: &[RankedCountry]) -> Response {
    let ranking: Vec<serde_json::Value> = ranked
        .iter()
        .map(|place| {
            let mut row = serde_json::Map::new();
            row.insert("rank".to_string(), place.rank.into());
            row.insert("Country".to_string(), place.country.clone().into());
            row.insert(stat.as_str().to_string(), place.value.into());
            serde_json::Value::Object(row)
        })
        .collect();

    Json(serde_json::json!({
        "statistic": stat.as_str(),
        "ranking": ranking,
    }))
    .into_response()
}
