// Favorites handlers — a logged-in user's list of tracked countries.
//
// GET    /api/favorites                  — hydrated summaries, oldest first
// POST   /api/favorites                  — { Slug, WatchLevel }
// GET    /api/favorites/{slug}           — one hydrated summary
// PUT    /api/favorites/{slug}           — { WatchLevel }
// DELETE /api/favorites/{slug}
// GET    /api/favorites/ranking/{stat}   — favorites ranked by one statistic
//
// A new favorite is checked in order: slug given, slug known to the
// provider, not already saved, then a valid watch level.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use super::stats::ranking_response;
use crate::db::models::Favorite;
use crate::stats::favorites::hydrate_favorites;
use crate::stats::ranking::{rank_by, Statistic};
use crate::stats::{StatsError, WatchLevel};
use crate::web::{api_error, db_error, stats_error, upstream_error, AppState, AuthUser};

const NOT_A_FAVORITE: &str = "no such country in your favorite countries";

#[derive(Deserialize)]
pub struct CreateFavoriteRequest {
    #[serde(rename = "Slug")]
    slug: Option<String>,
    #[serde(rename = "WatchLevel")]
    watch_level: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateWatchLevelRequest {
    #[serde(rename = "WatchLevel")]
    watch_level: Option<String>,
}

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Response {
    let favorites = match state.db.list_favorites(auth.user_id).await {
        Ok(favorites) => favorites,
        Err(e) => return db_error(e),
    };
    if favorites.is_empty() {
        return no_favorites();
    }

    match state.provider.summary().await {
        Ok(summary) => {
            let keys: Vec<_> = favorites.iter().map(Favorite::key).collect();
            Json(hydrate_favorites(&keys, &summary)).into_response()
        }
        Err(e) => upstream_error(e),
    }
}

/// POST /api/favorites
pub async fn create_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateFavoriteRequest>,
) -> Response {
    let Some(slug) = body.slug.filter(|s| !s.is_empty()) else {
        return api_error(StatusCode::BAD_REQUEST, "the slug of the country is needed");
    };

    match state.provider.summary().await {
        Ok(summary) if !summary.has_slug(&slug) => {
            return api_error(StatusCode::BAD_REQUEST, "invalid slug");
        }
        Ok(_) => {}
        Err(e) => return upstream_error(e),
    }

    match state.db.get_favorite(auth.user_id, &slug).await {
        Ok(Some(_)) => return already_registered(),
        Ok(None) => {}
        Err(e) => return db_error(e),
    }

    let level = match parse_watch_level(body.watch_level.as_deref()) {
        Ok(level) => level,
        Err(response) => return response,
    };

    match state.db.insert_favorite(auth.user_id, &slug, level).await {
        Ok(true) => {
            info!(user_id = auth.user_id, slug = %slug, level = %level, "Favorite added");
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": format!("{slug} is added to your favorite countries"),
                })),
            )
                .into_response()
        }
        // Lost a race with a concurrent insert of the same slug
        Ok(false) => already_registered(),
        Err(e) => db_error(e),
    }
}

/// GET /api/favorites/{slug}
pub async fn get_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Response {
    let favorite = match state.db.get_favorite(auth.user_id, &slug).await {
        Ok(Some(favorite)) => favorite,
        Ok(None) => return api_error(StatusCode::NOT_FOUND, NOT_A_FAVORITE),
        Err(e) => return db_error(e),
    };

    let summary = match state.provider.summary().await {
        Ok(summary) => summary,
        Err(e) => return upstream_error(e),
    };

    match hydrate_favorites(&[favorite.key()], &summary).pop() {
        Some(country) => Json(country).into_response(),
        None => stats_error(&StatsError::UpstreamDataUnavailable(format!(
            "provider has no summary for {slug}"
        ))),
    }
}

/// PUT /api/favorites/{slug}
pub async fn update_watch_level(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
    Json(body): Json<UpdateWatchLevelRequest>,
) -> Response {
    let level = match parse_watch_level(body.watch_level.as_deref()) {
        Ok(level) => level,
        Err(response) => return response,
    };

    match state.db.update_watch_level(auth.user_id, &slug, level).await {
        Ok(true) => Json(serde_json::json!({
            "message": format!("the WatchLevel of {slug} is updated to {level}"),
        }))
        .into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, NOT_A_FAVORITE),
        Err(e) => db_error(e),
    }
}

/// DELETE /api/favorites/{slug}
pub async fn delete_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Response {
    match state.db.delete_favorite(auth.user_id, &slug).await {
        Ok(true) => {
            info!(user_id = auth.user_id, slug = %slug, "Favorite removed");
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Ok(false) => api_error(StatusCode::NOT_FOUND, NOT_A_FAVORITE),
        Err(e) => db_error(e),
    }
}

/// GET /api/favorites/ranking/{stat}
pub async fn rank_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(stat): Path<String>,
) -> Response {
    let stat: Statistic = match stat.parse() {
        Ok(stat) => stat,
        Err(e) => return stats_error(&e),
    };

    let favorites = match state.db.list_favorites(auth.user_id).await {
        Ok(favorites) => favorites,
        Err(e) => return db_error(e),
    };
    if favorites.is_empty() {
        return no_favorites();
    }

    match state.provider.summary().await {
        Ok(summary) => {
            let keys: Vec<_> = favorites.iter().map(Favorite::key).collect();
            let hydrated = hydrate_favorites(&keys, &summary);
            ranking_response(stat, &rank_by(&hydrated, stat))
        }
        Err(e) => upstream_error(e),
    }
}

// --- Helpers ---

fn no_favorites() -> Response {
    Json(serde_json::json!({ "message": "no favorite country registered" })).into_response()
}

fn already_registered() -> Response {
    api_error(StatusCode::CONFLICT, "this country is already registered")
}

fn parse_watch_level(raw: Option<&str>) -> Result<WatchLevel, Response> {
    let Some(raw) = raw else {
        return Err(api_error(StatusCode::BAD_REQUEST, "WatchLevel is needed"));
    };
    raw.parse::<WatchLevel>()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))
}
