// Web server — Axum JSON API over the statistics core and the favorites store.
//
// Auth: stateless HMAC-SHA256 session cookies carrying the user id. No
// session table in the DB.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::provider::StatsProvider;
use crate::stats::StatsError;

pub mod auth;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub provider: Arc<dyn StatsProvider>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    provider: Arc<dyn StatsProvider>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        db,
        provider,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("covid-watch listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{account, favorites, query, stats};

    // Routes that need a logged-in user
    let protected_api = Router::new()
        .route("/api/account", get(account::get_account))
        .route("/api/logout", post(account::logout))
        .route(
            "/api/favorites",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route(
            "/api/favorites/ranking/{stat}",
            get(favorites::rank_favorites),
        )
        .route(
            "/api/favorites/{slug}",
            get(favorites::get_favorite)
                .put(favorites::update_watch_level)
                .delete(favorites::delete_favorite),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let public_api = Router::new()
        .route("/health", get(health))
        .route("/api/register", post(account::register))
        .route("/api/login", post(account::login))
        .route("/api/global", get(stats::get_global))
        .route("/api/all", get(stats::get_all))
        .route("/api/all/ranking/{stat}", get(stats::rank_all))
        .route("/api/query/{name}", get(query::query_country))
        .route(
            "/api/query/percentage/{name}",
            get(query::percentage_of_global),
        );

    Router::new()
        .merge(protected_api)
        .merge(public_api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check. Always returns 200 OK.
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Map a domain error kind onto its HTTP response.
pub fn stats_error(err: &StatsError) -> Response {
    if err.is_data_unavailable() {
        warn!(error = %err, "Statistics data unavailable");
    }
    match err {
        StatsError::NoMatch => api_error(StatusCode::NOT_FOUND, "No result found"),
        StatsError::AmbiguousMatch(candidates) => (
            StatusCode::MULTIPLE_CHOICES,
            Json(serde_json::json!({
                "error": "too many matches. this function only works with one target country, please narrow your search",
                "matches": candidates,
            })),
        )
            .into_response(),
        StatsError::UnknownStatistic(_) => api_error(StatusCode::BAD_REQUEST, &err.to_string()),
        StatsError::DivisionByZero(_) => api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("computation unavailable: {err}"),
        ),
        StatsError::UpstreamDataUnavailable(_) => {
            api_error(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

/// Response for a failed provider call.
pub fn upstream_error(err: anyhow::Error) -> Response {
    if let Some(stats_err) = err.downcast_ref::<StatsError>() {
        return stats_error(stats_err);
    }
    error!(error = %err, "Statistics provider request failed");
    api_error(
        StatusCode::BAD_GATEWAY,
        "Statistics provider unavailable",
    )
}

/// Response for a failed database call.
pub fn db_error(err: anyhow::Error) -> Response {
    error!(error = %err, "Database error");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
}

/// The authenticated caller, inserted into request extensions by
/// `require_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}
