// Account handlers — registration, login, logout, and the current user.
//
// POST /api/register — { username, password, confirm_password }
// POST /api/login    — { username, password } → session cookie
// POST /api/logout   — clears the session cookie
// GET  /api/account  — the logged-in user

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use crate::web::auth::{
    clear_cookie_header, create_token, hash_password, set_cookie_header, verify_login,
};
use crate::web::{api_error, db_error, AppState, AuthUser};

/// Longest username the users table accepts.
pub const MAX_USERNAME_LEN: usize = 30;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// POST /api/register: create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() || body.confirm_password.is_empty() {
        return api_error(
            StatusCode::BAD_REQUEST,
            "username, password and confirm_password are required",
        );
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return api_error(
            StatusCode::BAD_REQUEST,
            &format!("username must be at most {MAX_USERNAME_LEN} characters"),
        );
    }
    if body.password != body.confirm_password {
        return api_error(StatusCode::BAD_REQUEST, "passwords do not match");
    }

    let password_hash = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => return db_error(e),
    };

    match state.db.create_user(username, &password_hash).await {
        Ok(Some(user)) => {
            info!(user_id = user.id, "Registered new user");
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "id": user.id, "username": user.username })),
            )
                .into_response()
        }
        Ok(None) => api_error(StatusCode::CONFLICT, "username already taken"),
        Err(e) => db_error(e),
    }
}

/// POST /api/login: check credentials and start a session.
///
/// Unknown username and wrong password get the same 401, after the same
/// argon2 work.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let user = match state.db.get_user_by_username(body.username.trim()).await {
        Ok(user) => user,
        Err(e) => return db_error(e),
    };

    let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
    let verified = verify_login(&body.password, stored_hash);
    let Some(user) = user.filter(|_| verified) else {
        return api_error(StatusCode::UNAUTHORIZED, "Invalid username or password");
    };

    let token = create_token(&state.config.session_secret, user.id);
    // TLS terminates at the reverse proxy; the server can't tell if it's behind HTTPS
    let cookie = set_cookie_header(&token, false);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Authenticated", "username": user.username })),
    )
        .into_response()
}

/// POST /api/logout: clear the session cookie.
pub async fn logout() -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_cookie_header())],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
        .into_response()
}

/// GET /api/account: who am I, and how many favorites do I have.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Response {
    let user = match state.db.get_user_by_id(auth.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return api_error(StatusCode::UNAUTHORIZED, "Account no longer exists"),
        Err(e) => return db_error(e),
    };
    let favorites = match state.db.list_favorites(auth.user_id).await {
        Ok(favorites) => favorites,
        Err(e) => return db_error(e),
    };

    Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "created_at": user.created_at,
        "favorite_count": favorites.len(),
    }))
    .into_response()
}
