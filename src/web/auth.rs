// Auth — argon2 password hashing and stateless HMAC-SHA256 session cookies.
//
// Session token format: {user_id}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{user_id}.{timestamp_secs}.{nonce_hex}" signed with
// COVID_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// Login flow:
//   POST /api/login { username, password } → verify argon2 hash
//     success: set covid_session cookie with a token for that user id
//     failure: 401
//
// Auth check (require_auth):
//   extract covid_session cookie → parse → verify HMAC → verify age
//   → insert AuthUser { user_id } → continue

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{api_error, AppState, AuthUser};

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "covid_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

// --- Passwords ---

/// Hash a password into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC string.
///
/// A stored hash that doesn't parse counts as a mismatch.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash checked when the username doesn't exist, so an unknown account
/// costs the same argon2 work as a wrong password.
static DUMMY_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("covid-watch-no-such-user").unwrap_or_default());

/// Check a login attempt against a user's stored hash, or against a dummy
/// hash when there is no such user. Unknown users never verify.
pub fn verify_login(candidate: &str, stored_hash: Option<&str>) -> bool {
    match stored_hash {
        Some(hash) => verify_password(candidate, hash),
        None => {
            let _ = verify_password(candidate, &DUMMY_PASSWORD_HASH);
            false
        }
    }
}

// --- Session tokens ---

/// Build a new session token for `user_id`, signed with `secret`.
///
/// Returns the raw cookie value (the token string, not the full Set-Cookie header).
pub fn create_token(secret: &str, user_id: i64) -> String {
    let timestamp = now_secs();

    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{user_id}.{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the user id if the HMAC is valid and the
/// token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<i64> {
    let parts: Vec<&str> = token.splitn(4, '.').collect();
    if parts.len() != 4 {
        return None;
    }
    let (user_id_str, timestamp_str, nonce, provided_sig) = (parts[0], parts[1], parts[2], parts[3]);

    let payload = format!("{user_id_str}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let timestamp = timestamp_str.parse::<u64>().ok()?;
    if now_secs().saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }

    user_id_str.parse::<i64>().ok()
}

/// Axum middleware: reject requests without a valid session cookie with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = session_cookie(&request)
        .and_then(|token| verify_token(&state.config.session_secret, token));

    let Some(user_id) = user_id else {
        return api_error(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{COOKIE_NAME}={token}; HttpOnly{secure_flag}; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

// --- Private helpers ---

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn hmac_sign(secret: &str, payload: &str) -> String {
    // HMAC accepts keys of any length, including empty
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// The session cookie's value, if the request carries one.
fn session_cookie(request: &Request) -> Option<&str> {
    let cookie_header = request.headers().get(header::COOKIE)?.to_str().ok()?;

    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == COOKIE_NAME).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
    }

    #[test]
    fn test_unknown_user_runs_argon2_and_fails() {
        // The dummy must be a real PHC string or the unknown-user path
        // would skip the argon2 work
        assert!(PasswordHash::new(&DUMMY_PASSWORD_HASH).is_ok());
        assert!(!verify_login("covid-watch-no-such-user", None));
        assert!(!verify_login("anything", None));

        let hash = hash_password("pw").unwrap();
        assert!(verify_login("pw", Some(&hash)));
        assert!(!verify_login("nope", Some(&hash)));
    }

    #[test]
    fn test_token_roundtrip() {
        let secret = "test_secret_32_bytes_long_enough!";
        let token = create_token(secret, 42);
        assert_eq!(verify_token(secret, &token), Some(42));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret", 1);
        assert_eq!(verify_token("wrong_secret", &token), None);
    }

    #[test]
    fn test_user_id_cannot_be_swapped() {
        let secret = "my_secret";
        let token = create_token(secret, 7);
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("8.{rest}");
        assert_eq!(verify_token(secret, &forged), None);
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "my_secret";
        let stale = now_secs() - SESSION_TTL_SECS - 1;
        let payload = format!("3.{stale}.00ff");
        let token = format!("{payload}.{}", hmac_sign(secret, &payload));
        assert_eq!(verify_token(secret, &token), None);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(verify_token("secret", ""), None);
        assert_eq!(verify_token("secret", "onlytwo.parts"), None);
        assert_eq!(verify_token("secret", "1.2.3"), None);
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_cookie_headers() {
        let set = set_cookie_header("tok", false);
        assert!(set.starts_with("covid_session=tok; HttpOnly; SameSite=Strict"));
        assert!(set_cookie_header("tok", true).contains("; Secure"));
        assert!(clear_cookie_header().contains("Max-Age=0"));
    }
}
