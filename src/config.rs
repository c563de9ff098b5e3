use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::provider::cache::DEFAULT_TTL_SECS;
use crate::provider::client::DEFAULT_API_URL;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded automatically
/// at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the statistics provider (COVID_API_URL).
    pub api_url: String,
    /// SQLite database file (COVID_DB_PATH, defaults to ./covid-watch.db).
    pub db_path: String,
    /// Secret for HMAC session token signing (COVID_SESSION_SECRET).
    pub session_secret: String,
    /// How long provider responses are cached (COVID_CACHE_TTL_SECS).
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let cache_ttl_secs = match env::var("COVID_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("COVID_CACHE_TTL_SECS is not a number: {raw:?}"))?,
            Err(_) => DEFAULT_TTL_SECS,
        };

        Ok(Self {
            api_url: env::var("COVID_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            db_path: env::var("COVID_DB_PATH").unwrap_or_else(|_| "./covid-watch.db".to_string()),
            session_secret: env::var("COVID_SESSION_SECRET").unwrap_or_default(),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    /// Check that a session secret is configured.
    /// Call this before starting the web server.
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "COVID_SESSION_SECRET not set. Add it to your .env file.\n\
                 Any long random string works, e.g. the output of `openssl rand -hex 32`."
            );
        }
        Ok(())
    }
}
