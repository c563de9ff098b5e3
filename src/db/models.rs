// Data models — Rust structs that map to database rows.

use serde::{Deserialize, Serialize};

use crate::stats::models::WatchLevel;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// argon2 PHC string; never serialized to API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// A country on a user's favorites list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub slug: String,
    pub watch_level: WatchLevel,
    pub created_at: String,
}

impl Favorite {
    /// The `(slug, level)` pair used to hydrate provider summaries.
    pub fn key(&self) -> (String, WatchLevel) {
        (self.slug.clone(), self.watch_level)
    }
}
