// Database trait — async interface over the user and favorites store.
//
// Implementor: SqliteDatabase (rusqlite behind a tokio Mutex). Handlers hold
// an `Arc<dyn Database>` so tests and future backends slot in unchanged.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Favorite, User};
use crate::stats::models::WatchLevel;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Users ---

    /// Create an account. Returns None if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    // --- Favorites ---

    /// All favorites for a user, oldest first.
    async fn list_favorites(&self, user_id: i64) -> Result<Vec<Favorite>>;

    async fn get_favorite(&self, user_id: i64, slug: &str) -> Result<Option<Favorite>>;

    /// Returns false if the slug is already a favorite.
    async fn insert_favorite(&self, user_id: i64, slug: &str, level: WatchLevel) -> Result<bool>;

    /// Returns false if the slug isn't a favorite.
    async fn update_watch_level(&self, user_id: i64, slug: &str, level: WatchLevel)
        -> Result<bool>;

    /// Returns false if the slug isn't a favorite.
    async fn delete_favorite(&self, user_id: i64, slug: &str) -> Result<bool>;
}
