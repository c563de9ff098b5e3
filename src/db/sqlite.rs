// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// Connection is !Sync, so it sits behind a tokio Mutex. Each method locks,
// runs the synchronous query from queries.rs, and returns; the guard is
// never held across an await.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Favorite, User};
use super::traits::Database;
use crate::stats::models::WatchLevel;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, username, password_hash)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_username(&conn, username)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_id(&conn, id)
    }

    async fn list_favorites(&self, user_id: i64) -> Result<Vec<Favorite>> {
        let conn = self.conn.lock().await;
        super::queries::list_favorites(&conn, user_id)
    }

    async fn get_favorite(&self, user_id: i64, slug: &str) -> Result<Option<Favorite>> {
        let conn = self.conn.lock().await;
        super::queries::get_favorite(&conn, user_id, slug)
    }

    async fn insert_favorite(&self, user_id: i64, slug: &str, level: WatchLevel) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::insert_favorite(&conn, user_id, slug, level)
    }

    async fn update_watch_level(
        &self,
        user_id: i64,
        slug: &str,
        level: WatchLevel,
    ) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::update_watch_level(&conn, user_id, slug, level)
    }

    async fn delete_favorite(&self, user_id: i64, slug: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_favorite(&conn, user_id, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = test_db().await;
        let user = db.create_user("alice", "$argon2id$fake").await.unwrap().unwrap();
        assert!(user.id > 0);
        assert_eq!(user.username, "alice");

        let by_name = db.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        let by_id = db.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.password_hash, "$argon2id$fake");

        assert!(db.get_user_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        assert!(db.create_user("alice", "h1").await.unwrap().is_some());
        assert!(db.create_user("alice", "h2").await.unwrap().is_none());
        // Original hash untouched
        let user = db.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "h1");
    }

    #[tokio::test]
    async fn test_overlong_username_fails() {
        let db = test_db().await;
        let name = "x".repeat(31);
        assert!(db.create_user(&name, "h").await.is_err());
    }

    #[tokio::test]
    async fn test_favorites_crud() {
        let db = test_db().await;
        let user = db.create_user("alice", "h").await.unwrap().unwrap();

        assert!(db
            .insert_favorite(user.id, "japan", WatchLevel::High)
            .await
            .unwrap());
        assert!(db
            .insert_favorite(user.id, "peru", WatchLevel::Low)
            .await
            .unwrap());
        // Duplicate slug
        assert!(!db
            .insert_favorite(user.id, "japan", WatchLevel::Low)
            .await
            .unwrap());

        let list = db.list_favorites(user.id).await.unwrap();
        let slugs: Vec<&str> = list.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, vec!["japan", "peru"]);
        assert_eq!(list[0].watch_level, WatchLevel::High);

        assert!(db
            .update_watch_level(user.id, "peru", WatchLevel::Middle)
            .await
            .unwrap());
        let peru = db.get_favorite(user.id, "peru").await.unwrap().unwrap();
        assert_eq!(peru.watch_level, WatchLevel::Middle);

        assert!(db.delete_favorite(user.id, "japan").await.unwrap());
        assert!(!db.delete_favorite(user.id, "japan").await.unwrap());
        assert!(db.get_favorite(user.id, "japan").await.unwrap().is_none());
        assert_eq!(db.list_favorites(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_favorite() {
        let db = test_db().await;
        let user = db.create_user("alice", "h").await.unwrap().unwrap();
        assert!(!db
            .update_watch_level(user.id, "atlantis", WatchLevel::Low)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let db = test_db().await;
        let alice = db.create_user("alice", "h").await.unwrap().unwrap();
        let bob = db.create_user("bob", "h").await.unwrap().unwrap();

        db.insert_favorite(alice.id, "japan", WatchLevel::High)
            .await
            .unwrap();
        assert!(db
            .insert_favorite(bob.id, "japan", WatchLevel::Low)
            .await
            .unwrap());

        assert_eq!(db.list_favorites(alice.id).await.unwrap().len(), 1);
        let bobs = db.get_favorite(bob.id, "japan").await.unwrap().unwrap();
        assert_eq!(bobs.watch_level, WatchLevel::Low);
        assert!(!db.delete_favorite(bob.id, "peru").await.unwrap());
    }
}
