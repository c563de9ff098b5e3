// Database queries — CRUD for users and favorites.
//
// All SQL lives here; the rest of the app goes through the Database trait.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Favorite, User};
use crate::stats::models::WatchLevel;

// --- Users ---

/// Insert a user. Returns None when the username is already taken.
pub fn create_user(conn: &Connection, username: &str, password_hash: &str) -> Result<Option<User>> {
    let inserted = conn.execute(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)
         ON CONFLICT(username) DO NOTHING",
        params![username, password_hash],
    )?;
    if inserted == 0 {
        return Ok(None);
    }
    get_user_by_id(conn, conn.last_insert_rowid())
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
    )?;
    let user = stmt.query_row(params![username], user_from_row).optional()?;
    Ok(user)
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password_hash, created_at FROM users WHERE id = ?1")?;
    let user = stmt.query_row(params![id], user_from_row).optional()?;
    Ok(user)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

// --- Favorites ---

/// A user's favorites in the order they were added.
pub fn list_favorites(conn: &Connection, user_id: i64) -> Result<Vec<Favorite>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, slug, watch_level, created_at
         FROM favorites WHERE user_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt
        .query_map(params![user_id], raw_favorite_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(RawFavorite::into_favorite).collect()
}

pub fn get_favorite(conn: &Connection, user_id: i64, slug: &str) -> Result<Option<Favorite>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, slug, watch_level, created_at
         FROM favorites WHERE user_id = ?1 AND slug = ?2",
    )?;
    let raw = stmt
        .query_row(params![user_id, slug], raw_favorite_from_row)
        .optional()?;
    raw.map(RawFavorite::into_favorite).transpose()
}

/// Add a favorite. Returns false when the slug is already on the list.
pub fn insert_favorite(
    conn: &Connection,
    user_id: i64,
    slug: &str,
    level: WatchLevel,
) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT INTO favorites (user_id, slug, watch_level) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, slug) DO NOTHING",
        params![user_id, slug, level.as_str()],
    )?;
    Ok(inserted > 0)
}

/// Change a favorite's watch level. Returns false when it isn't saved.
pub fn update_watch_level(
    conn: &Connection,
    user_id: i64,
    slug: &str,
    level: WatchLevel,
) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE favorites SET watch_level = ?3 WHERE user_id = ?1 AND slug = ?2",
        params![user_id, slug, level.as_str()],
    )?;
    Ok(updated > 0)
}

/// Remove a favorite. Returns false when it wasn't saved.
pub fn delete_favorite(conn: &Connection, user_id: i64, slug: &str) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM favorites WHERE user_id = ?1 AND slug = ?2",
        params![user_id, slug],
    )?;
    Ok(deleted > 0)
}

/// Row as stored; watch_level is still text.
struct RawFavorite {
    id: i64,
    user_id: i64,
    slug: String,
    watch_level: String,
    created_at: String,
}

impl RawFavorite {
    fn into_favorite(self) -> Result<Favorite> {
        let watch_level = self
            .watch_level
            .parse::<WatchLevel>()
            .with_context(|| format!("Corrupt watch_level on favorite {}", self.id))?;
        Ok(Favorite {
            id: self.id,
            user_id: self.user_id,
            slug: self.slug,
            watch_level,
            created_at: self.created_at,
        })
    }
}

fn raw_favorite_from_row(row: &Row<'_>) -> rusqlite::Result<RawFavorite> {
    Ok(RawFavorite {
        id: row.get(0)?,
        user_id: row.get(1)?,
        slug: row.get(2)?,
        watch_level: row.get(3)?,
        created_at: row.get(4)?,
    })
}
