//! SQLite profile repository.
//!
//! One row per user id; `save` is a full-row upsert because the store
//! always writes a complete, already-patched profile.

use ada_core::profile::ProfileRepository;
use ada_types::error::RepositoryError;
use ada_types::profile::UserProfile;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileRepository`.
pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserProfile, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let font_size: i64 = row
        .try_get("font_size")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    let text = |column: &str| -> Result<String, RepositoryError> {
        row.try_get(column)
            .map_err(|e| RepositoryError::Query(e.to_string()))
    };

    Ok(UserProfile {
        user_id: text("user_id")?,
        display_name: text("display_name")?,
        email: text("email")?,
        photo_url: text("photo_url")?,
        age: text("age")?,
        location: text("location")?,
        bio: text("bio")?,
        theme: text("theme")?,
        code_theme: text("code_theme")?,
        font_size: font_size as u16,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ProfileRepository for SqliteProfileRepository {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM user_profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(profile_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO user_profiles
                   (user_id, display_name, email, photo_url, age, location, bio,
                    theme, code_theme, font_size, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(user_id) DO UPDATE SET
                   display_name = excluded.display_name,
                   email = excluded.email,
                   photo_url = excluded.photo_url,
                   age = excluded.age,
                   location = excluded.location,
                   bio = excluded.bio,
                   theme = excluded.theme,
                   code_theme = excluded.code_theme,
                   font_size = excluded.font_size,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&profile.user_id)
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.photo_url)
        .bind(&profile.age)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.theme)
        .bind(&profile.code_theme)
        .bind(profile.font_size as i64)
        .bind(profile.created_at.to_rfc3339())
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
