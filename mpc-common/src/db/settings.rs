//! Settings database operations
//!
//! Key-value accessors over the `settings` table.

use sqlx::SqlitePool;

use crate::{Error, Result};

/// Settings key for the OpenAI API key
pub const OPENAI_API_KEY: &str = "openai_api_key";
/// Settings key for the RapidAPI phone-spec key
pub const RAPIDAPI_KEY: &str = "rapidapi_key";
/// Settings key for the MobileAPI.dev key
pub const MOBILEAPI_KEY: &str = "mobileapi_key";

/// Keys the admin panel may write
pub const ADMIN_WRITABLE_KEYS: &[&str] = &[OPENAI_API_KEY, RAPIDAPI_KEY, MOBILEAPI_KEY];

/// Generic setting getter; NULL and missing both read as `None`
pub async fn get_setting<T>(db: &SqlitePool, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(Option<String>,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match row.and_then(|(value,)| value) {
        Some(value) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting '{}' failed: {}", key, e)))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Generic setting setter (upsert)
pub async fn set_setting<T>(db: &SqlitePool, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await?;

    Ok(())
}

/// Remove a setting (falls back to env/TOML on next resolution)
pub async fn clear_setting(db: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(db)
        .await?;
    Ok(())
}
