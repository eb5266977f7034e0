//! User account storage
//!
//! Passwords are stored as hex SHA-256 of `salt || password` with a random
//! 16-byte salt per user. The admin login gate does not consult this table.

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::models::User;
use crate::{Error, Result};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        password_salt: row.try_get("password_salt")?,
        created_at: row.try_get("created_at")?,
    })
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn generate_salt() -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    to_hex(&salt)
}

/// Hex SHA-256 of salt followed by password
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    if username.trim().is_empty() {
        return Err(Error::InvalidInput("Username must not be empty".to_string()));
    }

    let salt = generate_salt();
    let id = sqlx::query(
        "INSERT INTO users (username, password_hash, password_salt, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username.trim())
    .bind(hash_password(password, &salt))
    .bind(&salt)
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_user(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("User {} vanished after insert", id)))
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, password_salt, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(user_from_row).transpose()
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, password_salt, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(user_from_row).transpose()
}

/// `Ok(Some(user))` when the username exists and the password matches
pub async fn verify_user_password(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let user = get_user_by_username(pool, username).await?;
    Ok(user.filter(|u| hash_password(password, &u.password_salt) == u.password_hash))
}
