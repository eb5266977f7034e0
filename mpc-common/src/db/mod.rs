//! Database models and queries
//!
//! Repository functions take `&SqlitePool` directly; there is no caching layer
//! and no transaction spans more than one statement.

pub mod brands;
pub mod init;
pub mod mobiles;
pub mod models;
pub mod seed;
pub mod settings;
pub mod users;

pub use init::*;
pub use models::*;

use sqlx::SqlitePool;

use crate::Result;

/// Row counts for the admin dashboard
pub async fn catalog_stats(pool: &SqlitePool) -> Result<CatalogStats> {
    let (brands, visible_brands, mobiles): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM brands),
            (SELECT COUNT(*) FROM brands WHERE is_visible = 1),
            (SELECT COUNT(*) FROM mobiles)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(CatalogStats {
        brands,
        visible_brands,
        mobiles,
    })
}
