//! Brand database operations
//!
//! `phone_count` is a stored column kept in step with `mobiles`: every brand
//! and mobile write in this crate ends with [`refresh_phone_count`].

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::models::{Brand, BrandPatch, NewBrand};
use crate::{Error, Result};

const BRAND_SELECT: &str = r#"
    SELECT id, name, slug, logo, phone_count, description, is_visible, created_at
    FROM brands
"#;

fn brand_from_row(row: &SqliteRow) -> Result<Brand> {
    Ok(Brand {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        logo: row.try_get("logo")?,
        phone_count: row.try_get("phone_count")?,
        description: row.try_get("description")?,
        is_visible: row.try_get("is_visible")?,
        created_at: row.try_get("created_at")?,
    })
}

/// All brands (admin view)
pub async fn list_brands(pool: &SqlitePool) -> Result<Vec<Brand>> {
    let sql = format!("{} ORDER BY name COLLATE NOCASE ASC", BRAND_SELECT);
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(brand_from_row).collect()
}

/// Brands shown on the public site
pub async fn list_visible_brands(pool: &SqlitePool) -> Result<Vec<Brand>> {
    let sql = format!(
        "{} WHERE is_visible = 1 ORDER BY name COLLATE NOCASE ASC",
        BRAND_SELECT
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(brand_from_row).collect()
}

pub async fn get_brand(pool: &SqlitePool, id: i64) -> Result<Option<Brand>> {
    let sql = format!("{} WHERE id = ?", BRAND_SELECT);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    row.as_ref().map(brand_from_row).transpose()
}

pub async fn get_brand_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Brand>> {
    let sql = format!("{} WHERE slug = ?", BRAND_SELECT);
    let row = sqlx::query(&sql).bind(slug).fetch_optional(pool).await?;
    row.as_ref().map(brand_from_row).transpose()
}

/// Insert a brand; a duplicate slug yields [`Error::Conflict`]
pub async fn create_brand(pool: &SqlitePool, brand: &NewBrand) -> Result<Brand> {
    let id = sqlx::query(
        r#"
        INSERT INTO brands (name, slug, logo, description, is_visible, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&brand.name)
    .bind(&brand.slug)
    .bind(&brand.logo)
    .bind(&brand.description)
    .bind(brand.is_visible)
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    // Mobiles may already reference this slug
    refresh_phone_count(pool, &brand.slug).await?;

    get_brand(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Brand {} vanished after insert", id)))
}

/// Apply a partial update; `Ok(None)` when the id does not exist
pub async fn update_brand(pool: &SqlitePool, id: i64, patch: BrandPatch) -> Result<Option<Brand>> {
    let Some(mut brand) = get_brand(pool, id).await? else {
        return Ok(None);
    };
    patch.apply(&mut brand);

    sqlx::query(
        r#"
        UPDATE brands
        SET name = ?, slug = ?, logo = ?, description = ?, is_visible = ?
        WHERE id = ?
        "#,
    )
    .bind(&brand.name)
    .bind(&brand.slug)
    .bind(&brand.logo)
    .bind(&brand.description)
    .bind(brand.is_visible)
    .bind(id)
    .execute(pool)
    .await?;

    refresh_phone_count(pool, &brand.slug).await?;

    get_brand(pool, id).await
}

/// Delete a brand row; mobiles referencing its slug are left untouched
pub async fn delete_brand(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM brands WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Recount mobiles for `slug` into the stored column; no-op for an unknown slug
pub async fn refresh_phone_count(pool: &SqlitePool, slug: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE brands
        SET phone_count = CAST((SELECT COUNT(*) FROM mobiles WHERE brand = ?1) AS TEXT)
        WHERE slug = ?1
        "#,
    )
    .bind(slug)
    .execute(pool)
    .await?;
    Ok(())
}
