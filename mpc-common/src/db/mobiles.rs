//! Mobile database operations
//!
//! Structured fields (short specs, carousel, specification tree, dimensions,
//! build materials) are stored as JSON text columns. Writes refresh the
//! owning brand's stored `phone_count`.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, types::Json, Row, SqlitePool};

use super::brands::refresh_phone_count;
use super::models::{
    BuildMaterials, Dimensions, Mobile, MobilePatch, NewMobile, ShortSpecs, SpecCategory,
};
use crate::{Error, Result};

const MOBILE_COLUMNS: &str = "id, slug, name, brand, model, image_url, imagekit_path, \
     release_date, price, short_specs, carousel_images, specifications, dimensions, \
     build_materials, created_at";

fn mobile_from_row(row: &SqliteRow) -> Result<Mobile> {
    let short_specs: Json<ShortSpecs> = row.try_get("short_specs")?;
    let carousel_images: Json<Vec<String>> = row.try_get("carousel_images")?;
    let specifications: Json<Vec<SpecCategory>> = row.try_get("specifications")?;
    let dimensions: Option<Json<Dimensions>> = row.try_get("dimensions")?;
    let build_materials: Option<Json<BuildMaterials>> = row.try_get("build_materials")?;

    Ok(Mobile {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        brand: row.try_get("brand")?,
        model: row.try_get("model")?,
        image_url: row.try_get("image_url")?,
        imagekit_path: row.try_get("imagekit_path")?,
        release_date: row.try_get("release_date")?,
        price: row.try_get("price")?,
        short_specs: short_specs.0,
        carousel_images: carousel_images.0,
        specifications: specifications.0,
        dimensions: dimensions.map(|d| d.0),
        build_materials: build_materials.map(|b| b.0),
        created_at: row.try_get("created_at")?,
    })
}

async fn fetch_many(pool: &SqlitePool, sql: &str, bind: Option<&str>) -> Result<Vec<Mobile>> {
    let mut query = sqlx::query(sql);
    if let Some(value) = bind {
        query = query.bind(value);
    }
    let rows = query.fetch_all(pool).await?;
    rows.iter().map(mobile_from_row).collect()
}

/// Every mobile, newest first (no pagination)
pub async fn list_mobiles(pool: &SqlitePool) -> Result<Vec<Mobile>> {
    let sql = format!(
        "SELECT {} FROM mobiles ORDER BY created_at DESC, id DESC",
        MOBILE_COLUMNS
    );
    fetch_many(pool, &sql, None).await
}

/// Mobiles whose `brand` equals the given brand slug exactly
pub async fn list_mobiles_by_brand(pool: &SqlitePool, brand: &str) -> Result<Vec<Mobile>> {
    let sql = format!(
        "SELECT {} FROM mobiles WHERE brand = ? ORDER BY created_at DESC, id DESC",
        MOBILE_COLUMNS
    );
    fetch_many(pool, &sql, Some(brand)).await
}

pub async fn get_mobile(pool: &SqlitePool, id: i64) -> Result<Option<Mobile>> {
    let sql = format!("SELECT {} FROM mobiles WHERE id = ?", MOBILE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    row.as_ref().map(mobile_from_row).transpose()
}

pub async fn get_mobile_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Mobile>> {
    let sql = format!("SELECT {} FROM mobiles WHERE slug = ?", MOBILE_COLUMNS);
    let row = sqlx::query(&sql).bind(slug).fetch_optional(pool).await?;
    row.as_ref().map(mobile_from_row).transpose()
}

/// Lookup by URL path `/mobile/{brand}/{slug}`; both must match
pub async fn get_mobile_by_brand_and_slug(
    pool: &SqlitePool,
    brand: &str,
    slug: &str,
) -> Result<Option<Mobile>> {
    let sql = format!(
        "SELECT {} FROM mobiles WHERE brand = ? AND slug = ?",
        MOBILE_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(brand)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(mobile_from_row).transpose()
}

/// Escape LIKE wildcards so user input matches literally
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring search over name, brand and model
pub async fn search_mobiles(pool: &SqlitePool, query: &str) -> Result<Vec<Mobile>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = like_pattern(query);
    let sql = format!(
        "SELECT {} FROM mobiles
         WHERE name LIKE ?1 ESCAPE '\\' OR brand LIKE ?1 ESCAPE '\\' OR model LIKE ?1 ESCAPE '\\'
         ORDER BY name COLLATE NOCASE ASC",
        MOBILE_COLUMNS
    );
    fetch_many(pool, &sql, Some(&pattern)).await
}

/// Newest mobiles for the home page
pub async fn featured_mobiles(pool: &SqlitePool, limit: i64) -> Result<Vec<Mobile>> {
    let sql = format!(
        "SELECT {} FROM mobiles ORDER BY created_at DESC, id DESC LIMIT ?",
        MOBILE_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(limit.max(0)).fetch_all(pool).await?;
    rows.iter().map(mobile_from_row).collect()
}

/// Insert a mobile; a duplicate slug (any brand) yields [`Error::Conflict`]
pub async fn create_mobile(pool: &SqlitePool, mobile: &NewMobile) -> Result<Mobile> {
    let id = sqlx::query(
        r#"
        INSERT INTO mobiles (
            slug, name, brand, model, image_url, imagekit_path, release_date, price,
            short_specs, carousel_images, specifications, dimensions, build_materials,
            created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&mobile.slug)
    .bind(&mobile.name)
    .bind(&mobile.brand)
    .bind(&mobile.model)
    .bind(&mobile.image_url)
    .bind(&mobile.imagekit_path)
    .bind(&mobile.release_date)
    .bind(&mobile.price)
    .bind(Json(&mobile.short_specs))
    .bind(Json(&mobile.carousel_images))
    .bind(Json(&mobile.specifications))
    .bind(mobile.dimensions.as_ref().map(Json))
    .bind(mobile.build_materials.as_ref().map(Json))
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    refresh_phone_count(pool, &mobile.brand).await?;

    get_mobile(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Mobile {} vanished after insert", id)))
}

/// Apply a partial update (last write wins); `Ok(None)` when the id does not exist
pub async fn update_mobile(
    pool: &SqlitePool,
    id: i64,
    patch: MobilePatch,
) -> Result<Option<Mobile>> {
    let Some(mut mobile) = get_mobile(pool, id).await? else {
        return Ok(None);
    };
    let previous_brand = mobile.brand.clone();
    patch.apply(&mut mobile);

    sqlx::query(
        r#"
        UPDATE mobiles
        SET slug = ?, name = ?, brand = ?, model = ?, image_url = ?, imagekit_path = ?,
            release_date = ?, price = ?, short_specs = ?, carousel_images = ?,
            specifications = ?, dimensions = ?, build_materials = ?
        WHERE id = ?
        "#,
    )
    .bind(&mobile.slug)
    .bind(&mobile.name)
    .bind(&mobile.brand)
    .bind(&mobile.model)
    .bind(&mobile.image_url)
    .bind(&mobile.imagekit_path)
    .bind(&mobile.release_date)
    .bind(&mobile.price)
    .bind(Json(&mobile.short_specs))
    .bind(Json(&mobile.carousel_images))
    .bind(Json(&mobile.specifications))
    .bind(mobile.dimensions.as_ref().map(Json))
    .bind(mobile.build_materials.as_ref().map(Json))
    .bind(id)
    .execute(pool)
    .await?;

    if previous_brand != mobile.brand {
        refresh_phone_count(pool, &previous_brand).await?;
        refresh_phone_count(pool, &mobile.brand).await?;
    }

    get_mobile(pool, id).await
}

pub async fn delete_mobile(pool: &SqlitePool, id: i64) -> Result<bool> {
    let Some(mobile) = get_mobile(pool, id).await? else {
        return Ok(false);
    };
    let result = sqlx::query("DELETE FROM mobiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    refresh_phone_count(pool, &mobile.brand).await?;
    Ok(result.rows_affected() > 0)
}
