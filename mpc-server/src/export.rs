//! Catalog export builders (JSON, CSV, SQL)
//!
//! Pure functions over already-loaded rows; the handlers in `api::export`
//! load the catalog and attach download headers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{ApiError, ApiResult};
use mpc_common::db::{Brand, Mobile};

const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Full catalog dump served by `/api/export/json`
#[derive(Debug, Serialize)]
pub struct CatalogExport {
    pub exported_at: DateTime<Utc>,
    pub brands: Vec<Brand>,
    pub mobiles: Vec<Mobile>,
}

impl CatalogExport {
    pub fn new(brands: Vec<Brand>, mobiles: Vec<Mobile>) -> Self {
        Self {
            exported_at: Utc::now(),
            brands,
            mobiles,
        }
    }
}

fn csv_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Internal(format!("CSV export failed: {}", e))
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> ApiResult<String> {
    let bytes = writer.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

pub fn brands_csv(brands: &[Brand]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "name",
            "slug",
            "logo",
            "phone_count",
            "description",
            "is_visible",
            "created_at",
        ])
        .map_err(csv_error)?;

    for brand in brands {
        writer
            .write_record([
                brand.id.to_string(),
                brand.name.clone(),
                brand.slug.clone(),
                brand.logo.clone(),
                brand.phone_count.clone(),
                brand.description.clone(),
                brand.is_visible.to_string(),
                brand.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    finish_csv(writer)
}

/// One row per mobile with short specs flattened into columns
pub fn mobiles_csv(mobiles: &[Mobile]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "slug",
            "name",
            "brand",
            "model",
            "price",
            "release_date",
            "ram",
            "storage",
            "camera",
            "battery",
            "display",
            "processor",
            "image_url",
            "created_at",
        ])
        .map_err(csv_error)?;

    for mobile in mobiles {
        let specs = &mobile.short_specs;
        writer
            .write_record([
                mobile.id.to_string(),
                mobile.slug.clone(),
                mobile.name.clone(),
                mobile.brand.clone(),
                mobile.model.clone(),
                mobile.price.clone().unwrap_or_default(),
                mobile.release_date.clone(),
                specs.ram.clone(),
                specs.storage.clone(),
                specs.camera.clone(),
                specs.battery.clone().unwrap_or_default(),
                specs.display.clone().unwrap_or_default(),
                specs.processor.clone().unwrap_or_default(),
                mobile.image_url.clone(),
                mobile.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    finish_csv(writer)
}

/// SQL string literal with embedded quotes doubled
pub fn sql_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn sql_opt(value: Option<&str>) -> String {
    value.map(sql_text).unwrap_or_else(|| "NULL".to_string())
}

fn sql_json<T: Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value)
        .map(|json| sql_text(&json))
        .map_err(|e| ApiError::Internal(format!("SQL export failed: {}", e)))
}

fn sql_json_opt<T: Serialize>(value: Option<&T>) -> ApiResult<String> {
    match value {
        Some(value) => sql_json(value),
        None => Ok("NULL".to_string()),
    }
}

fn sql_timestamp(value: &DateTime<Utc>) -> String {
    sql_text(&value.format(SQL_TIMESTAMP_FORMAT).to_string())
}

/// `INSERT` script that recreates the catalog rows (ids included)
pub fn catalog_sql(brands: &[Brand], mobiles: &[Mobile]) -> ApiResult<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "-- Mobile Price Compare catalog export\n-- Generated {}\n\nBEGIN TRANSACTION;\n\n",
        Utc::now().to_rfc3339()
    ));

    for brand in brands {
        out.push_str(&format!(
            "INSERT INTO brands (id, name, slug, logo, phone_count, description, is_visible, created_at) \
             VALUES ({}, {}, {}, {}, {}, {}, {}, {});\n",
            brand.id,
            sql_text(&brand.name),
            sql_text(&brand.slug),
            sql_text(&brand.logo),
            sql_text(&brand.phone_count),
            sql_text(&brand.description),
            i32::from(brand.is_visible),
            sql_timestamp(&brand.created_at),
        ));
    }
    if !brands.is_empty() {
        out.push('\n');
    }

    for mobile in mobiles {
        out.push_str(&format!(
            "INSERT INTO mobiles (id, slug, name, brand, model, image_url, imagekit_path, release_date, price, \
             short_specs, carousel_images, specifications, dimensions, build_materials, created_at) \
             VALUES ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {});\n",
            mobile.id,
            sql_text(&mobile.slug),
            sql_text(&mobile.name),
            sql_text(&mobile.brand),
            sql_text(&mobile.model),
            sql_text(&mobile.image_url),
            sql_opt(mobile.imagekit_path.as_deref()),
            sql_text(&mobile.release_date),
            sql_opt(mobile.price.as_deref()),
            sql_json(&mobile.short_specs)?,
            sql_json(&mobile.carousel_images)?,
            sql_json(&mobile.specifications)?,
            sql_json_opt(mobile.dimensions.as_ref())?,
            sql_json_opt(mobile.build_materials.as_ref())?,
            sql_timestamp(&mobile.created_at),
        ));
    }

    out.push_str("\nCOMMIT;\n");
    Ok(out)
}
