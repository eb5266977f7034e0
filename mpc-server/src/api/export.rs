//! Catalog export downloads

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::export::{brands_csv, catalog_sql, mobiles_csv, CatalogExport};
use crate::{ApiResult, AppState};
use mpc_common::db::{brands, mobiles};

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}

/// `mpc-<what>-YYYY-MM-DD.<ext>`
fn dated_filename(what: &str, extension: &str) -> String {
    format!("mpc-{}-{}.{}", what, Utc::now().format("%Y-%m-%d"), extension)
}

fn download(content_type: &str, filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, attachment(filename)),
        ],
        body,
    )
        .into_response()
}

/// GET /api/export/json
pub async fn export_json(State(state): State<AppState>) -> ApiResult<Response> {
    let export = CatalogExport::new(
        brands::list_brands(&state.db).await?,
        mobiles::list_mobiles(&state.db).await?,
    );
    info!(
        brands = export.brands.len(),
        mobiles = export.mobiles.len(),
        "Exporting catalog as JSON"
    );

    let filename = dated_filename("catalog", "json");
    Ok((
        [(header::CONTENT_DISPOSITION, attachment(&filename))],
        Json(export),
    )
        .into_response())
}

/// GET /api/export/csv/brands
pub async fn export_brands_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let body = brands_csv(&brands::list_brands(&state.db).await?)?;
    Ok(download(
        "text/csv; charset=utf-8",
        &dated_filename("brands", "csv"),
        body,
    ))
}

/// GET /api/export/csv/mobiles
pub async fn export_mobiles_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let body = mobiles_csv(&mobiles::list_mobiles(&state.db).await?)?;
    Ok(download(
        "text/csv; charset=utf-8",
        &dated_filename("mobiles", "csv"),
        body,
    ))
}

/// GET /api/export/sql
pub async fn export_sql(State(state): State<AppState>) -> ApiResult<Response> {
    let body = catalog_sql(
        &brands::list_brands(&state.db).await?,
        &mobiles::list_mobiles(&state.db).await?,
    )?;
    Ok(download(
        "application/sql; charset=utf-8",
        &dated_filename("catalog", "sql"),
        body,
    ))
}

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/api/export/json", get(export_json))
        .route("/api/export/csv/brands", get(export_brands_csv))
        .route("/api/export/csv/mobiles", get(export_mobiles_csv))
        .route("/api/export/sql", get(export_sql))
}
