//! Admin catalog management (brands, mobiles, stats)
//!
//! Mounted behind the session check. Creates answer 201, deletes 204, and
//! unknown ids 404. Duplicate slugs surface as 409 via `Error::Conflict`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::extract::{validated, JsonBody};
use crate::{ApiError, ApiResult, AppState};
use mpc_common::db::{
    brands, catalog_stats, mobiles, Brand, BrandPatch, CatalogStats, Mobile, MobilePatch,
    NewBrand, NewMobile,
};

fn brand_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Brand not found: {}", id))
}

fn mobile_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Mobile not found: {}", id))
}

// ============================================================================
// Brands
// ============================================================================

/// GET /api/admin/brands (hidden brands included)
pub async fn list_brands(State(state): State<AppState>) -> ApiResult<Json<Vec<Brand>>> {
    Ok(Json(brands::list_brands(&state.db).await?))
}

/// POST /api/admin/brands
pub async fn create_brand(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewBrand>,
) -> ApiResult<(StatusCode, Json<Brand>)> {
    let payload = validated(payload.normalize())?;
    let brand = brands::create_brand(&state.db, &payload).await?;
    info!(brand = %brand.slug, id = brand.id, "Brand created");
    Ok((StatusCode::CREATED, Json(brand)))
}

/// PUT /api/admin/brands/:id
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<BrandPatch>,
) -> ApiResult<Json<Brand>> {
    let patch = validated(patch)?;
    brands::update_brand(&state.db, id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| brand_not_found(id))
}

/// DELETE /api/admin/brands/:id
///
/// Mobiles referencing the brand slug are left in place.
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if brands::delete_brand(&state.db, id).await? {
        info!(id, "Brand deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(brand_not_found(id))
    }
}

// ============================================================================
// Mobiles
// ============================================================================

/// GET /api/admin/mobiles
pub async fn list_mobiles(State(state): State<AppState>) -> ApiResult<Json<Vec<Mobile>>> {
    Ok(Json(mobiles::list_mobiles(&state.db).await?))
}

/// POST /api/admin/mobiles
pub async fn create_mobile(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewMobile>,
) -> ApiResult<(StatusCode, Json<Mobile>)> {
    let payload = validated(payload.normalize())?;
    let mobile = mobiles::create_mobile(&state.db, &payload).await?;
    info!(mobile = %mobile.slug, brand = %mobile.brand, id = mobile.id, "Mobile created");
    Ok((StatusCode::CREATED, Json(mobile)))
}

/// PUT /api/admin/mobiles/:id
pub async fn update_mobile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<MobilePatch>,
) -> ApiResult<Json<Mobile>> {
    let patch = validated(patch)?;
    mobiles::update_mobile(&state.db, id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| mobile_not_found(id))
}

/// DELETE /api/admin/mobiles/:id
pub async fn delete_mobile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if mobiles::delete_mobile(&state.db, id).await? {
        info!(id, "Mobile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(mobile_not_found(id))
    }
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<CatalogStats>> {
    Ok(Json(catalog_stats(&state.db).await?))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/brands", get(list_brands).post(create_brand))
        .route(
            "/api/admin/brands/:id",
            axum::routing::put(update_brand).delete(delete_brand),
        )
        .route("/api/admin/mobiles", get(list_mobiles).post(create_mobile))
        .route(
            "/api/admin/mobiles/:id",
            axum::routing::put(update_mobile).delete(delete_mobile),
        )
        .route("/api/admin/stats", get(stats))
}
