//! Public catalog endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState};
use mpc_common::db::{brands, mobiles, Brand, Mobile};

#[derive(Debug, Deserialize)]
pub struct MobileFilter {
    pub brand: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/brands
///
/// Visible brands only, ordered by name.
pub async fn list_brands(State(state): State<AppState>) -> ApiResult<Json<Vec<Brand>>> {
    Ok(Json(brands::list_visible_brands(&state.db).await?))
}

/// GET /api/brands/:slug
pub async fn get_brand(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Brand>> {
    brands::get_brand_by_slug(&state.db, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Brand not found: {}", slug)))
}

/// GET /api/mobiles[?brand=]
pub async fn list_mobiles(
    State(state): State<AppState>,
    Query(filter): Query<MobileFilter>,
) -> ApiResult<Json<Vec<Mobile>>> {
    let result = match filter.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        Some(brand) => mobiles::list_mobiles_by_brand(&state.db, brand).await?,
        None => mobiles::list_mobiles(&state.db).await?,
    };
    Ok(Json(result))
}

/// GET /api/mobiles/:brand/:slug
pub async fn get_mobile(
    State(state): State<AppState>,
    Path((brand, slug)): Path<(String, String)>,
) -> ApiResult<Json<Mobile>> {
    mobiles::get_mobile_by_brand_and_slug(&state.db, &brand, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Mobile not found: {}/{}", brand, slug)))
}

/// GET /api/search?q=
///
/// A blank query returns an empty list without touching the database.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Mobile>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(mobiles::search_mobiles(&state.db, q).await?))
}

/// GET /api/featured
pub async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<Mobile>>> {
    let limit = state.config.site.featured_limit;
    Ok(Json(mobiles::featured_mobiles(&state.db, limit).await?))
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/brands", get(list_brands))
        .route("/api/brands/:slug", get(get_brand))
        .route("/api/mobiles", get(list_mobiles))
        .route("/api/mobiles/:brand/:slug", get(get_mobile))
        .route("/api/search", get(search))
        .route("/api/featured", get(featured))
}
