//! AI analysis endpoints
//!
//! Every handler answers even without an OpenAI key: [`AiService`] falls
//! back to deterministic content when the model is unavailable.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::time::Duration;

use super::settings::resolve_key;
use crate::extract::JsonBody;
use crate::{ApiError, ApiResult, AppState};
use mpc_ai::{AiConfig, AiService, EnhancedMobileData, MarketInsights, PhoneAnalysis, PhoneComparison};
use mpc_common::db::settings::OPENAI_API_KEY;
use mpc_common::db::{brands, mobiles, Mobile};

const MIN_COMPARE: usize = 2;
const MAX_COMPARE: usize = 4;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub slugs: Vec<String>,
}

/// Service built from the currently resolved key, so admin key changes
/// apply to the next request
async fn ai_service(state: &AppState) -> ApiResult<AiService> {
    let openai = &state.config.openai;
    let api_key = resolve_key(state, OPENAI_API_KEY).await?.map(|k| k.value);
    Ok(AiService::new(AiConfig {
        api_key,
        model: openai.model.clone(),
        base_url: openai.base_url.clone(),
        timeout: Duration::from_secs(openai.timeout_seconds),
    }))
}

/// GET /api/ai/analysis/:brand/:slug
pub async fn analysis(
    State(state): State<AppState>,
    Path((brand, slug)): Path<(String, String)>,
) -> ApiResult<Json<PhoneAnalysis>> {
    let mobile = mobiles::get_mobile_by_brand_and_slug(&state.db, &brand, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mobile not found: {}/{}", brand, slug)))?;

    let ai = ai_service(&state).await?;
    Ok(Json(ai.analyze_phone(&mobile).await))
}

/// POST /api/ai/compare
///
/// **Request:** `{"slugs": ["iphone-15-pro", "pixel-8"]}` (2 to 4 distinct slugs)
pub async fn compare(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CompareRequest>,
) -> ApiResult<Json<PhoneComparison>> {
    let mut slugs: Vec<String> = Vec::with_capacity(request.slugs.len());
    for slug in request.slugs.iter().map(|s| s.trim()) {
        if !slug.is_empty() && !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }
    if !(MIN_COMPARE..=MAX_COMPARE).contains(&slugs.len()) {
        return Err(ApiError::BadRequest(format!(
            "Compare needs between {} and {} distinct phones",
            MIN_COMPARE, MAX_COMPARE
        )));
    }

    let mut phones: Vec<Mobile> = Vec::with_capacity(slugs.len());
    for slug in &slugs {
        let mobile = mobiles::get_mobile_by_slug(&state.db, slug)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Mobile not found: {}", slug)))?;
        phones.push(mobile);
    }

    let ai = ai_service(&state).await?;
    Ok(Json(ai.compare_phones(&phones).await))
}

/// GET /api/ai/insights/:brand
///
/// Uses the stored brand name when the slug is known, else the raw path value.
pub async fn insights(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> ApiResult<Json<MarketInsights>> {
    let name = brands::get_brand_by_slug(&state.db, &brand)
        .await?
        .map(|b| b.name)
        .unwrap_or(brand);

    let ai = ai_service(&state).await?;
    Ok(Json(ai.market_insights(&name).await))
}

/// POST /api/admin/ai/enhance/:id
pub async fn enhance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EnhancedMobileData>> {
    let mobile = mobiles::get_mobile(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mobile not found: {}", id)))?;

    let ai = ai_service(&state).await?;
    Ok(Json(ai.enhance_mobile_data(&mobile).await))
}

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/analysis/:brand/:slug", get(analysis))
        .route("/api/ai/compare", post(compare))
        .route("/api/ai/insights/:brand", get(insights))
}

pub fn ai_admin_routes() -> Router<AppState> {
    Router::new().route("/api/admin/ai/enhance/:id", post(enhance))
}
