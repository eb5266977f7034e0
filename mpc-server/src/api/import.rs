//! Admin import endpoints
//!
//! Imports run inside the request: listing, per-item detail fetch and upsert
//! are awaited in sequence with the configured throttle between items.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::settings::resolve_key;
use crate::extract::JsonBody;
use crate::{ApiError, ApiResult, AppState};
use mpc_common::config::KeySource;
use mpc_common::db::settings::{MOBILEAPI_KEY, RAPIDAPI_KEY};
use mpc_common::FieldError;
use mpc_ingest::sources::{MobileApiClient, RapidApiClient};
use mpc_ingest::{ImportOptions, ImportResult, ImportService, PhoneSource, SourceError, SourceKind};

const DEFAULT_IMPORT_LIMIT: usize = 10;

/// Preference order when the request names no source
const SOURCE_PREFERENCE: [SourceKind; 2] = [SourceKind::RapidApi, SourceKind::MobileApi];

fn setting_key_for(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::RapidApi => RAPIDAPI_KEY,
        SourceKind::MobileApi => MOBILEAPI_KEY,
    }
}

/// Options shared by all import endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ImportRequest {
    pub limit: Option<usize>,
    pub source: Option<SourceKind>,
    #[serde(default, alias = "updateExisting")]
    pub update_existing: bool,
}

#[derive(Debug, Deserialize)]
pub struct BrandImportRequest {
    #[serde(default)]
    pub brand: String,
    #[serde(flatten)]
    pub options: ImportRequest,
}

#[derive(Debug, Deserialize)]
pub struct SearchImportRequest {
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub options: ImportRequest,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub source: SourceKind,
    #[serde(flatten)]
    pub result: ImportResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub source: SourceKind,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_source: Option<KeySource>,
}

fn source_error(e: SourceError) -> ApiError {
    match e {
        SourceError::NotConfigured(msg) => ApiError::ServiceUnavailable(msg),
        other => ApiError::Internal(other.to_string()),
    }
}

fn build_source(state: &AppState, kind: SourceKind, key: String) -> ApiResult<Arc<dyn PhoneSource>> {
    let source: Arc<dyn PhoneSource> = match kind {
        SourceKind::RapidApi => {
            let config = &state.config.rapidapi;
            let client = RapidApiClient::new(key, config.host.clone(), &config.base_url)
                .map_err(source_error)?;
            Arc::new(client)
        }
        SourceKind::MobileApi => Arc::new(
            MobileApiClient::new(key, &state.config.mobileapi.base_url).map_err(source_error)?,
        ),
    };
    Ok(source)
}

/// Requested source, or the first configured one
///
/// 503 when the chosen source (or every source) has no key.
async fn select_source(
    state: &AppState,
    requested: Option<SourceKind>,
) -> ApiResult<(SourceKind, Arc<dyn PhoneSource>)> {
    let candidates: Vec<SourceKind> = match requested {
        Some(kind) => vec![kind],
        None => SOURCE_PREFERENCE.to_vec(),
    };

    for kind in &candidates {
        if let Some(key) = resolve_key(state, setting_key_for(*kind)).await? {
            return Ok((*kind, build_source(state, *kind, key.value)?));
        }
    }

    Err(ApiError::ServiceUnavailable(match requested {
        Some(kind) => format!("Import source '{}' is not configured", kind.as_str()),
        None => "No import source configured (set RAPIDAPI_KEY or MOBILEAPI_KEY)".to_string(),
    }))
}

async fn prepare(
    state: &AppState,
    options: &ImportRequest,
) -> ApiResult<(SourceKind, ImportService, usize)> {
    let max_limit = state.config.import.max_limit.max(1);
    let limit = options
        .limit
        .unwrap_or(DEFAULT_IMPORT_LIMIT)
        .clamp(1, max_limit);

    let (kind, source) = select_source(state, options.source).await?;
    let service = ImportService::new(
        state.db.clone(),
        source,
        ImportOptions {
            request_delay: Duration::from_millis(state.config.import.request_delay_ms),
            update_existing: options.update_existing,
        },
    );
    Ok((kind, service, limit))
}

fn required(field: &str, value: &str) -> ApiResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(field, "Required")]));
    }
    Ok(value.to_string())
}

/// POST /api/admin/import/latest
pub async fn import_latest(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let (source, service, limit) = prepare(&state, &request).await?;
    info!(source = source.as_str(), limit, "Importing latest mobiles");

    let result = service.import_latest_mobiles(limit).await;
    Ok(Json(ImportResponse { source, result }))
}

/// POST /api/admin/import/brand
pub async fn import_brand(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<BrandImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let brand = required("brand", &request.brand)?;
    let (source, service, limit) = prepare(&state, &request.options).await?;
    info!(source = source.as_str(), brand = %brand, limit, "Importing brand mobiles");

    let result = service.import_mobiles_by_brand(&brand, limit).await;
    Ok(Json(ImportResponse { source, result }))
}

/// POST /api/admin/import/search
pub async fn import_search(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SearchImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let query = required("query", &request.query)?;
    let (source, service, limit) = prepare(&state, &request.options).await?;
    info!(source = source.as_str(), query = %query, limit, "Importing search results");

    let result = service.search_and_import_mobiles(&query, limit).await;
    Ok(Json(ImportResponse { source, result }))
}

/// GET /api/admin/import/sources
pub async fn list_sources(State(state): State<AppState>) -> ApiResult<Json<Vec<SourceStatus>>> {
    let mut statuses = Vec::with_capacity(SOURCE_PREFERENCE.len());
    for kind in SOURCE_PREFERENCE {
        let key = resolve_key(&state, setting_key_for(kind)).await?;
        statuses.push(SourceStatus {
            source: kind,
            configured: key.is_some(),
            key_source: key.map(|k| k.source),
        });
    }
    Ok(Json(statuses))
}

pub fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/import/latest", post(import_latest))
        .route("/api/admin/import/brand", post(import_brand))
        .route("/api/admin/import/search", post(import_search))
        .route("/api/admin/import/sources", get(list_sources))
}
