//! API-key settings endpoints
//!
//! Keys resolve settings table → environment → TOML. The admin panel can
//! only write the database layer, and reads back masked values.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extract::JsonBody;
use crate::{ApiError, ApiResult, AppState};
use mpc_common::config::{is_valid_key, resolve_api_key, KeySource, ResolvedKey};
use mpc_common::db::settings::{self, MOBILEAPI_KEY, OPENAI_API_KEY, RAPIDAPI_KEY};

/// Environment variable consulted for a settings key
pub fn env_var_for(setting_key: &str) -> Option<&'static str> {
    match setting_key {
        OPENAI_API_KEY => Some("OPENAI_API_KEY"),
        RAPIDAPI_KEY => Some("RAPIDAPI_KEY"),
        MOBILEAPI_KEY => Some("MOBILEAPI_KEY"),
        _ => None,
    }
}

fn toml_value_for<'a>(state: &'a AppState, setting_key: &str) -> Option<&'a str> {
    let config = &state.config;
    match setting_key {
        OPENAI_API_KEY => config.openai.api_key.as_deref(),
        RAPIDAPI_KEY => config.rapidapi.api_key.as_deref(),
        MOBILEAPI_KEY => config.mobileapi.api_key.as_deref(),
        _ => None,
    }
}

/// Resolve one of the admin-writable API keys
pub async fn resolve_key(state: &AppState, setting_key: &str) -> ApiResult<Option<ResolvedKey>> {
    let env_var = env_var_for(setting_key)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown setting: {}", setting_key)))?;
    Ok(resolve_api_key(&state.db, setting_key, env_var, toml_value_for(state, setting_key)).await?)
}

/// "sk-p…1234" style preview; short keys are fully hidden
pub fn mask_key(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingStatus {
    pub key: &'static str,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<KeySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetSettingRequest {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SetSettingResponse {
    pub success: bool,
    pub message: String,
}

async fn status_for(state: &AppState, key: &'static str) -> ApiResult<SettingStatus> {
    let resolved = resolve_key(state, key).await?;
    Ok(SettingStatus {
        key,
        configured: resolved.is_some(),
        source: resolved.as_ref().map(|r| r.source),
        masked_value: resolved.as_ref().map(|r| mask_key(&r.value)),
    })
}

/// GET /api/admin/settings
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Json<Vec<SettingStatus>>> {
    let mut statuses = Vec::with_capacity(settings::ADMIN_WRITABLE_KEYS.len());
    for key in settings::ADMIN_WRITABLE_KEYS {
        statuses.push(status_for(&state, *key).await?);
    }
    Ok(Json(statuses))
}

/// PUT /api/admin/settings/:key
///
/// **Request:** `{"value": "..."}`
///
/// **Errors:**
/// - 404 Not Found: key is not admin-writable
/// - 400 Bad Request: empty or whitespace-only value
pub async fn set_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    JsonBody(payload): JsonBody<SetSettingRequest>,
) -> ApiResult<Json<SetSettingResponse>> {
    if !settings::ADMIN_WRITABLE_KEYS.contains(&key.as_str()) {
        return Err(ApiError::NotFound(format!("Unknown setting: {}", key)));
    }
    if !is_valid_key(&payload.value) {
        return Err(ApiError::BadRequest(
            "Value cannot be empty or whitespace-only".to_string(),
        ));
    }

    settings::set_setting(&state.db, &key, payload.value.trim()).await?;
    info!(setting = %key, "API key configured via admin panel");

    Ok(Json(SetSettingResponse {
        success: true,
        message: format!("{} saved", key),
    }))
}

/// DELETE /api/admin/settings/:key
///
/// Drops the stored value; resolution falls back to environment and TOML.
pub async fn clear_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<StatusCode> {
    if !settings::ADMIN_WRITABLE_KEYS.contains(&key.as_str()) {
        return Err(ApiError::NotFound(format!("Unknown setting: {}", key)));
    }
    settings::clear_setting(&state.db, &key).await?;
    info!(setting = %key, "API key cleared via admin panel");
    Ok(StatusCode::NO_CONTENT)
}

pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/settings", get(list_settings))
        .route(
            "/api/admin/settings/:key",
            put(set_setting).delete(clear_setting),
        )
}
