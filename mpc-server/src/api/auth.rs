//! Admin login, logout and session check

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::{cleared_cookie, session_cookie, token_from_headers};
use crate::extract::JsonBody;
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// **Response:** 200 `{"success": true, "redirectTo": "/admin"}` with the
/// session cookie, or 401 `{"success": false, "message": "Invalid credentials"}`.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<Response> {
    if !state
        .auth
        .check_credentials(&payload.username, &payload.password)
    {
        warn!(username = %payload.username, "Rejected admin login");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
            .into_response());
    }

    let token = state.auth.issue_token(&payload.username)?;
    info!(username = %payload.username, "Admin logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token, state.auth.ttl_seconds()))],
        Json(json!({"success": true, "redirectTo": "/admin"})),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout() -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cleared_cookie())],
        Json(json!({"success": true})),
    )
        .into_response()
}

/// GET /api/auth/check
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    match token_from_headers(&headers).and_then(|token| state.auth.verify_token(token)) {
        Some(claims) => Json(json!({"authenticated": true, "username": claims.sub})),
        None => Json(json!({"authenticated": false})),
    }
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/check", get(check))
}
