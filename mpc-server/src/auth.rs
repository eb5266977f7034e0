//! Admin session handling
//!
//! A successful login issues an HS256 JWT stored in the `auth-token`
//! HttpOnly cookie. [`require_jwt_auth`] guards `/api/admin/*` and
//! `/api/export/*`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ApiError, AppState};
use mpc_common::config::AuthConfig;

pub const AUTH_COOKIE: &str = "auth-token";

/// Used only when no secret is configured; startup logs a warning
const DEV_JWT_SECRET: &str = "mpc-development-secret-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Longest session lifetime, in hours
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
    admin_username: String,
    admin_password: String,
}

impl AuthKeys {
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = match config.jwt_secret.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret.to_string(),
            None => {
                warn!("No JWT secret configured (MPC_JWT_SECRET); using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: config.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS) * 3600,
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        username == self.admin_username && password == self.admin_password
    }

    pub fn issue_token(&self, username: &str) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Claims of a valid, unexpired token
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Rejected auth token");
                None
            }
        }
    }
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, max_age: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Strict; Max-Age={}",
        AUTH_COOKIE, token, max_age
    )
}

/// `Set-Cookie` value that expires the session cookie
pub fn cleared_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; SameSite=Strict; Max-Age=0", AUTH_COOKIE)
}

/// Session token from any `Cookie` header
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(AUTH_COOKIE)?.strip_prefix('='))
        .find(|token| !token.is_empty())
}

/// Authentication middleware
///
/// Valid claims are inserted into request extensions for downstream handlers.
pub async fn require_jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = token_from_headers(request.headers())
        .and_then(|token| state.auth.verify_token(token))
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
