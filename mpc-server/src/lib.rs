//! mpc-server library - HTTP API for the phone price-compare catalog
//!
//! Public catalog, SEO and AI endpoints, plus JWT-gated admin, import and
//! export endpoints over a shared SQLite pool.

use axum::{middleware, Router};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mpc_common::config::TomlConfig;

pub mod api;
pub mod auth;
pub mod error;
pub mod export;
pub mod extract;
pub mod seo;

pub use error::{ApiError, ApiResult};

use auth::AuthKeys;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<TomlConfig>,
    /// Signing keys and admin credentials
    pub auth: Arc<AuthKeys>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: TomlConfig) -> Self {
        let auth = AuthKeys::from_config(&config.auth);
        Self {
            db,
            config: Arc::new(config),
            auth: Arc::new(auth),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// `/api/admin/*` and `/api/export/*` sit behind [`auth::require_jwt_auth`].
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(api::admin_routes())
        .merge(api::import_routes())
        .merge(api::ai_admin_routes())
        .merge(api::settings_routes())
        .merge(api::export_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_jwt_auth,
        ));

    let public = Router::new()
        .merge(api::health_routes())
        .merge(api::index_routes())
        .merge(api::catalog_routes())
        .merge(api::auth_routes())
        .merge(api::ai_routes())
        .merge(api::seo_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
