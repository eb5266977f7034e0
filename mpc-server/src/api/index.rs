//! `GET /api` endpoint index

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub auth: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiIndex {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: &[(&str, &str, &str, bool)] = &[
    ("GET", "/api/brands", "Visible brands", false),
    ("GET", "/api/brands/:slug", "Brand by slug", false),
    ("GET", "/api/mobiles", "All mobiles, optionally ?brand=", false),
    ("GET", "/api/mobiles/:brand/:slug", "Mobile detail", false),
    ("GET", "/api/search", "Search mobiles by ?q=", false),
    ("GET", "/api/featured", "Newest mobiles", false),
    ("POST", "/api/auth/login", "Admin login", false),
    ("POST", "/api/auth/logout", "Admin logout", false),
    ("GET", "/api/auth/check", "Session status", false),
    ("GET", "/api/ai/analysis/:brand/:slug", "AI phone analysis", false),
    ("POST", "/api/ai/compare", "AI comparison of 2-4 phones", false),
    ("GET", "/api/ai/insights/:brand", "AI brand market insights", false),
    ("GET", "/api/admin/brands", "Manage brands", true),
    ("GET", "/api/admin/mobiles", "Manage mobiles", true),
    ("GET", "/api/admin/stats", "Catalog counts", true),
    ("POST", "/api/admin/import/latest", "Import latest phones", true),
    ("POST", "/api/admin/import/brand", "Import phones of one brand", true),
    ("POST", "/api/admin/import/search", "Import phones matching a query", true),
    ("GET", "/api/admin/import/sources", "Configured import sources", true),
    ("POST", "/api/admin/ai/enhance/:id", "AI marketing copy for a mobile", true),
    ("GET", "/api/admin/settings", "API key status", true),
    ("PUT", "/api/admin/settings/:key", "Store an API key", true),
    ("GET", "/api/export/json", "Catalog export (JSON)", true),
    ("GET", "/api/export/csv/brands", "Brands export (CSV)", true),
    ("GET", "/api/export/csv/mobiles", "Mobiles export (CSV)", true),
    ("GET", "/api/export/sql", "Catalog export (SQL)", true),
];

/// GET /api
pub async fn api_index() -> Json<ApiIndex> {
    Json(ApiIndex {
        name: "Mobile Price Compare API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description, auth)| EndpointInfo {
                method,
                path,
                description,
                auth,
            })
            .collect(),
    })
}

pub fn index_routes() -> Router<AppState> {
    Router::new().route("/api", get(api_index))
}
