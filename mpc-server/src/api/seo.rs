//! `/sitemap.xml` and `/robots.txt`

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::seo::{robots_txt, sitemap_xml};
use crate::{ApiResult, AppState};
use mpc_common::db::{brands, mobiles};

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> ApiResult<Response> {
    let xml = sitemap_xml(
        &state.config.site.url,
        &brands::list_visible_brands(&state.db).await?,
        &mobiles::list_mobiles(&state.db).await?,
    );
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response())
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.config.site.url),
    )
        .into_response()
}

pub fn seo_routes() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
}
