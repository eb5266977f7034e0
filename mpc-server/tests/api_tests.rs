//! HTTP API integration tests
//!
//! Each test builds the full router over an in-memory database and drives
//! it with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mockito::Matcher;
use serde_json::{json, Value};
use serial_test::serial;
use tower::ServiceExt;

use mpc_common::config::TomlConfig;
use mpc_common::db::init_memory_database;
use mpc_server::{build_router, AppState};

const KEY_ENV_VARS: [&str; 3] = ["OPENAI_API_KEY", "RAPIDAPI_KEY", "MOBILEAPI_KEY"];

fn test_config() -> TomlConfig {
    let mut config = TomlConfig::default();
    config.auth.jwt_secret = Some("integration-test-secret".to_string());
    config.site.url = "https://phones.example".to_string();
    config.import.request_delay_ms = 0;
    config
}

async fn setup_with(config: TomlConfig) -> Router {
    for var in KEY_ENV_VARS {
        std::env::remove_var(var);
    }
    let db = init_memory_database().await.unwrap();
    build_router(AppState::new(db, config))
}

async fn setup() -> Router {
    setup_with(test_config()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn with_body(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Log in as the default admin and return the `auth-token=...` cookie pair
async fn login(app: &Router) -> String {
    let (status, headers, _) = send(
        app,
        with_body(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "admin", "password": "admin123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn mobile_payload(brand: &str, name: &str) -> Value {
    json!({
        "name": name,
        "brand": brand,
        "model": name,
        "imageUrl": "https://img.test/phone.png",
        "releaseDate": "2024",
        "price": "$799",
        "shortSpecs": {"ram": "8GB", "storage": "256GB", "camera": "50MP", "battery": "5000mAh"},
        "specifications": [
            {"category": "Display", "specs": [{"feature": "Size", "value": "6.2 inches"}]}
        ]
    })
}

#[tokio::test]
#[serial]
async fn test_health_endpoint() {
    let app = setup().await;
    let (status, body) = send_json(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mpc-server");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
#[serial]
async fn test_api_index_lists_endpoints() {
    let app = setup().await;
    let (status, body) = send_json(&app, get("/api", None)).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e["path"] == "/api/search"));
}

#[tokio::test]
#[serial]
async fn test_login_sets_cookie_and_bad_credentials_rejected() {
    let app = setup().await;

    let (status, headers, body) = send(
        &app,
        with_body(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "admin", "password": "admin123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("auth-token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Max-Age=86400"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"success": true, "redirectTo": "/admin"}));

    let (status, body) = send_json(
        &app,
        with_body(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "admin", "password": "nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "Invalid credentials"}));
}

#[tokio::test]
#[serial]
async fn test_auth_check_and_logout() {
    let app = setup().await;

    let (_, body) = send_json(&app, get("/api/auth/check", None)).await;
    assert_eq!(body, json!({"authenticated": false}));

    let cookie = login(&app).await;
    let (_, body) = send_json(&app, get("/api/auth/check", Some(&cookie))).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["username"], "admin");

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let cleared = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.starts_with("auth-token=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
#[serial]
async fn test_admin_and_export_require_session() {
    let app = setup().await;

    for uri in ["/api/admin/brands", "/api/admin/stats", "/api/export/sql"] {
        let (status, body) = send_json(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(body["message"].is_string());
    }

    let (status, _) = send_json(&app, get("/api/admin/brands", Some("auth-token=forged.token.value"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_create_mobile_then_fetch_publicly() {
    let app = setup().await;
    let cookie = login(&app).await;

    let (status, created) = send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload("samsung", "Galaxy S24")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "galaxy-s24");

    let (status, fetched) = send_json(&app, get("/api/mobiles/samsung/galaxy-s24", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["shortSpecs"]["battery"], "5000mAh");
    assert_eq!(fetched["specifications"][0]["specs"][0]["value"], "6.2 inches");

    let (status, _) = send_json(&app, get("/api/mobiles/apple/galaxy-s24", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_brand_filter_and_duplicate_slug_conflict() {
    let app = setup().await;
    let cookie = login(&app).await;

    for (brand, name) in [("samsung", "Galaxy A55"), ("samsung", "Galaxy S24"), ("google", "Pixel 8")] {
        let (status, _) = send_json(
            &app,
            with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload(brand, name)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = send_json(&app, get("/api/mobiles?brand=samsung", None)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|m| m["brand"] == "samsung"));

    let (_, all) = send_json(&app, get("/api/mobiles", None)).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    // same slug under another brand
    let mut duplicate = mobile_payload("google", "Pixel 8");
    duplicate["brand"] = json!("other");
    let (status, body) = send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &duplicate),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("slug already exists"));
}

#[tokio::test]
#[serial]
async fn test_validation_and_malformed_json_are_bad_requests() {
    let app = setup().await;
    let cookie = login(&app).await;

    let mut invalid = mobile_payload("apple", "iPhone 15");
    invalid["name"] = json!("   ");
    invalid["shortSpecs"]["ram"] = json!("");
    let (status, body) = send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &invalid),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"shortSpecs.ram"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/brands")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[serial]
async fn test_brand_crud_status_codes() {
    let app = setup().await;
    let cookie = login(&app).await;

    let (status, brand) = send_json(
        &app,
        with_body("POST", "/api/admin/brands", Some(&cookie), &json!({"name": "Nothing"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(brand["slug"], "nothing");
    let id = brand["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        with_body(
            "PUT",
            &format!("/api/admin/brands/{}", id),
            Some(&cookie),
            &json!({"isVisible": false}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isVisible"], false);

    let (_, visible) = send_json(&app, get("/api/brands", None)).await;
    assert!(visible.as_array().unwrap().is_empty());

    let (_, stats) = send_json(&app, get("/api/admin/stats", Some(&cookie))).await;
    assert_eq!(stats, json!({"brands": 1, "visibleBrands": 0, "mobiles": 0}));

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/brands/{}", id))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/brands/{}", id))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete_again).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_search_blank_and_matching() {
    let app = setup().await;
    let cookie = login(&app).await;
    send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload("google", "Pixel 8")),
    )
    .await;

    let (status, body) = send_json(&app, get("/api/search?q=", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send_json(&app, get("/api/search", None)).await;
    assert_eq!(body, json!([]));

    let (_, body) = send_json(&app, get("/api/search?q=PIXEL", None)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_sql_export_escapes_quotes() {
    let app = setup().await;
    let cookie = login(&app).await;
    send_json(
        &app,
        with_body(
            "POST",
            "/api/admin/brands",
            Some(&cookie),
            &json!({"name": "Joe's Phones", "slug": "joes-phones", "description": "'); DROP TABLE brands; --"}),
        ),
    )
    .await;

    let (status, headers, body) = send(&app, get("/api/export/sql", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers.get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"mpc-catalog-"));
    assert!(disposition.ends_with(".sql\""));

    let sql = String::from_utf8(body).unwrap();
    assert!(sql.contains("'Joe''s Phones'"));
    assert!(sql.contains("'''); DROP TABLE brands; --'"));

    let (status, headers, body) = send(&app, get("/api/export/csv/brands", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    assert!(String::from_utf8(body).unwrap().starts_with("id,name,slug,"));

    let (status, export) = send_json(&app, get("/api/export/json", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(export["exported_at"].is_string());
    assert_eq!(export["brands"][0]["name"], "Joe's Phones");
}

#[tokio::test]
#[serial]
async fn test_exported_phone_count_follows_admin_writes() {
    let app = setup().await;
    let cookie = login(&app).await;
    send_json(
        &app,
        with_body(
            "POST",
            "/api/admin/brands",
            Some(&cookie),
            &json!({"name": "Samsung", "phoneCount": "99"}),
        ),
    )
    .await;

    let exported_count = |export: &Value| export["brands"][0]["phoneCount"].clone();
    let (_, export) = send_json(&app, get("/api/export/json", Some(&cookie))).await;
    assert_eq!(exported_count(&export), "0");

    let (_, created) = send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload("samsung", "Galaxy S24")),
    )
    .await;
    let (_, export) = send_json(&app, get("/api/export/json", Some(&cookie))).await;
    assert_eq!(exported_count(&export), "1");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/mobiles/{}", created["id"]))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, export) = send_json(&app, get("/api/export/json", Some(&cookie))).await;
    assert_eq!(exported_count(&export), "0");
    let (_, _, csv) = send(&app, get("/api/export/csv/brands", Some(&cookie))).await;
    assert!(String::from_utf8(csv).unwrap().contains(",samsung,,0,"));
}

#[tokio::test]
#[serial]
async fn test_sitemap_and_robots() {
    let app = setup().await;
    let cookie = login(&app).await;
    send_json(
        &app,
        with_body("POST", "/api/admin/brands", Some(&cookie), &json!({"name": "Google"})),
    )
    .await;
    send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload("google", "Pixel 8")),
    )
    .await;

    let (status, headers, body) = send(&app, get("/sitemap.xml", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/xml"));
    let xml = String::from_utf8(body).unwrap();
    assert!(xml.contains("<loc>https://phones.example/brand/google</loc>"));
    assert!(xml.contains("<loc>https://phones.example/mobile/google/pixel-8</loc>"));

    let (status, _, body) = send(&app, get("/robots.txt", None)).await;
    assert_eq!(status, StatusCode::OK);
    let robots = String::from_utf8(body).unwrap();
    assert!(robots.contains("Disallow: /api/admin"));
    assert!(robots.contains("Sitemap: https://phones.example/sitemap.xml"));
}

#[tokio::test]
#[serial]
async fn test_import_without_key_is_unavailable() {
    let app = setup().await;
    let cookie = login(&app).await;

    let (status, body) = send_json(
        &app,
        with_body("POST", "/api/admin/import/latest", Some(&cookie), &json!({"limit": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("not configured"));

    let (status, _) = send_json(
        &app,
        with_body(
            "POST",
            "/api/admin/import/brand",
            Some(&cookie),
            &json!({"brand": "Apple", "source": "rapidapi"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, sources) = send_json(&app, get("/api/admin/import/sources", Some(&cookie))).await;
    assert_eq!(
        sources,
        json!([
            {"source": "rapidapi", "configured": false},
            {"source": "mobileapi", "configured": false}
        ])
    );
}

#[tokio::test]
#[serial]
async fn test_import_uses_key_saved_in_settings() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/devices/latest/")
        .match_header("Authorization", "Token saved-key-123")
        .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "devices": [{
                    "id": 1,
                    "name": "Pixel 8",
                    "manufacturer_name": "Google",
                    "release_date": "2023-10-04",
                    "ram": "8 GB",
                    "storage": "128 GB",
                    "main_camera": "50 MP"
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut config = test_config();
    config.mobileapi.base_url = server.url();
    config.import.max_limit = 3;
    let app = setup_with(config).await;
    let cookie = login(&app).await;

    let (status, _) = send_json(
        &app,
        with_body(
            "PUT",
            "/api/admin/settings/mobileapi_key",
            Some(&cookie),
            &json!({"value": "saved-key-123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, result) = send_json(
        &app,
        with_body("POST", "/api/admin/import/latest", Some(&cookie), &json!({"limit": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", result);
    assert_eq!(result["source"], "mobileapi");
    assert_eq!(result["success"], 1);
    mock.assert_async().await;

    let (status, phone) = send_json(&app, get("/api/mobiles/google/google-pixel-8", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(phone["name"], "Pixel 8");

    let (_, settings) = send_json(&app, get("/api/admin/settings", Some(&cookie))).await;
    let mobileapi = settings
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["key"] == "mobileapi_key")
        .unwrap();
    assert_eq!(mobileapi["configured"], true);
    assert_eq!(mobileapi["source"], "database");
    assert_eq!(mobileapi["maskedValue"], "save…-123");

    let clear = Request::builder()
        .method("DELETE")
        .uri("/api/admin/settings/mobileapi_key")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, clear).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(
        &app,
        with_body("POST", "/api/admin/import/latest", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
#[serial]
async fn test_settings_reject_unknown_key_and_blank_value() {
    let app = setup().await;
    let cookie = login(&app).await;

    let (status, _) = send_json(
        &app,
        with_body("PUT", "/api/admin/settings/jwt_secret", Some(&cookie), &json!({"value": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        with_body("PUT", "/api/admin/settings/openai_api_key", Some(&cookie), &json!({"value": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_ai_endpoints_fall_back_without_key() {
    let app = setup().await;
    let cookie = login(&app).await;
    for (brand, name) in [("apple", "iPhone 15 Pro"), ("google", "Pixel 8")] {
        send_json(
            &app,
            with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload(brand, name)),
        )
        .await;
    }

    let (status, analysis) = send_json(&app, get("/api/ai/analysis/apple/iphone-15-pro", None)).await;
    assert_eq!(status, StatusCode::OK);
    let score = analysis["overallScore"].as_u64().unwrap();
    assert!((1..=10).contains(&score));

    let (status, comparison) = send_json(
        &app,
        with_body("POST", "/api/ai/compare", None, &json!({"slugs": ["iphone-15-pro", "pixel-8"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let winner = comparison["winner"].as_str().unwrap();
    assert!(winner == "iphone-15-pro" || winner == "pixel-8");

    let (status, _) = send_json(
        &app,
        with_body("POST", "/api/ai/compare", None, &json!({"slugs": ["pixel-8"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        with_body("POST", "/api/ai/compare", None, &json!({"slugs": ["pixel-8", "nokia-3310"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, insights) = send_json(&app, get("/api/ai/insights/samsung", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insights["brand"], "Samsung");

    let (status, _) = send_json(&app, get("/api/ai/analysis/apple/missing", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_admin_enhance_returns_full_shape() {
    let app = setup().await;
    let cookie = login(&app).await;
    let (_, created) = send_json(
        &app,
        with_body("POST", "/api/admin/mobiles", Some(&cookie), &mobile_payload("samsung", "Galaxy S24")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/admin/ai/enhance/{}", id))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, enhanced) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["marketingDescription", "targetAudience"] {
        assert!(!enhanced[field].as_str().unwrap().is_empty());
    }
    for field in ["keyFeatures", "pros", "cons", "seoKeywords"] {
        assert!(!enhanced[field].as_array().unwrap().is_empty());
    }
}
