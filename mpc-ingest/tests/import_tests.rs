//! Import orchestrator tests against mocked vendor APIs

use mockito::{Matcher, Mock, ServerGuard};
use mpc_common::db::init::init_memory_database;
use mpc_common::db::{brands, catalog_stats, mobiles};
use mpc_ingest::sources::{MobileApiClient, RapidApiClient};
use mpc_ingest::{ImportOptions, ImportService, PhoneSource};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const APPLE_MODELS: [&str; 5] = [
    "iPhone 15",
    "iPhone 15 Plus",
    "iPhone 15 Pro",
    "iPhone 15 Pro Max",
    "iPhone SE (2022)",
];

fn fast_options(update_existing: bool) -> ImportOptions {
    ImportOptions {
        request_delay: Duration::ZERO,
        update_existing,
    }
}

/// Path matcher tolerant of either raw or percent-encoded spaces
fn path_for(brand: &str, model: &str) -> Matcher {
    let pattern = format!(
        "^/get-specifications-by-brandname-modelname/{}/{}$",
        regex::escape(brand),
        regex::escape(model).replace(' ', "(?:%20| )")
    );
    Matcher::Regex(pattern)
}

async fn mock_apple_catalog(server: &mut ServerGuard, failing_model: Option<&str>) -> Vec<Mock> {
    let mut mocks = Vec::new();

    mocks.push(
        server
            .mock("GET", "/all-brands")
            .match_header("X-RapidAPI-Key", "test-key")
            .match_header("X-RapidAPI-Host", "specs.test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"brandId": 48, "brandValue": "Apple"},
                    {"brandId": 9, "brandValue": "Samsung"}
                ])
                .to_string(),
            )
            .expect_at_least(1)
            .create_async()
            .await,
    );

    let models: Vec<_> = APPLE_MODELS
        .iter()
        .enumerate()
        .map(|(i, m)| json!({"modelId": i, "modelValue": m}))
        .collect();
    mocks.push(
        server
            .mock("GET", "/get-models-by-brandname/Apple")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!(models).to_string())
            .create_async()
            .await,
    );

    for model in APPLE_MODELS {
        let mock = server.mock("GET", path_for("Apple", model));
        let mock = if Some(model) == failing_model {
            mock.with_status(500).with_body("upstream exploded")
        } else {
            mock.with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "brand": "Apple",
                        "name": model,
                        "img": format!("https://cdn.test/{}.jpg", model.replace(' ', "-")),
                        "released": "Released 2023, September 22",
                        "quickSpec": [
                            {"name": "Storage", "value": "128GB 6GB RAM"},
                            {"name": "Camera pixels", "value": "48 MP"},
                            {"name": "Battery size", "value": "3349 mAh"}
                        ]
                    })
                    .to_string(),
                )
        };
        mocks.push(mock.create_async().await);
    }

    mocks
}

fn rapidapi_source(server: &ServerGuard) -> Arc<dyn PhoneSource> {
    Arc::new(RapidApiClient::new("test-key", "specs.test", &server.url()).unwrap())
}

#[tokio::test]
async fn test_brand_import_twice_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_apple_catalog(&mut server, None).await;
    let db = init_memory_database().await.unwrap();

    let service = ImportService::new(db.clone(), rapidapi_source(&server), fast_options(false)).with_seed(1);

    let first = service.import_mobiles_by_brand("apple", 5).await;
    assert_eq!(first.success, 5, "errors: {:?}", first.errors);
    assert_eq!(first.existing, 0);
    assert_eq!(first.processed, 5);
    assert!(first.errors.is_empty());

    let second = service.import_mobiles_by_brand("Apple", 5).await;
    assert_eq!(second.success, 0);
    assert_eq!(second.existing, 5);
    assert_eq!(second.updated, 0);

    let stats = catalog_stats(&db).await.unwrap();
    assert_eq!(stats.mobiles, 5);
    assert_eq!(stats.brands, 1);

    let apple = brands::get_brand_by_slug(&db, "apple").await.unwrap().unwrap();
    assert_eq!(apple.phone_count, "5");

    let mobile = mobiles::get_mobile_by_brand_and_slug(&db, "apple", "apple-iphone-15-pro")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mobile.short_specs.ram, "6GB");
    assert_eq!(mobile.short_specs.storage, "128GB");
    assert_eq!(mobile.release_date, "September 2023");
    assert_eq!(mobile.image_url, "https://cdn.test/iPhone-15-Pro.jpg");
}

#[tokio::test]
async fn test_update_existing_overwrites_rows() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_apple_catalog(&mut server, None).await;
    let db = init_memory_database().await.unwrap();

    ImportService::new(db.clone(), rapidapi_source(&server), fast_options(false))
        .import_mobiles_by_brand("Apple", 5)
        .await;

    let result = ImportService::new(db.clone(), rapidapi_source(&server), fast_options(true))
        .import_mobiles_by_brand("Apple", 5)
        .await;
    assert_eq!(result.success, 0);
    assert_eq!(result.existing, 5);
    assert_eq!(result.updated, 5);
    assert_eq!(catalog_stats(&db).await.unwrap().mobiles, 5);
}

#[tokio::test]
async fn test_unknown_brand_aborts_pass() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_apple_catalog(&mut server, None).await;
    let db = init_memory_database().await.unwrap();

    let result = ImportService::new(db.clone(), rapidapi_source(&server), fast_options(false))
        .import_mobiles_by_brand("Nokia", 5)
        .await;

    assert_eq!(result.processed, 0);
    assert_eq!(result.success, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("Nokia"), "{}", result.errors[0]);
    assert_eq!(catalog_stats(&db).await.unwrap().brands, 0);
}

#[tokio::test]
async fn test_item_failure_is_recorded_and_loop_continues() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_apple_catalog(&mut server, Some("iPhone 15 Pro")).await;
    let db = init_memory_database().await.unwrap();

    let result = ImportService::new(db.clone(), rapidapi_source(&server), fast_options(false))
        .import_mobiles_by_brand("Apple", 5)
        .await;

    assert_eq!(result.processed, 5);
    assert_eq!(result.success, 4);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Apple iPhone 15 Pro:"), "{}", result.errors[0]);
    assert!(result.errors[0].contains("500"));
}

#[tokio::test]
async fn test_limit_caps_processed_items() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_apple_catalog(&mut server, None).await;
    let db = init_memory_database().await.unwrap();

    let result = ImportService::new(db.clone(), rapidapi_source(&server), fast_options(false))
        .import_mobiles_by_brand("Apple", 2)
        .await;
    assert_eq!(result.processed, 2);
    assert_eq!(catalog_stats(&db).await.unwrap().mobiles, 2);
}

#[tokio::test]
async fn test_latest_listing_failure_returns_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;
    let db = init_memory_database().await.unwrap();

    let result = ImportService::new(db, rapidapi_source(&server), fast_options(false))
        .import_latest_mobiles(10)
        .await;
    assert_eq!(result.processed, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("429"));
}

#[tokio::test]
async fn test_mobileapi_search_import_uses_preloaded_records() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/devices/search/")
        .match_header("Authorization", "Token mobile-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "pixel".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "devices": [
                    {
                        "id": 1,
                        "name": "Pixel 8",
                        "manufacturer_name": "Google",
                        "release_date": "2023-10-04",
                        "ram": "8 GB",
                        "storage": "128 GB",
                        "main_camera": "50 MP",
                        "battery_capacity": "4575"
                    },
                    {
                        "id": 2,
                        "name": "Pixel 8 Pro",
                        "manufacturer_name": "Google",
                        "ram": "12 GB",
                        "storage": "256 GB",
                        "main_camera": "50 MP"
                    }
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let db = init_memory_database().await.unwrap();
    let source: Arc<dyn PhoneSource> = Arc::new(MobileApiClient::new("mobile-key", &server.url()).unwrap());
    let result = ImportService::new(db.clone(), source, fast_options(false))
        .with_seed(9)
        .search_and_import_mobiles("pixel", 5)
        .await;

    assert_eq!(result.success, 2, "errors: {:?}", result.errors);
    mock.assert_async().await;

    let google = brands::get_brand_by_slug(&db, "google").await.unwrap().unwrap();
    assert_eq!(google.phone_count, "2");
    let pro = mobiles::get_mobile_by_slug(&db, "google-pixel-8-pro").await.unwrap().unwrap();
    assert_eq!(pro.release_date, "TBA");
    assert_eq!(pro.price.as_deref(), Some("$799"));
}

async fn mock_mobileapi_search(server: &mut ServerGuard, query: &str, devices: serde_json::Value) -> Mock {
    server
        .mock("GET", "/devices/search/")
        .match_query(Matcher::UrlEncoded("name".into(), query.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "devices": devices }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_records_without_usable_slug_are_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_mobileapi_search(
        &mut server,
        "xiaomi",
        json!([
            {"id": 1, "name": "红米", "manufacturer_name": "小米"},
            {"id": 2, "name": "小米手机", "manufacturer_name": "小米"},
            {"id": 3, "name": "Redmi Note 13", "manufacturer_name": "Xiaomi", "ram": "8 GB"}
        ]),
    )
    .await;

    let db = init_memory_database().await.unwrap();
    let source: Arc<dyn PhoneSource> = Arc::new(MobileApiClient::new("mobile-key", &server.url()).unwrap());
    let result = ImportService::new(db.clone(), source, fast_options(false))
        .with_seed(3)
        .search_and_import_mobiles("xiaomi", 5)
        .await;

    assert_eq!(result.processed, 3);
    assert_eq!(result.success, 1);
    assert_eq!(result.existing, 0);
    assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    assert!(result.errors.iter().all(|e| e.contains("No usable slug")), "{:?}", result.errors);

    assert!(mobiles::get_mobile_by_slug(&db, "").await.unwrap().is_none());
    assert!(brands::get_brand_by_slug(&db, "").await.unwrap().is_none());
    assert!(mobiles::get_mobile_by_slug(&db, "xiaomi-redmi-note-13")
        .await
        .unwrap()
        .is_some());
    assert_eq!(catalog_stats(&db).await.unwrap().brands, 1);
}

#[tokio::test]
async fn test_preloaded_records_skip_request_delay() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_mobileapi_search(
        &mut server,
        "galaxy",
        json!([
            {"id": 1, "name": "Galaxy S24", "manufacturer_name": "Samsung"},
            {"id": 2, "name": "Galaxy S24 Ultra", "manufacturer_name": "Samsung"}
        ]),
    )
    .await;

    let db = init_memory_database().await.unwrap();
    let source: Arc<dyn PhoneSource> = Arc::new(MobileApiClient::new("mobile-key", &server.url()).unwrap());
    let options = ImportOptions {
        request_delay: Duration::from_secs(30),
        update_existing: false,
    };
    let service = ImportService::new(db, source, options);

    let result = tokio::time::timeout(Duration::from_secs(10), service.search_and_import_mobiles("galaxy", 5))
        .await
        .expect("preloaded import should not sleep");
    assert_eq!(result.success, 2, "errors: {:?}", result.errors);
}
