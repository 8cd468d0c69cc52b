use httpmock::prelude::*;
use service_catalog::core::catalog::{seed_tree, SERVICES_ERROR_MESSAGE};
use service_catalog::{find_min_tariff_price, ApiConfig, LoadOutcome, ReqwestSource, ServiceCatalog};
use std::time::Duration;

fn catalog_for(base_url: &str) -> ServiceCatalog<ReqwestSource> {
    ServiceCatalog::new(ReqwestSource::new(), &ApiConfig::new(Some(base_url)))
}

#[tokio::test]
async fn test_nested_payload_from_api() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "id": 1,
                    "slug": "massage",
                    "title": "Массаж",
                    "tariffs": [{"price": 1500}, {"price": 0}, {"price": 2000}],
                    "children": [
                        {"id": 2, "slug": "face", "title": "Лицо", "order": 2,
                         "tariffs": [{"price": 1200}]},
                        {"id": 3, "slug": "back", "title": "Спина", "order": 1}
                    ]
                },
                {"id": 4, "slug": "spa", "title": "СПА"}
            ]));
    });

    let catalog = catalog_for(&server.base_url());
    let outcome = catalog.load(false).await;

    api_mock.assert();
    assert_eq!(outcome, LoadOutcome::Live);
    assert!(catalog.is_loaded());
    assert!(!catalog.is_loading());
    assert!(catalog.error().is_empty());

    let tree = catalog.tree();
    let paths: Vec<&str> = tree.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, vec!["massage", "massage/back", "massage/face", "spa"]);

    let massage = catalog.get_service_by_path("/massage/").unwrap();
    assert_eq!(find_min_tariff_price(&massage), Some(1200.0));
    assert_eq!(
        catalog.get_service_by_segments(&["massage", "face"]).map(|s| s.title),
        Some("Лицо".to_string())
    );

    let rows = catalog.services_with_tariffs();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["massage", "massage/face"]);
    assert_eq!(rows[0].tariffs.len(), 3);
}

#[tokio::test]
async fn test_flat_payload_in_wrapper() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "count": 3,
                "data": [
                    {"id": 2, "slug": "face", "parent": 1},
                    {"id": 1, "slug": "massage"},
                    {"id": 3, "slug": "lift", "parent": "face"}
                ]
            }));
    });

    let catalog = catalog_for(&server.base_url());
    assert_eq!(catalog.load(false).await, LoadOutcome::Live);

    api_mock.assert();
    let tree = catalog.tree();
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.roots()[0].path, "massage");
    let lift = tree.get("massage/face/lift").unwrap();
    assert_eq!(lift.parent_slug.as_deref(), Some("face"));
}

#[tokio::test]
async fn test_server_error_falls_back_to_seed() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(500);
    });

    let catalog = catalog_for(&server.base_url());
    let outcome = catalog.load(false).await;

    api_mock.assert();
    assert_eq!(outcome, LoadOutcome::Seed);
    assert!(catalog.is_loaded());
    assert_eq!(catalog.error(), SERVICES_ERROR_MESSAGE);
    assert_eq!(catalog.tree().roots(), seed_tree().as_slice());
}

#[tokio::test]
async fn test_unreachable_api_falls_back_to_seed() {
    let catalog = catalog_for("http://127.0.0.1:1");
    let outcome = catalog.load(false).await;

    assert_eq!(outcome, LoadOutcome::Seed);
    assert!(catalog.is_loaded());
    assert!(!catalog.is_loading());
    assert_eq!(catalog.error(), SERVICES_ERROR_MESSAGE);
    assert_eq!(catalog.tree().roots(), seed_tree().as_slice());
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_seed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200).body("not json at all");
    });

    let catalog = catalog_for(&server.base_url());
    assert_eq!(catalog.load(false).await, LoadOutcome::Seed);
    assert!(catalog.get_service_by_path("massage/face").is_some());
}

#[tokio::test]
async fn test_empty_list_falls_back_to_seed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": []}));
    });

    let catalog = catalog_for(&server.base_url());
    assert_eq!(catalog.load(false).await, LoadOutcome::Seed);
    assert_eq!(catalog.tree().roots(), seed_tree().as_slice());
}

#[tokio::test]
async fn test_back_to_back_loads_issue_one_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .delay(Duration::from_millis(200))
            .json_body(serde_json::json!([{"id": 1, "slug": "massage"}]));
    });

    let catalog = catalog_for(&server.base_url());
    let (first, second) = tokio::join!(catalog.load(false), catalog.load(false));

    api_mock.assert_hits(1);
    assert_eq!(first, LoadOutcome::Live);
    assert_eq!(second, LoadOutcome::Skipped);
    assert!(!catalog.is_loading());
}

#[tokio::test]
async fn test_force_reload_replaces_tree() {
    let server = MockServer::start();
    let mut first_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"id": 1, "slug": "old"}]));
    });

    let catalog = catalog_for(&server.base_url());
    catalog.load(false).await;
    assert!(catalog.get_service_by_path("old").is_some());

    assert_eq!(catalog.load(false).await, LoadOutcome::Skipped);
    first_mock.assert_hits(1);
    first_mock.delete();

    server.mock(|when, then| {
        when.method(GET).path("/api/services/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"id": 2, "slug": "new"}]));
    });

    assert_eq!(catalog.load(true).await, LoadOutcome::Live);
    assert!(catalog.get_service_by_path("old").is_none());
    assert!(catalog.get_service_by_path("new").is_some());
}
