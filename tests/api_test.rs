mod common;

use std::sync::Arc;

use activities_api::lifecycle::{ActivitySystem, Environment, Settings};
use activities_api::persistence::{MemoryContext, SqliteContext};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{dev_settings, send};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

fn memory_app() -> (ActivitySystem, Router) {
    let system = ActivitySystem::new(Arc::new(MemoryContext::new()), 16);
    let app = system.router(&dev_settings());
    (system, app)
}

/// The full create / read / edit / delete walk-through against SQLite.
#[tokio::test]
async fn test_activity_scenario_against_sqlite() {
    let context = SqliteContext::connect("sqlite::memory:", 1).await.unwrap();
    let mut system = ActivitySystem::new(Arc::new(context), 16);
    let report = system.initialize().await;
    assert!(report.migrated);
    let app = system.router(&dev_settings());

    let id = Uuid::new_v4();
    let uri = format!("/api/activities/{id}");

    let (status, body) = send(&app, Method::POST, "/api/activities", Some(json!({ "id": id, "title": "Run" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "title": "Run" }));

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "id": "ignored", "title": "Run 5k" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "title": "Run 5k" }));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_put_uses_route_id_over_body_id() {
    let (_system, app) = memory_app();
    let id = Uuid::new_v4();
    let other = Uuid::new_v4();

    send(&app, Method::POST, "/api/activities", Some(json!({ "id": id, "title": "Run" }))).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/activities/{id}"),
        Some(json!({ "id": other, "title": "Swim", "city": "Paris" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("/api/activities/{id}"), None).await;
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["title"], "Swim");
    assert_eq!(body["city"], "Paris");

    let (status, _) = send(&app, Method::GET, &format!("/api/activities/{other}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_create_conflicts_and_keeps_original() {
    let (_system, app) = memory_app();
    let id = Uuid::new_v4();

    let (status, _) = send(&app, Method::POST, "/api/activities", Some(json!({ "id": id, "title": "Run" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/activities", Some(json!({ "id": id, "title": "Walk" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (_, body) = send(&app, Method::GET, &format!("/api/activities/{id}"), None).await;
    assert_eq!(body["title"], "Run");
}

#[tokio::test]
async fn test_list_counts_every_record_once() {
    let (_system, app) = memory_app();

    let (_, body) = send(&app, Method::GET, "/api/activities", None).await;
    assert_eq!(body, json!([]));

    for title in ["Run", "Swim", "Ride"] {
        let (status, _) = send(&app, Method::POST, "/api/activities", Some(json!({ "title": title }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/api/activities", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let mut ids: Vec<&str> = items.iter().map(|a| a["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_edit_and_delete_of_missing_record_are_not_found() {
    let (_system, app) = memory_app();
    let uri = format!("/api/activities/{}", Uuid::new_v4());

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "title": "Run" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let (_system, app) = memory_app();

    let (status, body) = send(&app, Method::GET, "/api/activities/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, _) = send(&app, Method::POST, "/api/activities", Some(json!({ "city": "London" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/activities", Some(json!({ "title": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/activities", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_openapi_document_only_in_development() {
    let system = ActivitySystem::new(Arc::new(MemoryContext::new()), 16);

    let dev = system.router(&dev_settings());
    let (status, body) = send(&dev, Method::GET, "/swagger/v1/swagger.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/activities").is_some());
    assert!(body["paths"].get("/api/activities/{id}").is_some());

    let prod = system.router(&Settings {
        environment: Environment::Production,
        ..Settings::default()
    });
    let (status, _) = send(&prod, Method::GET, "/swagger/v1/swagger.json", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let (_system, app) = memory_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/activities")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_unparseable_json_body_is_a_bad_request() {
    let (_system, app) = memory_app();

    for (method, uri) in [
        (Method::POST, "/api/activities".to_string()),
        (Method::PUT, format!("/api/activities/{}", Uuid::new_v4())),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "Run","#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "validation");
    }

    let (_, body) = send(&app, Method::GET, "/api/activities", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_cors_ignores_other_origins() {
    let (_system, app) = memory_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/activities")
        .header("origin", "http://evil.example")
        .header("access-control-request-method", "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());

    let request = Request::builder()
        .uri("/api/activities")
        .header("origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[cfg(feature = "swagger-ui")]
#[tokio::test]
async fn test_swagger_ui_only_in_development() {
    let system = ActivitySystem::new(Arc::new(MemoryContext::new()), 16);

    let get_ui = |app: Router| async move {
        let request = Request::builder()
            .uri("/swagger/")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    };

    assert_eq!(get_ui(system.router(&dev_settings())).await, StatusCode::OK);

    let prod = system.router(&Settings {
        environment: Environment::Production,
        ..Settings::default()
    });
    assert_eq!(get_ui(prod).await, StatusCode::NOT_FOUND);
}
