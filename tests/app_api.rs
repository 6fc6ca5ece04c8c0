//! Application-wide routes and middleware.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, spawn_app};

#[tokio::test]
async fn test_healthz() {
    let app = spawn_app().await;
    let response = app.get("/healthz").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = spawn_app().await;
    let response = app.get("/genres/").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_lists_resources() {
    let app = spawn_app().await;
    let response = app.get("/docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["paths"]["/movies/page/{page}"]["get"].is_object());
    assert!(doc["paths"]["/directors/{pk}"]["put"].is_object());
    assert!(doc["paths"]["/genres/"]["post"].is_object());
    assert!(doc["components"]["schemas"]["GenreInput"].is_object());
}

#[tokio::test]
async fn test_schema_bootstrap_is_idempotent() {
    let app = spawn_app().await;
    let tables = cinema_app::registry().unwrap().collect_tables();

    app.db.ensure_schema(&tables).await.unwrap();
    for table in ["movies", "directors", "genres"] {
        assert!(app.db.table_exists(table).await.unwrap());
    }
}
