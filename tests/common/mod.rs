//! Shared harness for HTTP-level tests.
//!
//! Builds the same router `cinema-app` serves, over a file-backed SQLite
//! database in a temporary directory, and drives it with
//! `tower::ServiceExt::oneshot` without a TCP listener.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use cinema_db::Database;
use cinema_kernel::settings::Settings;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.database.url = format!("sqlite://{}", dir.path().join("cinema.db").display());

    let app = cinema_app::prepare(&settings).await.unwrap();
    let router = cinema_http::build_router(&app.registry, &settings, &app.db);

    TestApp {
        router,
        db: app.db,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Method::DELETE, uri, None).await
    }

    /// POST `body` to `collection`, assert 201, and return the new id from `Location`.
    pub async fn create(&self, collection: &str, body: Value) -> i64 {
        let response = self.post_json(collection, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        location_id(&response)
    }
}

pub fn location_id(response: &Response<Body>) -> i64 {
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap();
    location.rsplit('/').next().unwrap().parse().unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
