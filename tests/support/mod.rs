//! Shared harness: builds the real router and drives it with `oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use entity_store::{app, connect, ensure_schema, AppState, Settings};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

/// Send one request through `router` and decode the JSON reply (`Null` when the body is empty).
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Router over a pool that can never connect. Routes that touch the store fail fast.
pub fn offline_router(body_limit: usize) -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(300))
        .connect_lazy("postgres://nobody@127.0.0.1:1/nothing")
        .unwrap();
    app(AppState::new(pool), body_limit)
}

/// Router over a fresh schema in `TEST_DATABASE_URL`. Each test gets its own tables.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    schema: String,
}

impl TestApp {
    /// `None` when `TEST_DATABASE_URL` is unset; callers return early.
    pub async fn spawn() -> Option<TestApp> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };
        let schema = format!("t_{}", uuid::Uuid::new_v4().simple());
        let settings = Settings::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "DATABASE_SCHEMA" => Some(schema.clone()),
            "DATABASE_MAX_CONNECTIONS" => Some("4".into()),
            _ => None,
        })
        .unwrap();
        let pool = connect(&settings).await.unwrap();
        ensure_schema(&pool, Some(&schema)).await.unwrap();
        let router = app(AppState::new(pool.clone()), BODY_LIMIT);
        Some(TestApp { router, pool, schema })
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri, None).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap();
        n
    }

    pub async fn cleanup(self) {
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .unwrap();
        self.pool.close().await;
    }
}
