//! Common routes: health, readiness, version, OpenAPI document.

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthBody {
    status: String,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthBody))
)]
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok".into() })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(err) = sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        tracing::warn!(error = %err, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Common routes (no state): GET /health, GET /version, GET /openapi.json.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
}

/// Common routes plus GET /ready, which checks the database.
pub fn common_routes_with_ready(state: AppState) -> Router {
    common_routes().merge(Router::new().route("/ready", get(ready)).with_state(state))
}
