//! Router assembly.

mod api;
pub mod common;

pub use api::api_routes;
pub use common::{common_routes, common_routes_with_ready};

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full application: common routes, `/api` routes, and the shared layers
/// (request tracing, permissive CORS, body size limit).
///
/// The body limit is enforced by the JSON extractor, so an oversized body is a
/// 413 with a `detail` message whether or not `Content-Length` is sent.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", api_routes(state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Not Found".into())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
