//! Response helpers. Records are returned bare, without an envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
