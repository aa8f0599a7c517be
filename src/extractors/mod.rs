//! Request extractors whose rejections use the service's error body.

pub mod request;
pub mod session;

pub use request::{ApiPath, ApiQuery, ValidJson};
pub use session::Session;
