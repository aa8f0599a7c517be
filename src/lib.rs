//! Entity store: REST backend for users, the projects they own, and courses, on PostgreSQL.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, ErrorBody};
pub use extractors::Session;
pub use openapi::ApiDoc;
pub use routes::{api_routes, app, common_routes, common_routes_with_ready};
pub use service::{CourseService, ProjectService, UserService};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_schema};
