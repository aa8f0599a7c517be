//! Store operations per entity. Each function runs on the caller's connection,
//! so every statement belongs to the request's transaction.

mod courses;
mod projects;
mod users;
mod validation;
pub use courses::CourseService;
pub use projects::ProjectService;
pub use users::UserService;
pub use validation::{RequestValidator, Validate};
