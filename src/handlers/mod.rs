//! HTTP handlers for users, projects, courses.

pub mod courses;
pub mod projects;
pub mod users;
