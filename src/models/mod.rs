//! Persisted records and their request payloads.

mod course;
mod project;
mod user;

pub use course::{Course, ListParams, NewCourse};
pub use project::{NewProject, NewProjectForUser, Project, ProjectPatch, ProjectWithOwner};
pub use user::{NewUser, User, UserPatch};
