//! `/api` routes.
//! `:user_key` is the numeric user id everywhere except PUT and PATCH on `/users/:user_key`,
//! which take the student id.

use crate::handlers::{courses, projects, users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .put(projects::replace_project)
                .patch(projects::patch_project),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:user_key",
            get(users::get_user)
                .put(users::replace_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/:user_key/projects",
            get(projects::list_user_projects).post(projects::create_user_project),
        )
        .with_state(state)
}
