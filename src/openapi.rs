//! OpenAPI document served at `/openapi.json`.

use crate::error::ErrorBody;
use crate::handlers::{courses, projects, users};
use crate::routes;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::common::health,
        courses::create_course,
        courses::list_courses,
        projects::create_project,
        projects::replace_project,
        projects::patch_project,
        projects::list_projects,
        projects::get_project,
        projects::list_user_projects,
        projects::create_user_project,
        users::list_users,
        users::get_user,
        users::create_user,
        users::replace_user,
        users::patch_user,
        users::delete_user,
    ),
    components(schemas(ErrorBody)),
    tags(
        (name = "users", description = "Students; deleting one removes their projects"),
        (name = "projects", description = "Projects owned by a user"),
        (name = "courses", description = "Course catalogue"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
