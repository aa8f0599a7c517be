//! Project handlers, including the nested `/api/users/{user_id}/projects` routes.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiPath, Session, ValidJson};
use crate::models::{NewProject, NewProjectForUser, Project, ProjectPatch, ProjectWithOwner};
use crate::response::{created, ok};
use crate::service::{ProjectService, UserService};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

const CREATE_CONFLICT: &str = "Project creation failed";
const UPDATE_CONFLICT: &str = "Project already exists or owner invalid";

/// Insert after confirming the owner exists. The check and the insert share one transaction.
async fn create_owned(state: &AppState, payload: NewProject) -> Result<Project, AppError> {
    let mut session = Session::begin(state).await?;
    UserService::get(session.conn(), payload.owner_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let result = ProjectService::insert(session.conn(), &payload).await;
    let project = session.finish(result, CREATE_CONFLICT).await?;
    tracing::info!(project_id = project.project_id, owner_id = project.owner_id, "project created");
    Ok(project)
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Created", body = Project),
        (status = 404, description = "Owner does not exist", body = ErrorBody),
        (status = 409, description = "Integrity violation", body = ErrorBody),
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewProject>,
) -> Result<impl IntoResponse, AppError> {
    let project = create_owned(&state, payload).await?;
    Ok(created(project))
}

#[utoipa::path(
    put,
    path = "/api/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = NewProject,
    responses(
        (status = 200, description = "Replaced", body = Project),
        (status = 404, description = "No such project", body = ErrorBody),
        (status = 409, description = "Owner invalid or integrity violation", body = ErrorBody),
    )
)]
pub async fn replace_project(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i32>,
    ValidJson(payload): ValidJson<NewProject>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let mut project = ProjectService::get(session.conn(), project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project"))?;
    payload.overwrite(&mut project);
    let result = ProjectService::save(session.conn(), &project).await;
    let project = session.finish(result, UPDATE_CONFLICT).await?;
    tracing::info!(project_id, "project replaced");
    Ok(ok(project))
}

#[utoipa::path(
    patch,
    path = "/api/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Updated", body = Project),
        (status = 404, description = "No such project", body = ErrorBody),
        (status = 409, description = "Owner invalid or integrity violation", body = ErrorBody),
    )
)]
pub async fn patch_project(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i32>,
    ValidJson(patch): ValidJson<ProjectPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let mut project = ProjectService::get(session.conn(), project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project"))?;
    patch.apply(&mut project);
    let result = ProjectService::save(session.conn(), &project).await;
    let project = session.finish(result, UPDATE_CONFLICT).await?;
    tracing::info!(project_id, "project updated");
    Ok(ok(project))
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    responses((status = 200, description = "All projects by ascending id", body = Vec<Project>))
)]
pub async fn list_projects(mut session: Session) -> Result<impl IntoResponse, AppError> {
    let projects = ProjectService::list(session.conn()).await?;
    session.release().await?;
    Ok(ok(projects))
}

#[utoipa::path(
    get,
    path = "/api/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with its owner", body = ProjectWithOwner),
        (status = 404, description = "No such project", body = ErrorBody),
    )
)]
pub async fn get_project(
    ApiPath(project_id): ApiPath<i32>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let project = ProjectService::get(session.conn(), project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project"))?;
    // The foreign key guarantees the owner row while the transaction is open.
    let owner = UserService::get(session.conn(), project.owner_id)
        .await?
        .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
    session.release().await?;
    Ok(ok(ProjectWithOwner { project, owner }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/projects",
    tag = "projects",
    params(("user_id" = i32, Path, description = "Owner id, used only as a filter")),
    responses((status = 200, description = "Projects owned by the user, possibly none", body = Vec<Project>))
)]
pub async fn list_user_projects(
    ApiPath(user_id): ApiPath<i32>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let projects = ProjectService::list_for_owner(session.conn(), user_id).await?;
    session.release().await?;
    Ok(ok(projects))
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/projects",
    tag = "projects",
    params(("user_id" = i32, Path, description = "Owner id")),
    request_body = NewProjectForUser,
    responses(
        (status = 201, description = "Created", body = Project),
        (status = 404, description = "Owner does not exist", body = ErrorBody),
        (status = 409, description = "Integrity violation", body = ErrorBody),
    )
)]
pub async fn create_user_project(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ValidJson(payload): ValidJson<NewProjectForUser>,
) -> Result<impl IntoResponse, AppError> {
    let project = create_owned(&state, payload.owned_by(user_id)).await?;
    Ok(created(project))
}
