//! User handlers. Reads and deletes address users by numeric id; PUT and PATCH by `student_id`.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiPath, Session, ValidJson};
use crate::models::{NewUser, User, UserPatch};
use crate::response::{created, ok};
use crate::service::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

const USER_CONFLICT: &str = "User already exists";

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All users by ascending id", body = Vec<User>))
)]
pub async fn list_users(mut session: Session) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list(session.conn()).await?;
    session.release().await?;
    Ok(ok(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn get_user(
    ApiPath(user_id): ApiPath<i32>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get(session.conn(), user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    session.release().await?;
    Ok(ok(user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 409, description = "Email or student id taken", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let result = UserService::insert(session.conn(), &payload).await;
    let user = session.finish(result, USER_CONFLICT).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok(created(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{student_id}",
    tag = "users",
    params(("student_id" = String, Path, description = "Current student id")),
    request_body = NewUser,
    responses(
        (status = 200, description = "Replaced", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "Email or student id taken", body = ErrorBody),
    )
)]
pub async fn replace_user(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<String>,
    ValidJson(payload): ValidJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let mut user = UserService::find_by_student_id(session.conn(), &student_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    payload.overwrite(&mut user);
    let result = UserService::save(session.conn(), &user).await;
    let user = session.finish(result, USER_CONFLICT).await?;
    tracing::info!(user_id = user.id, "user replaced");
    Ok(ok(user))
}

#[utoipa::path(
    patch,
    path = "/api/users/{student_id}",
    tag = "users",
    params(("student_id" = String, Path, description = "Current student id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "Email or student id taken", body = ErrorBody),
    )
)]
pub async fn patch_user(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<String>,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let mut user = UserService::find_by_student_id(session.conn(), &student_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    patch.apply(&mut user);
    let result = UserService::save(session.conn(), &user).await;
    let user = session.finish(result, USER_CONFLICT).await?;
    tracing::info!(user_id = user.id, "user updated");
    Ok(ok(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted along with the user's projects"),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn delete_user(
    ApiPath(user_id): ApiPath<i32>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    UserService::get(session.conn(), user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let result = UserService::delete(session.conn(), user_id).await;
    session.finish(result, "User could not be deleted").await?;
    tracing::info!(user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
