use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiQuery, Session, ValidJson};
use crate::models::{Course, ListParams, NewCourse};
use crate::response::{created, ok};
use crate::service::CourseService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "courses",
    request_body = NewCourse,
    responses(
        (status = 201, description = "Created", body = Course),
        (status = 409, description = "Course code taken", body = ErrorBody),
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewCourse>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = Session::begin(&state).await?;
    let result = CourseService::insert(session.conn(), &payload).await;
    let course = session.finish(result, "Course already exists").await?;
    tracing::info!(course_id = course.id, code = %course.code, "course created");
    Ok(created(course))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    params(ListParams),
    responses(
        (status = 200, description = "One page of courses by ascending id", body = Vec<Course>),
        (status = 422, description = "Malformed limit or offset", body = ErrorBody),
    )
)]
pub async fn list_courses(
    ApiQuery(params): ApiQuery<ListParams>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let courses = CourseService::list(session.conn(), params).await?;
    session.release().await?;
    Ok(ok(courses))
}
