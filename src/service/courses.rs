use crate::models::{Course, ListParams, NewCourse};
use sqlx::PgConnection;

const COURSE_COLUMNS: &str = "id, code, name, credits";

pub struct CourseService;

impl CourseService {
    /// One page of courses in ascending id order.
    pub async fn list(conn: &mut PgConnection, params: ListParams) -> Result<Vec<Course>, sqlx::Error> {
        let (limit, offset) = params.bounds();
        let sql = format!("SELECT {} FROM courses ORDER BY id LIMIT $1 OFFSET $2", COURSE_COLUMNS);
        tracing::debug!(sql = %sql, limit, offset, "query");
        sqlx::query_as(&sql).bind(limit).bind(offset).fetch_all(conn).await
    }

    pub async fn insert(conn: &mut PgConnection, course: &NewCourse) -> Result<Course, sqlx::Error> {
        let sql = format!(
            "INSERT INTO courses (code, name, credits) VALUES ($1, $2, $3) RETURNING {}",
            COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&course.code)
            .bind(&course.name)
            .bind(course.credits)
            .fetch_one(conn)
            .await
    }
}
