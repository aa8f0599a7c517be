use crate::models::{NewUser, User};
use sqlx::PgConnection;

const USER_COLUMNS: &str = "id, name, email, age, student_id";

pub struct UserService;

impl UserService {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(conn).await
    }

    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(conn).await
    }

    pub async fn find_by_student_id(conn: &mut PgConnection, student_id: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE student_id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, student_id, "query");
        sqlx::query_as(&sql).bind(student_id).fetch_optional(conn).await
    }

    pub async fn insert(conn: &mut PgConnection, user: &NewUser) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (name, email, age, student_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.age)
            .bind(&user.student_id)
            .fetch_one(conn)
            .await
    }

    /// Write every column of `user` to the row with its id.
    pub async fn save(conn: &mut PgConnection, user: &User) -> Result<User, sqlx::Error> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, age = $4, student_id = $5 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = user.id, "query");
        sqlx::query_as(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.age)
            .bind(&user.student_id)
            .fetch_one(conn)
            .await
    }

    /// Delete by id. Owned projects go with it through the `ON DELETE CASCADE` key.
    pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<u64, sqlx::Error> {
        tracing::debug!(id, "delete user");
        let done = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(conn).await?;
        Ok(done.rows_affected())
    }
}
