use crate::models::{NewProject, Project};
use sqlx::PgConnection;

const PROJECT_COLUMNS: &str = "project_id, name, description, owner_id";

pub struct ProjectService;

impl ProjectService {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Project>, sqlx::Error> {
        let sql = format!("SELECT {} FROM projects ORDER BY project_id", PROJECT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(conn).await
    }

    /// Projects whose `owner_id` matches. The owner itself is not checked.
    pub async fn list_for_owner(conn: &mut PgConnection, owner_id: i32) -> Result<Vec<Project>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM projects WHERE owner_id = $1 ORDER BY project_id",
            PROJECT_COLUMNS
        );
        tracing::debug!(sql = %sql, owner_id, "query");
        sqlx::query_as(&sql).bind(owner_id).fetch_all(conn).await
    }

    pub async fn get(conn: &mut PgConnection, project_id: i32) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!("SELECT {} FROM projects WHERE project_id = $1", PROJECT_COLUMNS);
        tracing::debug!(sql = %sql, project_id, "query");
        sqlx::query_as(&sql).bind(project_id).fetch_optional(conn).await
    }

    pub async fn insert(conn: &mut PgConnection, project: &NewProject) -> Result<Project, sqlx::Error> {
        let sql = format!(
            "INSERT INTO projects (name, description, owner_id) VALUES ($1, $2, $3) RETURNING {}",
            PROJECT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.owner_id)
            .fetch_one(conn)
            .await
    }

    pub async fn save(conn: &mut PgConnection, project: &Project) -> Result<Project, sqlx::Error> {
        let sql = format!(
            "UPDATE projects SET name = $2, description = $3, owner_id = $4 WHERE project_id = $1 RETURNING {}",
            PROJECT_COLUMNS
        );
        tracing::debug!(sql = %sql, project_id = project.project_id, "query");
        sqlx::query_as(&sql)
            .bind(project.project_id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.owner_id)
            .fetch_one(conn)
            .await
    }
}
