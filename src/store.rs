//! Database bootstrap: create the database if missing, build the pool, and create the tables.
//! Tables are created with `IF NOT EXISTS`; there is no migration versioning.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, Executor, PgPool};
use std::str::FromStr;

/// Ordered so that `projects` is created after the `users` table it references.
const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        age INTEGER NOT NULL,
        student_id TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        project_id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        owner_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_projects_owner_id ON projects (owner_id)",
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id SERIAL PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        credits INTEGER NOT NULL
    )
    "#,
];

/// Build the connection pool. With a configured schema, every new connection gets it as `search_path`.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let mut options = PgPoolOptions::new().max_connections(settings.max_connections);
    if let Some(schema) = settings.database_schema.clone() {
        options = options.after_connect(move |conn, _meta| {
            let sql = format!("SET search_path TO {}", quote_ident(&schema));
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        });
    }
    let pool = options.connect(&settings.database_url).await?;
    Ok(pool)
}

/// Create the schema (when configured) and the three tables if absent.
pub async fn ensure_schema(pool: &PgPool, schema: Option<&str>) -> Result<(), AppError> {
    if let Some(schema) = schema {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
            .execute(pool)
            .await?;
    }
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(schema = schema.unwrap_or("default"), "tables ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// `(admin_url, db_name)`. A URL with no path after the authority yields an empty name.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let authority = url.get(authority_start..).unwrap_or("");
    let Some(slash) = authority.find('/') else {
        return (url.to_string(), String::new());
    };
    let path_start = authority_start + slash + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    (format!("{}postgres{}", base, query), db_name.to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
