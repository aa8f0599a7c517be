//! Per-request store session: one pooled connection and one transaction per request.
//!
//! Read handlers take it as an extractor. Handlers with a body call `Session::begin`
//! after the payload has been parsed and validated. `finish` or `release` ends it;
//! dropping it on any other path rolls the transaction back and returns the connection.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::{PgConnection, Postgres, Transaction};

pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    pub async fn begin(state: &AppState) -> Result<Self, AppError> {
        let tx = state.pool.begin().await?;
        Ok(Session { tx })
    }

    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit on `Ok`, roll back on `Err`. Constraint violations from either the
    /// statement or the commit become `Conflict(conflict_detail)`.
    pub async fn finish<T>(self, result: Result<T, sqlx::Error>, conflict_detail: &str) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                self.tx
                    .commit()
                    .await
                    .map_err(|err| AppError::from_write(err, conflict_detail))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(AppError::from_write(err, conflict_detail))
            }
        }
    }

    /// End a read-only unit of work.
    pub async fn release(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::begin(&AppState::from_ref(state)).await
    }
}
