use crate::error::AppError;
use crate::service::{RequestValidator, Validate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub credits: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: i32,
}

impl Validate for NewCourse {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("code", &self.code, 1, None)?;
        RequestValidator::text("name", &self.name, 1, None)?;
        RequestValidator::minimum("credits", self.credits, 0)
    }
}

/// Query string of `GET /api/courses`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page size, default 10, at most 1000.
    pub limit: Option<u32>,
    /// Rows to skip, default 0.
    pub offset: Option<u32>,
}

impl ListParams {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 1000;

    /// `(limit, offset)` ready to bind.
    pub fn bounds(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT);
        (i64::from(limit), i64::from(self.offset.unwrap_or(0)))
    }
}
