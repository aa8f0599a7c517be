use crate::error::AppError;
use crate::service::{RequestValidator, Validate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub student_id: String,
}

/// Body of `POST /api/users` and `PUT /api/users/{student_id}`: every field required.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub student_id: String,
}

/// Body of `PATCH /api/users/{student_id}`.
///
/// An omitted field and an explicit `null` are treated the same: the stored value is kept.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub student_id: Option<String>,
}

impl NewUser {
    /// Full replace: every stored field takes the payload's value.
    pub fn overwrite(self, user: &mut User) {
        user.name = self.name;
        user.email = self.email;
        user.age = self.age;
        user.student_id = self.student_id;
    }
}

impl UserPatch {
    /// Apply only the supplied fields.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(student_id) = self.student_id {
            user.student_id = student_id;
        }
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("name", &self.name, 1, Some(NAME_MAX_LENGTH))?;
        RequestValidator::email("email", &self.email)?;
        RequestValidator::minimum("age", self.age, 0)?;
        RequestValidator::text("student_id", &self.student_id, 1, None)
    }
}

impl Validate for UserPatch {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            RequestValidator::text("name", name, 1, Some(NAME_MAX_LENGTH))?;
        }
        if let Some(email) = &self.email {
            RequestValidator::email("email", email)?;
        }
        if let Some(age) = self.age {
            RequestValidator::minimum("age", age, 0)?;
        }
        if let Some(student_id) = &self.student_id {
            RequestValidator::text("student_id", student_id, 1, None)?;
        }
        Ok(())
    }
}
