use crate::error::AppError;
use crate::models::User;
use crate::service::{RequestValidator, Validate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub project_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Project with its owner embedded, returned by `GET /api/projects/{project_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: Project,
    pub owner: User,
}

/// Body of `POST /api/projects` and `PUT /api/projects/{project_id}`.
///
/// `description` may be omitted or `null`; on PUT that clears the stored value.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Body of `POST /api/users/{user_id}/projects`; the owner comes from the path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProjectForUser {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /api/projects/{project_id}`.
///
/// `null` and omission both mean "keep", so a description cannot be cleared through PATCH.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i32>,
}

impl NewProject {
    pub fn overwrite(self, project: &mut Project) {
        project.name = self.name;
        project.description = self.description;
        project.owner_id = self.owner_id;
    }
}

impl NewProjectForUser {
    pub fn owned_by(self, owner_id: i32) -> NewProject {
        NewProject {
            name: self.name,
            description: self.description,
            owner_id,
        }
    }
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
        if let Some(owner_id) = self.owner_id {
            project.owner_id = owner_id;
        }
    }
}

impl Validate for NewProject {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("name", &self.name, 1, None)
    }
}

impl Validate for NewProjectForUser {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("name", &self.name, 1, None)
    }
}

impl Validate for ProjectPatch {
    fn validate(&self) -> Result<(), AppError> {
        match &self.name {
            Some(name) => RequestValidator::text("name", name, 1, None),
            None => Ok(()),
        }
    }
}
