//! Project repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use fundtrack_shared::ProjectStatus;

use crate::entities::{expenditures, projects};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(i64),

    /// Cannot delete a project that has recorded expenditures.
    #[error("Cannot delete project: {0} expenditures reference it")]
    HasExpenditures(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name. Validated non-empty upstream.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status. `Planning` when the caller omitted one.
    pub status: ProjectStatus,
}

/// Input for a partial project update. `None` fields are left untouched;
/// the double option on `description` distinguishes "leave it" from "clear
/// it".
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// New name.
    pub name: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<ProjectStatus>,
}

/// Project repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all projects in insertion order. No role filtering here; the
    /// views shape the data per role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<projects::Model>, DbErr> {
        projects::Entity::find()
            .order_by_asc(projects::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<projects::Model>, DbErr> {
        projects::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let project = projects::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            status: Set(input.status.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        project.insert(&self.db).await
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if the id is unknown, or
    /// `ProjectError::Database` if the update fails.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateProjectInput,
    ) -> Result<projects::Model, ProjectError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Err(ProjectError::NotFound(id));
        };

        let mut project: projects::ActiveModel = existing.into();
        if let Some(name) = input.name {
            project.name = Set(name);
        }
        if let Some(description) = input.description {
            project.description = Set(description);
        }
        if let Some(status) = input.status {
            project.status = Set(status.as_str().to_string());
        }

        Ok(project.update(&self.db).await?)
    }

    /// Deletes a project, refusing while expenditures still reference it.
    ///
    /// Restrict policy: callers must not lose spending records to a project
    /// deletion. No HTTP route exposes this today.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` for an unknown id,
    /// `ProjectError::HasExpenditures` when dependents exist, or
    /// `ProjectError::Database` if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<(), ProjectError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Err(ProjectError::NotFound(id));
        };

        let dependents = expenditures::Entity::find()
            .filter(expenditures::Column::ProjectId.eq(id))
            .count(&self.db)
            .await?;
        if dependents > 0 {
            return Err(ProjectError::HasExpenditures(dependents));
        }

        let project: projects::ActiveModel = existing.into();
        project.delete(&self.db).await?;
        Ok(())
    }
}
