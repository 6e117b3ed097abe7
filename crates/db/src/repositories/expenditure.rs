//! Expenditure repository for database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};

use fundtrack_shared::Amount;

use crate::entities::{expenditures, projects};

/// Error types for expenditure operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenditureError {
    /// The referenced project does not exist. Nothing was inserted.
    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expenditure.
#[derive(Debug, Clone)]
pub struct CreateExpenditureInput {
    /// Parent project id. Must resolve to a live project.
    pub project_id: i64,
    /// Spending category.
    pub category: String,
    /// Amount, already validated to two-decimal fidelity.
    pub amount: Amount,
    /// Optional description.
    pub description: Option<String>,
    /// Expenditure date.
    pub date: NaiveDate,
}

/// An expenditure joined with its parent project's name.
#[derive(Debug, Clone)]
pub struct ExpenditureWithProject {
    /// The expenditure record.
    pub expenditure: expenditures::Model,
    /// Name of the parent project.
    pub project_name: String,
}

/// Expenditure repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenditureRepository {
    db: DatabaseConnection,
}

impl ExpenditureRepository {
    /// Creates a new expenditure repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all expenditures in insertion order, each joined with its
    /// parent project's name. Dashboards group and display by project name,
    /// so the join happens once here rather than in every consumer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_project(&self) -> Result<Vec<ExpenditureWithProject>, DbErr> {
        let rows = expenditures::Entity::find()
            .find_also_related(projects::Entity)
            .order_by_asc(expenditures::Column::Id)
            .all(&self.db)
            .await?;

        // The foreign key makes the parent non-optional in practice.
        Ok(rows
            .into_iter()
            .filter_map(|(expenditure, project)| {
                project.map(|p| ExpenditureWithProject {
                    expenditure,
                    project_name: p.name,
                })
            })
            .collect())
    }

    /// Creates a new expenditure after checking its project resolves.
    ///
    /// # Errors
    ///
    /// Returns `ExpenditureError::ProjectNotFound` when the project id does
    /// not resolve - distinctly, and without inserting anything - or
    /// `ExpenditureError::Database` if the insert fails.
    pub async fn create(
        &self,
        input: CreateExpenditureInput,
    ) -> Result<expenditures::Model, ExpenditureError> {
        let parent = projects::Entity::find_by_id(input.project_id)
            .one(&self.db)
            .await?;
        if parent.is_none() {
            return Err(ExpenditureError::ProjectNotFound(input.project_id));
        }

        let now = chrono::Utc::now().into();
        let expenditure = expenditures::ActiveModel {
            project_id: Set(input.project_id),
            category: Set(input.category),
            amount: Set(input.amount.value()),
            description: Set(input.description),
            date: Set(input.date),
            created_at: Set(now),
            ..Default::default()
        };

        Ok(expenditure.insert(&self.db).await?)
    }
}
