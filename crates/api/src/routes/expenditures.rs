//! Expenditure management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::response::{check_role, internal_error, validation_failure};
use crate::{AppState, middleware::AuthSession};
use fundtrack_core::auth::{MUTATING_ROLES, READ_ROLES};
use fundtrack_db::ExpenditureRepository;
use fundtrack_db::repositories::{
    CreateExpenditureInput, ExpenditureError, ExpenditureWithProject,
};
use fundtrack_shared::Amount;

/// Creates the expenditure routes (session middleware is applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/expenditures", get(list_expenditures))
        .route("/api/expenditures", post(create_expenditure))
}

/// Request body for creating an expenditure.
#[derive(Debug, Deserialize)]
pub struct CreateExpenditureRequest {
    /// Parent project id.
    pub project_id: i64,
    /// Spending category.
    pub category: String,
    /// Amount as a decimal string, e.g. "150.50". At most two places.
    pub amount: String,
    /// Optional description.
    pub description: Option<String>,
    /// Expenditure date (YYYY-MM-DD).
    pub date: NaiveDate,
}

/// Response for an expenditure, joined with its parent project's name.
#[derive(Debug, Serialize)]
pub struct ExpenditureResponse {
    /// Expenditure ID.
    pub id: i64,
    /// Parent project ID.
    pub project_id: i64,
    /// Parent project name.
    pub project_name: String,
    /// Spending category.
    pub category: String,
    /// Amount, two-decimal fidelity.
    pub amount: Amount,
    /// Description.
    pub description: Option<String>,
    /// Expenditure date.
    pub date: NaiveDate,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<ExpenditureWithProject> for ExpenditureResponse {
    fn from(row: ExpenditureWithProject) -> Self {
        Self {
            id: row.expenditure.id,
            project_id: row.expenditure.project_id,
            project_name: row.project_name,
            category: row.expenditure.category,
            amount: Amount::from_stored(row.expenditure.amount),
            description: row.expenditure.description,
            date: row.expenditure.date,
            created_at: row.expenditure.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/expenditures - Full expenditure list with project names,
/// identical for every role.
async fn list_expenditures(State(state): State<AppState>, auth: AuthSession) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &READ_ROLES) {
        return response;
    }

    let repo = ExpenditureRepository::new((*state.db).clone());
    match repo.list_with_project().await {
        Ok(rows) => {
            let items: Vec<ExpenditureResponse> =
                rows.into_iter().map(ExpenditureResponse::from).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list expenditures");
            internal_error()
        }
    }
}

/// POST /api/expenditures - Record spending against a project. Agency only.
async fn create_expenditure(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<CreateExpenditureRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &MUTATING_ROLES) {
        return response;
    }

    if payload.category.trim().is_empty() {
        return validation_failure("category is required");
    }
    let amount = match Amount::parse(&payload.amount) {
        Ok(a) => a,
        Err(e) => return validation_failure(&format!("amount is invalid: {e}")),
    };

    let repo = ExpenditureRepository::new((*state.db).clone());
    let created = match repo
        .create(CreateExpenditureInput {
            project_id: payload.project_id,
            category: payload.category.trim().to_string(),
            amount,
            description: payload.description,
            date: payload.date,
        })
        .await
    {
        Ok(c) => c,
        Err(ExpenditureError::ProjectNotFound(id)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_project",
                    "message": format!("project_id {id} does not reference an existing project")
                })),
            )
                .into_response();
        }
        Err(ExpenditureError::Database(e)) => {
            error!(error = %e, "Failed to create expenditure");
            return internal_error();
        }
    };

    info!(
        expenditure_id = %created.id,
        project_id = %created.project_id,
        user_id = %auth.context().user_id,
        "Expenditure recorded"
    );

    let project_name = match fundtrack_db::ProjectRepository::new((*state.db).clone())
        .find_by_id(created.project_id)
        .await
    {
        Ok(Some(p)) => p.name,
        Ok(None) => String::new(),
        Err(e) => {
            error!(error = %e, "Failed to load parent project");
            return internal_error();
        }
    };

    let response = ExpenditureResponse::from(ExpenditureWithProject {
        expenditure: created,
        project_name,
    });
    (StatusCode::CREATED, Json(response)).into_response()
}
