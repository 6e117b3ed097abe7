//! Role-shaped dashboard route.
//!
//! One endpoint, three shapes: the caller's role picks which aggregation
//! view is computed. The views are pure transforms recomputed per request;
//! nothing is cached or mutated here.

use std::str::FromStr;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::response::{check_role, internal_error};
use crate::{AppState, middleware::AuthSession};
use fundtrack_core::auth::READ_ROLES;
use fundtrack_core::views::{
    ExpenditureOverview, ProjectOverview, agency_view, donor_view, government_view,
};
use fundtrack_db::repositories::ExpenditureWithProject;
use fundtrack_db::{ExpenditureRepository, ProjectRepository};
use fundtrack_shared::{Amount, ProjectStatus, Role};
use fundtrack_db::entities::projects;

/// Creates the dashboard routes (session middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

fn project_overview(model: projects::Model) -> Result<ProjectOverview, String> {
    let status = ProjectStatus::from_str(&model.status)?;
    Ok(ProjectOverview {
        id: model.id,
        name: model.name,
        description: model.description,
        status,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn expenditure_overview(row: ExpenditureWithProject) -> ExpenditureOverview {
    ExpenditureOverview {
        id: row.expenditure.id,
        project_id: row.expenditure.project_id,
        project_name: row.project_name,
        category: row.expenditure.category,
        amount: Amount::from_stored(row.expenditure.amount),
        description: row.expenditure.description,
        date: row.expenditure.date,
    }
}

/// GET /api/dashboard - The caller's aggregation view.
async fn dashboard(State(state): State<AppState>, auth: AuthSession) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &READ_ROLES) {
        return response;
    }
    let role = auth.context().role;

    let project_repo = ProjectRepository::new((*state.db).clone());
    let models = match project_repo.list().await {
        Ok(m) => m,
        Err(e) => {
            error!(error = %e, "Failed to list projects");
            return internal_error();
        }
    };

    let mut projects = Vec::with_capacity(models.len());
    for model in models {
        match project_overview(model) {
            Ok(p) => projects.push(p),
            Err(e) => {
                error!(error = %e, "Stored status no longer parses");
                return internal_error();
            }
        }
    }

    // The government view is about project status only; skip the
    // expenditure read for it.
    let view = match role {
        Role::Government => json!({
            "role": role,
            "view": government_view(projects)
        }),
        Role::Agency | Role::Donor => {
            let expenditure_repo = ExpenditureRepository::new((*state.db).clone());
            let rows = match expenditure_repo.list_with_project().await {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, "Failed to list expenditures");
                    return internal_error();
                }
            };
            let expenditures: Vec<ExpenditureOverview> =
                rows.into_iter().map(expenditure_overview).collect();

            if role == Role::Agency {
                json!({
                    "role": role,
                    "view": agency_view(projects, expenditures)
                })
            } else {
                json!({
                    "role": role,
                    "view": donor_view(projects, expenditures)
                })
            }
        }
    };

    (StatusCode::OK, Json(view)).into_response()
}
