//! Project management routes.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::response::{check_role, error_response, internal_error, validation_failure};
use crate::{AppState, middleware::AuthSession};
use fundtrack_core::auth::{MUTATING_ROLES, READ_ROLES};
use fundtrack_db::ProjectRepository;
use fundtrack_db::entities::projects;
use fundtrack_db::repositories::{CreateProjectInput, ProjectError, UpdateProjectInput};
use fundtrack_shared::{AppError, ProjectStatus};

/// Creates the project routes (session middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects", post(create_project))
        .route("/api/projects/{id}", put(update_project))
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name. Required, non-empty.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status. Defaults to "Planning" when omitted.
    pub status: Option<String>,
}

/// Request body for a partial project update.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    /// New name.
    pub name: Option<String>,
    /// New description; JSON `null` clears it, an absent field keeps it.
    #[serde(default)]
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<String>,
}

/// Response for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Created at timestamp.
    pub created_at: String,
}

impl ProjectResponse {
    fn try_from_model(model: projects::Model) -> Result<Self, String> {
        let status = ProjectStatus::from_str(&model.status)?;
        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            status,
            created_at: model.created_at.to_rfc3339(),
        })
    }
}

/// GET /api/projects - Full project list, identical for every role.
async fn list_projects(State(state): State<AppState>, auth: AuthSession) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &READ_ROLES) {
        return response;
    }

    let repo = ProjectRepository::new((*state.db).clone());
    let models = match repo.list().await {
        Ok(m) => m,
        Err(e) => {
            error!(error = %e, "Failed to list projects");
            return internal_error();
        }
    };

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        match ProjectResponse::try_from_model(model) {
            Ok(item) => items.push(item),
            Err(e) => {
                error!(error = %e, "Stored status no longer parses");
                return internal_error();
            }
        }
    }

    (StatusCode::OK, Json(items)).into_response()
}

/// POST /api/projects - Create a project. Agency only.
async fn create_project(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &MUTATING_ROLES) {
        return response;
    }

    let name = payload.name.trim();
    if name.is_empty() {
        return validation_failure("name is required");
    }
    let status = match payload.status.as_deref() {
        None | Some("") => ProjectStatus::default(),
        Some(raw) => match ProjectStatus::from_str(raw) {
            Ok(s) => s,
            Err(_) => return validation_failure("status is not a recognized value"),
        },
    };

    let repo = ProjectRepository::new((*state.db).clone());
    let created = match repo
        .create(CreateProjectInput {
            name: name.to_string(),
            description: payload.description,
            status,
        })
        .await
    {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to create project");
            return internal_error();
        }
    };

    info!(project_id = %created.id, user_id = %auth.context().user_id, "Project created");

    match ProjectResponse::try_from_model(created) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => {
            error!(error = %e, "Stored status no longer parses");
            internal_error()
        }
    }
}

/// PUT /api/projects/{id} - Partial update. Agency only.
async fn update_project(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProjectRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_role(&auth, &MUTATING_ROLES) {
        return response;
    }

    let name = match payload.name {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return validation_failure("name must not be empty");
            }
            Some(trimmed.to_string())
        }
        None => None,
    };
    let status = match payload.status.as_deref() {
        None => None,
        Some(raw) => match ProjectStatus::from_str(raw) {
            Ok(s) => Some(s),
            Err(_) => return validation_failure("status is not a recognized value"),
        },
    };

    let repo = ProjectRepository::new((*state.db).clone());
    match repo
        .update(
            id,
            UpdateProjectInput {
                name,
                description: payload.description,
                status,
            },
        )
        .await
    {
        Ok(updated) => {
            info!(project_id = %updated.id, user_id = %auth.context().user_id, "Project updated");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(ProjectError::NotFound(_)) => {
            error_response(&AppError::NotFound(format!("project {id}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to update project");
            internal_error()
        }
    }
}
