//! Authentication routes for register, login, and logout.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use fundtrack_core::auth::hash_password;
use fundtrack_db::{SessionRepository, UserRepository, repositories::UserError};
use fundtrack_shared::Role;
use fundtrack_shared::auth::{LoginRequest, RegisterRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// POST /register - Create an account in one of the three roles.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.username.trim().is_empty() {
        return validation_failure("username is required");
    }
    if payload.password.is_empty() {
        return validation_failure("password is required");
    }
    let Ok(role) = Role::from_str(&payload.role) else {
        return validation_failure("role must be one of agency, donor, or government");
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An error occurred during registration"
                })),
            )
                .into_response();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.create(&payload.username, &password_hash, role).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "New user registered");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(UserError::DuplicateUsername(_)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "success": false,
                "message": "Username already exists"
            })),
        )
            .into_response(),
        Err(UserError::Database(e)) => {
            error!(error = %e, "Failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An error occurred during registration"
                })),
            )
                .into_response()
        }
    }
}

/// POST /login - Check credentials and issue a session cookie.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Unknown username and wrong password produce the same body on purpose.
    let user = match user_repo
        .authenticate(&payload.username, &payload.password)
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Failed login attempt");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "message": "Invalid credentials"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    let role = match Role::from_str(&user.role) {
        Ok(r) => r,
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Stored role no longer parses");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    let session_repo = SessionRepository::new((*state.db).clone());
    let created = match session_repo.create(user.id, role, state.sessions.ttl).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to create session");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    info!(user_id = %user.id, role = %role, "User logged in");

    let jar = jar.add(session_cookie(&state, created.token));
    (
        jar,
        Json(json!({
            "success": true,
            "role": role
        })),
    )
        .into_response()
}

/// GET /logout - Destroy the session and send the browser back to login.
///
/// Deliberately outside the session middleware: logging out with a stale or
/// missing cookie still lands on the login page.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(&state.sessions.cookie_name) {
        let session_repo = SessionRepository::new((*state.db).clone());
        if let Err(e) = session_repo.destroy(cookie.value()).await {
            error!(error = %e, "Failed to destroy session");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during logout"
                })),
            )
                .into_response();
        }
    }

    let mut removal = Cookie::new(state.sessions.cookie_name.clone(), "");
    removal.set_path("/");
    (jar.remove(removal), Redirect::to("/login")).into_response()
}

/// Builds the session cookie: opaque token, `HttpOnly`, scoped to `/`,
/// max-age matching the server-side TTL, `Secure` when configured.
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.sessions.cookie_name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(state.sessions.ttl.num_seconds()));
    cookie.set_secure(state.sessions.cookie_secure);
    cookie
}

fn validation_failure(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "message": message
        })),
    )
        .into_response()
}
