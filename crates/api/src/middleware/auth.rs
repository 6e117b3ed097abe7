//! Session middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::response::{internal_error, unauthenticated};
use fundtrack_db::SessionRepository;
use fundtrack_shared::SessionContext;

/// Session middleware that resolves the session cookie.
///
/// This middleware:
/// 1. Reads the session cookie from the request
/// 2. Resolves it against the server-side session store
/// 3. Stores the resulting `SessionContext` in request extensions
///
/// Absent, unknown, and expired tokens all answer 401; API callers get JSON
/// rather than a login redirect.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(&state.sessions.cookie_name) else {
        return unauthenticated();
    };

    let repo = SessionRepository::new((*state.db).clone());
    match repo.resolve(cookie.value()).await {
        Ok(Some(ctx)) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Ok(None) => unauthenticated(),
        Err(e) => {
            error!(error = %e, "Database error resolving session");
            internal_error()
        }
    }
}

/// Extractor for the resolved session context.
///
/// Use this in handlers behind the session middleware:
///
/// ```ignore
/// async fn handler(auth: AuthSession) -> impl IntoResponse {
///     let role = auth.context().role;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionContext);

impl AuthSession {
    /// Returns the session context.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(AuthSession)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthenticated",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
