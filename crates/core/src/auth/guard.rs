//! Role authorization guard.
//!
//! Every route declares its required role set once and funnels the check
//! through [`authorize`]; no route compares role strings on its own.

use thiserror::Error;

use fundtrack_shared::{Role, SessionContext};

/// Roles allowed to mutate projects and expenditures.
pub const MUTATING_ROLES: [Role; 1] = [Role::Agency];

/// Roles allowed to read projects, expenditures, and dashboards.
pub const READ_ROLES: [Role; 3] = [Role::Agency, Role::Donor, Role::Government];

/// Authorization outcomes that deny an operation.
///
/// The two denials are distinct on purpose: a missing session redirects to
/// login, while a wrong role is an explicit refusal with no data returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// No session was presented, or it was invalid or expired.
    #[error("authentication required")]
    Unauthenticated,

    /// The session's role is not in the operation's required set.
    #[error("role lacks the required capability")]
    Forbidden,
}

/// Checks a session context against an operation's required role set.
///
/// Pure function of the context's role membership. Returns the context back
/// on success so handlers can keep threading it explicitly.
///
/// # Errors
///
/// `AuthzError::Unauthenticated` when no context is present,
/// `AuthzError::Forbidden` when the role is not in `required`.
pub fn authorize<'a>(
    ctx: Option<&'a SessionContext>,
    required: &[Role],
) -> Result<&'a SessionContext, AuthzError> {
    let ctx = ctx.ok_or(AuthzError::Unauthenticated)?;
    if required.contains(&ctx.role) {
        Ok(ctx)
    } else {
        Err(AuthzError::Forbidden)
    }
}
