//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod expenditure;
pub mod project;
pub mod session;
pub mod user;

pub use expenditure::{
    CreateExpenditureInput, ExpenditureError, ExpenditureRepository, ExpenditureWithProject,
};
pub use project::{CreateProjectInput, ProjectError, ProjectRepository, UpdateProjectInput};
pub use session::{CreatedSession, SessionRepository};
pub use user::{UserError, UserRepository};
