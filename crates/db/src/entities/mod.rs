//! `SeaORM` entity definitions.
//!
//! Role and status columns are stored as their canonical strings; the
//! repositories convert to and from the closed enums in `fundtrack-shared`
//! at the boundary, so an unrecognized value never round-trips silently.

pub mod expenditures;
pub mod projects;
pub mod sessions;
pub mod users;
