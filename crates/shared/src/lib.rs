//! Shared types, errors, and configuration for Fundtrack.
//!
//! This crate provides common types used across all other crates:
//! - Role and project status enumerations
//! - The `Amount` type with two-decimal fidelity
//! - Session context and auth payloads
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::SessionContext;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{Amount, ProjectStatus, Role};
