//! Authentication and authorization primitives.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The role authorization guard

mod guard;
mod password;

pub use guard::{AuthzError, MUTATING_ROLES, READ_ROLES, authorize};
pub use password::{PasswordError, hash_password, verify_password};
