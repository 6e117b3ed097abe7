//! Stakeholder roles.

use serde::{Deserialize, Serialize};

/// Stakeholder roles sharing the project/expenditure data.
///
/// The role decides read/write capability and how the dashboard is shaped.
/// Unrecognized role strings are rejected at every entry boundary, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Implementing agency. The only role allowed to mutate projects and
    /// expenditures.
    Agency,
    /// Donor. Read-only access with spending breakdowns per project.
    Donor,
    /// Government partner. Read-only access with status-grouped projects.
    Government,
}

/// All roles, in declaration order.
pub const ALL_ROLES: [Role; 3] = [Role::Agency, Role::Donor, Role::Government];

impl Role {
    /// Returns the canonical string form stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Donor => "donor",
            Self::Government => "government",
        }
    }

    /// Returns true if this role may create or edit projects and
    /// expenditures.
    #[must_use]
    pub const fn can_mutate(&self) -> bool {
        matches!(self, Self::Agency)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agency" => Ok(Self::Agency),
            "donor" => Ok(Self::Donor),
            "government" => Ok(Self::Government),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("Agency").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_only_agency_mutates() {
        assert!(Role::Agency.can_mutate());
        assert!(!Role::Donor.can_mutate());
        assert!(!Role::Government.can_mutate());
    }

    #[test]
    fn test_role_serde_form() {
        assert_eq!(serde_json::to_string(&Role::Agency).unwrap(), "\"agency\"");
        let role: Role = serde_json::from_str("\"government\"").unwrap();
        assert_eq!(role, Role::Government);
        assert!(serde_json::from_str::<Role>("\"auditor\"").is_err());
    }
}
