//! Project lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
///
/// The canonical strings carry spaces ("In Progress", "On Hold") because
/// dashboards render them verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Not yet started. The default for new projects.
    #[default]
    Planning,
    /// Actively running.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    Completed,
    /// Paused.
    #[serde(rename = "On Hold")]
    OnHold,
}

/// All statuses, in lifecycle order.
pub const ALL_STATUSES: [ProjectStatus; 4] = [
    ProjectStatus::Planning,
    ProjectStatus::InProgress,
    ProjectStatus::Completed,
    ProjectStatus::OnHold,
];

impl ProjectStatus {
    /// Returns the canonical string form stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Planning" => Ok(Self::Planning),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "On Hold" => Ok(Self::OnHold),
            _ => Err(format!("Unknown project status: {s}")),
        }
    }
}
