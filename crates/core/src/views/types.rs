//! Aggregation view data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use fundtrack_shared::{Amount, ProjectStatus};

/// A project as the views consume and emit it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    /// Project id.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An expenditure row joined with its parent project's name.
///
/// Every dashboard groups or displays by project name, so the join
/// projection is the common currency between the repository and the views.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenditureOverview {
    /// Expenditure id.
    pub id: i64,
    /// Parent project id.
    pub project_id: i64,
    /// Parent project name.
    pub project_name: String,
    /// Spending category.
    pub category: String,
    /// Amount, two-decimal fidelity.
    pub amount: Amount,
    /// Optional description.
    pub description: Option<String>,
    /// Expenditure date.
    pub date: NaiveDate,
}

/// Agency dashboard: the mutable working set.
#[derive(Debug, Clone, Serialize)]
pub struct AgencyView {
    /// All projects, insertion order.
    pub projects: Vec<ProjectOverview>,
    /// All expenditures, insertion order.
    pub expenditures: Vec<ExpenditureOverview>,
    /// Total number of projects.
    pub project_count: usize,
}

/// One donor group: a project's expenditures with their subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSpending {
    /// The project name the group is keyed by.
    pub project_name: String,
    /// Expenditures under this project, source order.
    pub expenditures: Vec<ExpenditureOverview>,
    /// Sum of the group's amounts.
    pub subtotal: Amount,
}

/// Donor dashboard: read-only projects plus spending grouped by project.
#[derive(Debug, Clone, Serialize)]
pub struct DonorView {
    /// All projects, insertion order.
    pub projects: Vec<ProjectOverview>,
    /// Expenditures grouped by project name, first-appearance order.
    pub groups: Vec<ProjectSpending>,
    /// Sum over all groups.
    pub grand_total: Amount,
}

/// One government group: projects sharing a status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup {
    /// The shared status.
    pub status: ProjectStatus,
    /// Number of projects in the group.
    pub count: usize,
    /// The member projects, source order.
    pub projects: Vec<ProjectOverview>,
}

/// Government summary counters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GovernmentSummary {
    /// Total number of projects.
    pub total: usize,
    /// Projects currently In Progress.
    pub active: usize,
    /// Completed projects.
    pub completed: usize,
}

/// Government dashboard: projects grouped by status with counters.
#[derive(Debug, Clone, Serialize)]
pub struct GovernmentView {
    /// Status groups, first-appearance order.
    pub groups: Vec<StatusGroup>,
    /// Summary counters.
    pub summary: GovernmentSummary,
}
