//! View builders.

use fundtrack_shared::{Amount, ProjectStatus};

use super::types::{
    AgencyView, DonorView, ExpenditureOverview, GovernmentSummary, GovernmentView,
    ProjectOverview, ProjectSpending, StatusGroup,
};

/// Builds the agency view: the flat working set plus a project count.
#[must_use]
pub fn agency_view(
    projects: Vec<ProjectOverview>,
    expenditures: Vec<ExpenditureOverview>,
) -> AgencyView {
    let project_count = projects.len();
    AgencyView {
        projects,
        expenditures,
        project_count,
    }
}

/// Builds the donor view: spending grouped by project name with subtotals
/// and a grand total.
///
/// Groups appear in first-appearance order of the expenditure list. Projects
/// without expenditures contribute no group; the grand total over an empty
/// list is `0.00`.
#[must_use]
pub fn donor_view(
    projects: Vec<ProjectOverview>,
    expenditures: Vec<ExpenditureOverview>,
) -> DonorView {
    let mut groups: Vec<ProjectSpending> = Vec::new();

    for expenditure in expenditures {
        let position = groups
            .iter()
            .position(|g| g.project_name == expenditure.project_name);
        match position {
            Some(idx) => {
                let group = &mut groups[idx];
                group.subtotal = Amount::from_stored(
                    group.subtotal.value() + expenditure.amount.value(),
                );
                group.expenditures.push(expenditure);
            }
            None => {
                groups.push(ProjectSpending {
                    project_name: expenditure.project_name.clone(),
                    subtotal: expenditure.amount,
                    expenditures: vec![expenditure],
                });
            }
        }
    }

    let grand_total = Amount::from_stored(
        groups
            .iter()
            .map(|g| g.subtotal.value())
            .sum::<rust_decimal::Decimal>(),
    );

    DonorView {
        projects,
        groups,
        grand_total,
    }
}

/// Builds the government view: projects grouped by status with member
/// counts and summary counters.
///
/// Groups appear in first-appearance order of the project list, so a status
/// only shows up once some project carries it.
#[must_use]
pub fn government_view(projects: Vec<ProjectOverview>) -> GovernmentView {
    let total = projects.len();
    let active = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::InProgress)
        .count();
    let completed = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .count();

    let mut groups: Vec<StatusGroup> = Vec::new();
    for project in projects {
        let position = groups.iter().position(|g| g.status == project.status);
        match position {
            Some(idx) => {
                let group = &mut groups[idx];
                group.projects.push(project);
                group.count += 1;
            }
            None => {
                groups.push(StatusGroup {
                    status: project.status,
                    count: 1,
                    projects: vec![project],
                });
            }
        }
    }

    GovernmentView {
        groups,
        summary: GovernmentSummary {
            total,
            active,
            completed,
        },
    }
}
