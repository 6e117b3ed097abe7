//! Role-specific aggregation views.
//!
//! Pure, stateless transforms over repository reads. Nothing here mutates;
//! every view is recomputed per request from the rows it is handed, and
//! group order is the first-appearance order of the underlying list so the
//! output is reproducible from the source ordering.

mod service;
mod types;

pub use service::{agency_view, donor_view, government_view};
pub use types::{
    AgencyView, DonorView, ExpenditureOverview, GovernmentSummary, GovernmentView,
    ProjectOverview, ProjectSpending, StatusGroup,
};
