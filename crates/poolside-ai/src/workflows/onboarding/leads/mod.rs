//! Lead intake, deterministic scoring, and sales-desk routing.
//!
//! A lead starts as a raw wizard submission, passes through the intake
//! guard, gets scored by the published rule table, and ends up ranked in
//! the call queue with a concrete action plan attached. Storage and CRM
//! delivery sit behind traits so the module can be exercised in isolation.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    form_options, ContactDetails, DecisionMaker, InspirationImage, LeadId, LeadStatus,
    LeadSubmission, PropertyData,
};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use repository::{
    CrmAlert, CrmNotifier, LeadRecord, LeadRepository, LeadStatusView, NotifyError,
    RepositoryError,
};
pub use router::lead_router;
pub use scoring::{
    ActionPlan, CategoryScore, LeadTemperature, ScoreBreakdown, ScoreCategory, ScoringEngine,
};
pub use service::{LeadScoringService, LeadServiceError, SalesOpsConfig};
