use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadStatus, LeadSubmission};
use super::scoring::{ActionPlan, ScoreBreakdown};

/// Repository record containing the submission, score, and status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_id: LeadId,
    pub submission: LeadSubmission,
    pub status: LeadStatus,
    pub score: Option<ScoreBreakdown>,
    pub submitted_at: DateTime<Utc>,
}

impl LeadRecord {
    /// One-line call to action shown next to the lead everywhere it appears.
    pub fn headline(&self) -> &'static str {
        match &self.score {
            Some(breakdown) => ActionPlan::for_temperature(breakdown.temperature).title,
            None => "Pending scoring",
        }
    }

    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            lead_id: self.lead_id.clone(),
            customer: self.submission.contact.name.clone(),
            status: self.status.label(),
            rule_based_score: self.score.as_ref().map(|breakdown| breakdown.total_score),
            label: self.score.as_ref().map(|breakdown| breakdown.label()),
            headline: self.headline(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound CRM hooks (e.g., HubSpot or e-mail adapters).
pub trait CrmNotifier: Send + Sync {
    fn publish(&self, alert: CrmAlert) -> Result<(), NotifyError>;
}

/// Simple alert payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrmAlert {
    pub template: String,
    pub lead_id: LeadId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a lead's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub customer: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_based_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub headline: &'static str,
}
