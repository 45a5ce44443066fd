use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::super::pipeline::{self, LeadQueueEntry, PipelineSnapshot};
use super::domain::{LeadId, LeadStatus, LeadSubmission};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    CrmAlert, CrmNotifier, LeadRecord, LeadRepository, NotifyError, RepositoryError,
};
use super::scoring::{LeadTemperature, ScoringEngine};

/// Knobs the lead service reads from configuration.
#[derive(Debug, Clone)]
pub struct SalesOpsConfig {
    /// CRM template used for hot-lead alerts.
    pub hot_alert_template: String,
    /// Default and maximum size of the call queue.
    pub queue_limit: usize,
}

impl Default for SalesOpsConfig {
    fn default() -> Self {
        Self {
            hot_alert_template: "hot_lead".to_string(),
            queue_limit: 25,
        }
    }
}

/// Service composing the intake guard, repository, scoring engine, and CRM
/// notifier into the lead lifecycle.
pub struct LeadScoringService<R, N> {
    guard: IntakeGuard,
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: ScoringEngine,
    ops: SalesOpsConfig,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, N> LeadScoringService<R, N>
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, ops: SalesOpsConfig) -> Self {
        Self::with_guard(IntakeGuard::default(), repository, notifier, ops)
    }

    pub(crate) fn with_guard(
        guard: IntakeGuard,
        repository: Arc<R>,
        notifier: Arc<N>,
        ops: SalesOpsConfig,
    ) -> Self {
        Self {
            guard,
            repository,
            notifier,
            engine: ScoringEngine::new(),
            ops,
        }
    }

    /// Capture a new lead, returning the repository-backed record.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        self.submit_backdated(submission, Utc::now())
    }

    /// Capture a lead with an explicit submission time. Used by importers
    /// replaying historical webform exports so queue ordering stays honest.
    pub fn submit_backdated(
        &self,
        submission: LeadSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let submission = self.guard.normalize(submission)?;
        let lead_id = next_lead_id();

        let record = LeadRecord {
            lead_id,
            submission,
            status: LeadStatus::New,
            score: None,
            submitted_at,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Score a captured lead and persist the breakdown. Re-scoring is safe;
    /// the hot-lead alert fires only when a lead first lands in the hot band.
    pub fn score(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        let previously_hot = record
            .score
            .as_ref()
            .map(|breakdown| breakdown.temperature == LeadTemperature::Hot)
            .unwrap_or(false);

        let breakdown = self.engine.score(&record.submission);
        info!(
            lead = %record.lead_id.0,
            score = breakdown.total_score,
            label = breakdown.label(),
            "lead scored"
        );

        record.score = Some(breakdown.clone());
        if record.status == LeadStatus::New {
            record.status = LeadStatus::Scored;
        }

        self.repository.update(record.clone())?;

        if breakdown.temperature == LeadTemperature::Hot && !previously_hot {
            let mut details = BTreeMap::new();
            details.insert("customer".to_string(), record.submission.contact.name.clone());
            details.insert("score".to_string(), breakdown.total_score.to_string());
            details.insert("headline".to_string(), record.headline().to_string());
            self.notifier.publish(CrmAlert {
                template: self.ops.hot_alert_template.clone(),
                lead_id: record.lead_id.clone(),
                details,
            })?;
            info!(lead = %record.lead_id.0, "hot lead alert published");
        }

        Ok(record)
    }

    /// Fetch a lead and current status for API responses.
    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Record that the sales desk reached out. Only scored leads are
    /// contactable; repeating the call on an already-contacted lead is a
    /// no-op.
    pub fn mark_contacted(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        match record.status {
            LeadStatus::Scored => {
                record.status = LeadStatus::Contacted;
                self.repository.update(record.clone())?;
                Ok(record)
            }
            LeadStatus::Contacted => Ok(record),
            LeadStatus::New | LeadStatus::Closed => Err(LeadServiceError::NotReadyForContact {
                lead_id: record.lead_id.0.clone(),
                status: record.status.label(),
            }),
        }
    }

    /// Close out a lead (won, lost, or gone quiet). Idempotent.
    pub fn close(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.status != LeadStatus::Closed {
            record.status = LeadStatus::Closed;
            self.repository.update(record.clone())?;
        }

        Ok(record)
    }

    /// The prioritized call queue: scored, not-yet-contacted leads ordered
    /// hottest first. `limit` is capped by the configured queue limit.
    pub fn queue(&self, limit: Option<usize>) -> Result<Vec<LeadQueueEntry>, LeadServiceError> {
        let cap = self.ops.queue_limit;
        let limit = limit.unwrap_or(cap).min(cap);
        let records = self.repository.list()?;
        Ok(pipeline::ranked_entries(&records, limit))
    }

    /// Aggregate view of every captured lead for the pipeline dashboard.
    pub fn pipeline_snapshot(&self) -> Result<PipelineSnapshot, LeadServiceError> {
        let records = self.repository.list()?;
        Ok(PipelineSnapshot::from_records(&records))
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("lead {lead_id} is {status}; it must be scored before contact is logged")]
    NotReadyForContact {
        lead_id: String,
        status: &'static str,
    },
}
