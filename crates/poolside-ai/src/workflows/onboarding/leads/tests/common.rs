use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::onboarding::leads::domain::{
    ContactDetails, DecisionMaker, InspirationImage, LeadId, LeadSubmission, PropertyData,
};
use crate::workflows::onboarding::leads::repository::{
    CrmAlert, CrmNotifier, LeadRecord, LeadRepository, NotifyError, RepositoryError,
};
use crate::workflows::onboarding::leads::{lead_router, LeadScoringService, SalesOpsConfig};

/// Long enough to clear the 100-character engagement threshold.
pub(super) const RICH_VISION: &str = "We want a resort style backyard that wraps around the covered patio, with a zero-edge spa, a tanning ledge for the kids, and room to host thirty guests.";

pub(super) fn contact(name: &str) -> ContactDetails {
    ContactDetails {
        name: name.to_string(),
        email: Some(format!(
            "{}@example.com",
            name.to_ascii_lowercase().replace(' ', ".")
        )),
        phone: Some("555-0100".to_string()),
        city: Some("Scottsdale".to_string()),
    }
}

/// Every category at its maximum: 30 + 20 + 20 + 15 + 10 + 5 = 100.
pub(super) fn hot_submission() -> LeadSubmission {
    LeadSubmission {
        contact: contact("Dana Brooks"),
        budget_range: Some("$200k+".to_string()),
        timeline: Some("ASAP".to_string()),
        pool_vision: Some(RICH_VISION.to_string()),
        must_haves: Some(vec![
            "infinity edge".to_string(),
            "spa".to_string(),
            "tanning ledge".to_string(),
            "outdoor kitchen".to_string(),
            "fire feature".to_string(),
        ]),
        inspiration_images: Some(vec![
            InspirationImage {
                url: "https://img.example/resort.jpg".to_string(),
                caption: Some("liked the stonework".to_string()),
            },
            InspirationImage {
                url: "https://img.example/spa.jpg".to_string(),
                caption: None,
            },
        ]),
        property_data: Some(PropertyData {
            estimated_value: Some("$2M+".to_string()),
            source: Some("county records".to_string()),
        }),
        decision_makers: Some(vec![
            DecisionMaker {
                name: "Dana Brooks".to_string(),
                relationship: "owner".to_string(),
            },
            DecisionMaker {
                name: "Sam Brooks".to_string(),
                relationship: "spouse".to_string(),
            },
        ]),
        created_by_admin: Some(true),
    }
}

/// Mid-table values landing exactly on the warm threshold:
/// 20 + 15 + 10 + 10 + 5 = 60.
pub(super) fn warm_submission() -> LeadSubmission {
    LeadSubmission {
        contact: contact("Riley Chen"),
        budget_range: Some("$100k-150k".to_string()),
        timeline: Some("6-12 months".to_string()),
        pool_vision: Some("A simple lap pool off the back porch.".to_string()),
        must_haves: Some(vec!["lap lanes".to_string(), "heater".to_string()]),
        inspiration_images: None,
        property_data: Some(PropertyData {
            estimated_value: Some("$900k".to_string()),
            source: Some("estimate".to_string()),
        }),
        decision_makers: Some(vec![DecisionMaker {
            name: "Riley Chen".to_string(),
            relationship: "owner".to_string(),
        }]),
        created_by_admin: None,
    }
}

/// Budget band alone: 30 + 5 + 5 = 40, the cool threshold.
pub(super) fn cool_submission() -> LeadSubmission {
    LeadSubmission {
        contact: contact("Morgan Diaz"),
        budget_range: Some("$150k-200k".to_string()),
        ..LeadSubmission::default()
    }
}

/// Contact only; floors sum to 10.
pub(super) fn cold_submission() -> LeadSubmission {
    LeadSubmission {
        contact: contact("Avery Kim"),
        ..LeadSubmission::default()
    }
}

pub(super) fn sales_ops() -> SalesOpsConfig {
    SalesOpsConfig {
        hot_alert_template: "hot_lead".to_string(),
        queue_limit: 10,
    }
}

pub(super) fn build_service() -> (
    LeadScoringService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LeadScoringService::new(repository.clone(), notifier.clone(), sales_ops());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.lead_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<CrmAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<CrmAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl CrmNotifier for MemoryNotifier {
    fn publish(&self, alert: CrmAlert) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn lead_router_with_service(
    service: LeadScoringService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    lead_router(Arc::new(service))
}
