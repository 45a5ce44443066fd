use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::common::*;
use crate::workflows::onboarding::leads::domain::{LeadId, LeadStatus, LeadSubmission};
use crate::workflows::onboarding::leads::repository::{LeadRepository, RepositoryError};
use crate::workflows::onboarding::leads::{LeadScoringService, LeadServiceError};

#[test]
fn submit_stores_new_unscored_records() {
    let (service, repository, _) = build_service();

    let first = service.submit(cold_submission()).expect("first accepted");
    let second = service.submit(cool_submission()).expect("second accepted");

    assert!(first.lead_id.0.starts_with("lead-"));
    assert_ne!(first.lead_id, second.lead_id);
    assert!(first.lead_id < second.lead_id, "ids grow monotonically");

    let stored = repository
        .fetch(&first.lead_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, LeadStatus::New);
    assert!(stored.score.is_none());
}

#[test]
fn submit_backdated_keeps_the_given_timestamp() {
    let (service, repository, _) = build_service();
    let submitted_at = Utc
        .with_ymd_and_hms(2024, 11, 3, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    let record = service
        .submit_backdated(cold_submission(), submitted_at)
        .expect("accepted");

    let stored = repository
        .fetch(&record.lead_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.submitted_at, submitted_at);
}

#[test]
fn score_persists_the_breakdown_and_advances_status() {
    let (service, repository, _) = build_service();

    let record = service.submit(warm_submission()).expect("accepted");
    let scored = service.score(&record.lead_id).expect("scored");

    assert_eq!(scored.status, LeadStatus::Scored);
    let breakdown = scored.score.as_ref().expect("breakdown attached");
    assert_eq!(breakdown.total_score, 60);
    assert_eq!(breakdown.label(), "WARM");

    let stored = repository
        .fetch(&record.lead_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, LeadStatus::Scored);
    assert_eq!(
        stored.score.as_ref().map(|breakdown| breakdown.total_score),
        Some(60)
    );
}

#[test]
fn hot_leads_raise_exactly_one_crm_alert() {
    let (service, _, notifier) = build_service();

    let record = service.submit(hot_submission()).expect("accepted");
    service.score(&record.lead_id).expect("first scoring");
    service.score(&record.lead_id).expect("re-scoring is safe");

    let events = notifier.events();
    assert_eq!(events.len(), 1, "alert fires on the first hot result only");

    let alert = &events[0];
    assert_eq!(alert.template, "hot_lead");
    assert_eq!(alert.lead_id, record.lead_id);
    assert_eq!(alert.details.get("customer").map(String::as_str), Some("Dana Brooks"));
    assert_eq!(alert.details.get("score").map(String::as_str), Some("100"));
    assert_eq!(
        alert.details.get("headline").map(String::as_str),
        Some("Call immediately - this lead is ready to buy")
    );
}

#[test]
fn cooler_leads_do_not_alert() {
    let (service, _, notifier) = build_service();

    for submission in [warm_submission(), cool_submission(), cold_submission()] {
        let record = service.submit(submission).expect("accepted");
        service.score(&record.lead_id).expect("scored");
    }

    assert!(notifier.events().is_empty());
}

#[test]
fn scoring_an_unknown_lead_reports_not_found() {
    let (service, _, _) = build_service();

    let missing = LeadId("lead-does-not-exist".to_string());
    match service.score(&missing) {
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[test]
fn contact_requires_a_scored_lead() {
    let (service, _, _) = build_service();

    let record = service.submit(warm_submission()).expect("accepted");
    match service.mark_contacted(&record.lead_id) {
        Err(LeadServiceError::NotReadyForContact { status: "new", .. }) => {}
        other => panic!("expected not-ready error, got {other:?}"),
    }

    service.score(&record.lead_id).expect("scored");
    let contacted = service.mark_contacted(&record.lead_id).expect("contacted");
    assert_eq!(contacted.status, LeadStatus::Contacted);

    let repeat = service
        .mark_contacted(&record.lead_id)
        .expect("repeat contact is a no-op");
    assert_eq!(repeat.status, LeadStatus::Contacted);
}

#[test]
fn closed_leads_reject_contact() {
    let (service, _, _) = build_service();

    let record = service.submit(cool_submission()).expect("accepted");
    service.close(&record.lead_id).expect("closed");

    match service.mark_contacted(&record.lead_id) {
        Err(LeadServiceError::NotReadyForContact {
            status: "closed", ..
        }) => {}
        other => panic!("expected not-ready error, got {other:?}"),
    }
}

#[test]
fn close_is_idempotent_from_any_status() {
    let (service, _, _) = build_service();

    let record = service.submit(warm_submission()).expect("accepted");
    let closed = service.close(&record.lead_id).expect("closed");
    assert_eq!(closed.status, LeadStatus::Closed);

    let again = service.close(&record.lead_id).expect("still closed");
    assert_eq!(again.status, LeadStatus::Closed);
}

#[test]
fn intake_violations_bubble_out_of_submit() {
    let (service, _, _) = build_service();

    match service.submit(LeadSubmission::default()) {
        Err(LeadServiceError::Intake(_)) => {}
        other => panic!("expected intake violation, got {other:?}"),
    }
}

#[test]
fn repository_outages_surface_as_errors() {
    let service = LeadScoringService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
        sales_ops(),
    );

    match service.submit(cold_submission()) {
        Err(LeadServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable error, got {other:?}"),
    }
    assert!(service.queue(None).is_err());
    assert!(service.pipeline_snapshot().is_err());
}

#[test]
fn status_view_tracks_the_lifecycle() {
    let (service, _, _) = build_service();

    let record = service.submit(warm_submission()).expect("accepted");
    let before = record.status_view();
    assert_eq!(before.status, "new");
    assert_eq!(before.rule_based_score, None);
    assert_eq!(before.label, None);
    assert_eq!(before.headline, "Pending scoring");

    let scored = service.score(&record.lead_id).expect("scored");
    let after = scored.status_view();
    assert_eq!(after.status, "scored");
    assert_eq!(after.rule_based_score, Some(60));
    assert_eq!(after.label, Some("WARM"));
    assert_eq!(after.headline, "Follow up within 24 hours");
    assert_eq!(after.customer, "Riley Chen");
}
