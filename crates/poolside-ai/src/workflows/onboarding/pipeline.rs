use chrono::{DateTime, Utc};
use serde::Serialize;

use super::leads::domain::{LeadId, LeadStatus};
use super::leads::repository::LeadRecord;
use super::leads::scoring::{ActionPlan, LeadTemperature};

/// How many ranked leads the dashboard surfaces as "call these next".
pub(crate) const TOP_OPPORTUNITY_LIMIT: usize = 5;

/// Row in the sales desk's prioritized call queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadQueueEntry {
    pub lead_id: LeadId,
    pub customer: String,
    pub rule_based_score: u8,
    pub label: &'static str,
    pub headline: &'static str,
    pub submitted_at: DateTime<Utc>,
}

/// Per-temperature tally across every scored lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierBreakdownEntry {
    pub temperature: LeadTemperature,
    pub label: &'static str,
    pub count: usize,
}

/// Aggregate health report for the pipeline dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    pub total_leads: usize,
    pub unscored: usize,
    pub tiers: Vec<TierBreakdownEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f32>,
    pub top_opportunities: Vec<LeadQueueEntry>,
    pub focus_notes: Vec<String>,
}

impl PipelineSnapshot {
    pub fn from_records(records: &[LeadRecord]) -> Self {
        let total_leads = records.len();
        let unscored = records
            .iter()
            .filter(|record| record.score.is_none())
            .count();

        let tiers = LeadTemperature::ordered()
            .into_iter()
            .map(|temperature| TierBreakdownEntry {
                temperature,
                label: temperature.label(),
                count: records
                    .iter()
                    .filter(|record| {
                        record
                            .score
                            .as_ref()
                            .map(|breakdown| breakdown.temperature == temperature)
                            .unwrap_or(false)
                    })
                    .count(),
            })
            .collect::<Vec<_>>();

        let scored: Vec<u8> = records
            .iter()
            .filter_map(|record| record.score.as_ref().map(|breakdown| breakdown.total_score))
            .collect();
        let average_score = if scored.is_empty() {
            None
        } else {
            Some(scored.iter().map(|score| *score as f32).sum::<f32>() / scored.len() as f32)
        };

        let top_opportunities = ranked_entries(records, TOP_OPPORTUNITY_LIMIT);
        let focus_notes = generate_focus_notes(records, total_leads, unscored, &top_opportunities);

        Self {
            total_leads,
            unscored,
            tiers,
            average_score,
            top_opportunities,
            focus_notes,
        }
    }
}

/// Ranks the actionable queue: scored leads the desk has not contacted yet,
/// highest score first, ties broken by submission age then lead id so the
/// ordering is stable across calls.
pub(crate) fn ranked_entries(records: &[LeadRecord], limit: usize) -> Vec<LeadQueueEntry> {
    let mut entries: Vec<LeadQueueEntry> = records
        .iter()
        .filter(|record| record.status == LeadStatus::Scored)
        .filter_map(|record| {
            record.score.as_ref().map(|breakdown| LeadQueueEntry {
                lead_id: record.lead_id.clone(),
                customer: record.submission.contact.name.clone(),
                rule_based_score: breakdown.total_score,
                label: breakdown.label(),
                headline: ActionPlan::for_temperature(breakdown.temperature).title,
                submitted_at: record.submitted_at,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.rule_based_score
            .cmp(&a.rule_based_score)
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
            .then_with(|| a.lead_id.cmp(&b.lead_id))
    });
    entries.truncate(limit);
    entries
}

fn generate_focus_notes(
    records: &[LeadRecord],
    total_leads: usize,
    unscored: usize,
    queue: &[LeadQueueEntry],
) -> Vec<String> {
    let mut notes = Vec::new();

    if total_leads == 0 {
        notes.push("Pipeline is empty; capture or import new submissions".to_string());
        return notes;
    }

    let hot_waiting = records
        .iter()
        .filter(|record| record.status == LeadStatus::Scored)
        .filter(|record| {
            record
                .score
                .as_ref()
                .map(|breakdown| breakdown.temperature == LeadTemperature::Hot)
                .unwrap_or(false)
        })
        .count();

    if hot_waiting > 0 {
        notes.push(format!(
            "{} hot lead{} awaiting first contact",
            hot_waiting,
            if hot_waiting == 1 { "" } else { "s" }
        ));
    }

    if unscored > 0 {
        notes.push(format!(
            "{} submission{} awaiting scoring",
            unscored,
            if unscored == 1 { "" } else { "s" }
        ));
    }

    let queue_has_priority = queue
        .iter()
        .any(|entry| entry.label == "HOT" || entry.label == "WARM");
    if unscored == 0 && !queue_has_priority {
        notes.push("No hot or warm leads in the queue; lean on nurture campaigns".to_string());
    }

    notes
}
