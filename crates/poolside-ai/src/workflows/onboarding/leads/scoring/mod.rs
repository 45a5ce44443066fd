mod actions;
mod rules;
mod tier;

pub use actions::ActionPlan;
pub use tier::LeadTemperature;

use std::collections::BTreeMap;

use super::domain::LeadSubmission;
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the published rule table to a submission.
/// Scoring never fails and never mutates its input; missing fields simply
/// skip or floor their category.
#[derive(Debug, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, submission: &LeadSubmission) -> ScoreBreakdown {
        let categories = rules::score_categories(submission);
        let total_score = rules::clamped_total(&categories);
        let temperature = LeadTemperature::for_score(total_score);

        ScoreBreakdown {
            total_score,
            categories,
            temperature,
        }
    }
}

/// Categories of the scoring rubric, ordered the way the sales desk reads
/// a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Budget,
    Timeline,
    Engagement,
    PropertyValue,
    DecisionMakers,
    AdminSourced,
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub points: u8,
    pub reason: String,
}

impl CategoryScore {
    pub(crate) fn new(points: u8, reason: &str) -> Self {
        Self {
            points,
            reason: reason.to_string(),
        }
    }
}

/// Scoring output describing the composite score and its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: u8,
    pub categories: BTreeMap<ScoreCategory, CategoryScore>,
    pub temperature: LeadTemperature,
}

impl ScoreBreakdown {
    /// The sales play matching this breakdown's temperature.
    pub fn recommendation(&self) -> ActionPlan {
        ActionPlan::for_temperature(self.temperature)
    }

    pub fn label(&self) -> &'static str {
        self.temperature.label()
    }
}
