use serde::{Deserialize, Serialize};

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// How the customer can be reached once the sales desk picks the lead up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Raw submission captured by the onboarding wizard. Every qualifying field
/// is optional; customers abandon the wizard at any step and partial
/// submissions still become leads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub contact: ContactDetails,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub pool_vision: Option<String>,
    pub must_haves: Option<Vec<String>>,
    pub inspiration_images: Option<Vec<InspirationImage>>,
    pub property_data: Option<PropertyData>,
    pub decision_makers: Option<Vec<DecisionMaker>>,
    pub created_by_admin: Option<bool>,
}

/// Reference imagery the customer attached while describing their project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspirationImage {
    pub url: String,
    pub caption: Option<String>,
}

/// Property enrichment attached to the submission by upstream tooling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyData {
    pub estimated_value: Option<String>,
    pub source: Option<String>,
}

/// A person with a say in the purchase decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMaker {
    pub name: String,
    pub relationship: String,
}

/// High level status tracked throughout the lead lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Scored,
    Contacted,
    Closed,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Scored => "scored",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Closed => "closed",
        }
    }
}

/// Canonical option sets rendered by the onboarding wizard's select fields.
/// Free-form text is still accepted; these are the values the wizard offers.
pub mod form_options {
    pub const BUDGET_BANDS: [&str; 5] = [
        "Under $100k",
        "$100k-150k",
        "$150k-200k",
        "$200k+",
        "Not sure yet",
    ];

    pub const TIMELINES: [&str; 5] = [
        "ASAP",
        "3-6 months",
        "6-12 months",
        "12+ months",
        "Just exploring options",
    ];
}
