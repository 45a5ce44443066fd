use serde::Serialize;

use super::tier::LeadTemperature;

/// Playbook handed to the sales desk for a scored lead. Every temperature
/// maps to a fixed title and exactly four concrete next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    pub title: &'static str,
    pub actions: [&'static str; 4],
}

impl ActionPlan {
    pub const fn for_temperature(temperature: LeadTemperature) -> Self {
        match temperature {
            LeadTemperature::Hot => Self {
                title: "Call immediately - this lead is ready to buy",
                actions: [
                    "Call within the next hour while the project is top of mind.",
                    "Send the premium design portfolio and financing one-pager after the call.",
                    "Offer an on-site consultation slot within 48 hours.",
                    "Loop in a senior designer so the first conversation covers build options.",
                ],
            },
            LeadTemperature::Warm => Self {
                title: "Follow up within 24 hours",
                actions: [
                    "Call or email within one business day to confirm scope and timeline.",
                    "Share two or three completed projects that match their stated budget.",
                    "Invite them to a design-center walkthrough in the next two weeks.",
                    "Log a reminder to re-touch in five days if there is no reply.",
                ],
            },
            LeadTemperature::Cool => Self {
                title: "Nurture with targeted content",
                actions: [
                    "Add the lead to the monthly project-showcase email list.",
                    "Send the budget-planning guide that maps features to price bands.",
                    "Check in once a quarter to ask whether the timeline has firmed up.",
                    "Flag for a call if they reply to any nurture touch.",
                ],
            },
            LeadTemperature::Cold => Self {
                title: "Keep on the long-term nurture list",
                actions: [
                    "Enroll the lead in the seasonal newsletter; no direct outreach yet.",
                    "Revisit only if a new submission or a referral arrives.",
                    "Verify contact details stay current before each campaign send.",
                    "Archive after twelve months without engagement.",
                ],
            },
        }
    }

    /// Resolves a plan from a stored label. Unknown or legacy labels fall
    /// back to the cold-lead plan rather than failing the caller.
    pub fn for_label(label: &str) -> Self {
        match LeadTemperature::from_label(label) {
            Some(temperature) => Self::for_temperature(temperature),
            None => Self::for_temperature(LeadTemperature::Cold),
        }
    }
}
