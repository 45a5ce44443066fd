use super::parser::{parse_submitted_at, WebformRow};
use super::WebformLead;
use crate::workflows::onboarding::leads::domain::{
    ContactDetails, DecisionMaker, InspirationImage, LeadSubmission, PropertyData,
};

/// Converts a parsed export row into a lead. Rows with no name, email, or
/// phone yield `None`; there is nobody to call back.
pub(crate) fn lead_from_row(row: WebformRow) -> Option<WebformLead> {
    let name = row.name.clone().unwrap_or_default();
    if name.trim().is_empty() && row.email.is_none() && row.phone.is_none() {
        return None;
    }

    let submitted_at = row.submitted_at.as_deref().and_then(parse_submitted_at);

    let submission = LeadSubmission {
        contact: ContactDetails {
            name,
            email: row.email,
            phone: row.phone,
            city: row.city,
        },
        budget_range: row.budget,
        timeline: row.timeline,
        pool_vision: row.project_vision,
        must_haves: split_list(row.must_haves),
        inspiration_images: images_from(row.inspiration_links),
        property_data: row.estimated_property_value.map(|value| PropertyData {
            estimated_value: Some(value),
            source: Some("webform".to_string()),
        }),
        decision_makers: decision_makers_from(row.decision_makers),
        created_by_admin: admin_flag(row.admin_created.as_deref()),
    };

    Some(WebformLead {
        submission,
        submitted_at,
    })
}

/// Multi-value cells are semicolon separated.
fn split_list(cell: Option<String>) -> Option<Vec<String>> {
    cell.map(|value| {
        value
            .split(';')
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
    })
    .filter(|entries| !entries.is_empty())
}

fn images_from(cell: Option<String>) -> Option<Vec<InspirationImage>> {
    split_list(cell).map(|urls| {
        urls.into_iter()
            .map(|url| InspirationImage { url, caption: None })
            .collect()
    })
}

fn decision_makers_from(cell: Option<String>) -> Option<Vec<DecisionMaker>> {
    split_list(cell).map(|entries| entries.into_iter().map(parse_decision_maker).collect())
}

/// Decision makers export as "Jane Doe (spouse)". Bare names are kept
/// with the relationship marked unspecified.
fn parse_decision_maker(entry: String) -> DecisionMaker {
    if let Some(open) = entry.find('(') {
        if entry.ends_with(')') {
            let name = entry[..open].trim().to_string();
            let relationship = entry[open + 1..entry.len() - 1].trim().to_string();
            if !name.is_empty() && !relationship.is_empty() {
                return DecisionMaker { name, relationship };
            }
        }
    }

    DecisionMaker {
        name: entry.trim().to_string(),
        relationship: "unspecified".to_string(),
    }
}

fn admin_flag(cell: Option<&str>) -> Option<bool> {
    match cell?.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_decision_maker_for_tests(entry: &str) -> DecisionMaker {
    parse_decision_maker(entry.to_string())
}

#[cfg(test)]
pub(crate) fn admin_flag_for_tests(cell: Option<&str>) -> Option<bool> {
    admin_flag(cell)
}
