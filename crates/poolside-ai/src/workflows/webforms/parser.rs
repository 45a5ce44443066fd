use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Column layout of the legacy webform export. Headers are matched by
/// name, so re-ordered exports parse the same.
#[derive(Debug, Deserialize)]
pub(crate) struct WebformRow {
    #[serde(
        rename = "Submitted At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) submitted_at: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    pub(crate) name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    pub(crate) phone: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    pub(crate) city: Option<String>,
    #[serde(rename = "Budget", default, deserialize_with = "empty_string_as_none")]
    pub(crate) budget: Option<String>,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    pub(crate) timeline: Option<String>,
    #[serde(
        rename = "Project Vision",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) project_vision: Option<String>,
    #[serde(
        rename = "Must Haves",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) must_haves: Option<String>,
    #[serde(
        rename = "Inspiration Links",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) inspiration_links: Option<String>,
    #[serde(
        rename = "Estimated Property Value",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) estimated_property_value: Option<String>,
    #[serde(
        rename = "Decision Makers",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) decision_makers: Option<String>,
    #[serde(
        rename = "Admin Created",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) admin_created: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<WebformRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize::<WebformRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Exports carry either RFC 3339 timestamps or bare dates; bare dates
/// resolve to midnight UTC. Anything else leaves the timestamp unset.
pub(crate) fn parse_submitted_at(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_submitted_at_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_submitted_at(value)
}
