use std::collections::BTreeMap;

use super::super::domain::{DecisionMaker, InspirationImage, LeadSubmission};
use super::{CategoryScore, ScoreCategory};

/// Ceiling applied to the summed category points.
pub(crate) const MAX_SCORE: u8 = 100;

/// Applies the published rule table to a submission. Categories whose
/// qualifying field is absent are omitted entirely; engagement and
/// decision-maker rows always contribute a floor value. Band matching is
/// literal, case-sensitive substring containment against the wizard's
/// canonical option strings.
pub(crate) fn score_categories(
    submission: &LeadSubmission,
) -> BTreeMap<ScoreCategory, CategoryScore> {
    let mut categories = BTreeMap::new();

    if let Some(band) = text(submission.budget_range.as_deref()) {
        let (points, reason) = budget_rule(band);
        categories.insert(ScoreCategory::Budget, CategoryScore::new(points, reason));
    }

    if let Some(window) = text(submission.timeline.as_deref()) {
        let (points, reason) = timeline_rule(window);
        categories.insert(ScoreCategory::Timeline, CategoryScore::new(points, reason));
    }

    let (points, reason) = engagement_rule(
        text(submission.pool_vision.as_deref()),
        items(submission.must_haves.as_deref()),
        items(submission.inspiration_images.as_deref()),
    );
    categories.insert(ScoreCategory::Engagement, CategoryScore::new(points, reason));

    let estimated_value = submission
        .property_data
        .as_ref()
        .and_then(|property| text(property.estimated_value.as_deref()));
    if let Some(value) = estimated_value {
        let (points, reason) = property_value_rule(value);
        categories.insert(
            ScoreCategory::PropertyValue,
            CategoryScore::new(points, reason),
        );
    }

    let (points, reason) = decision_makers_rule(items(submission.decision_makers.as_deref()));
    categories.insert(
        ScoreCategory::DecisionMakers,
        CategoryScore::new(points, reason),
    );

    if submission.created_by_admin == Some(true) {
        categories.insert(
            ScoreCategory::AdminSourced,
            CategoryScore::new(5, "Entered by the sales team as pre-qualified"),
        );
    }

    categories
}

/// Sums category points and clamps the result into 0..=100.
pub(crate) fn clamped_total(categories: &BTreeMap<ScoreCategory, CategoryScore>) -> u8 {
    let total: u16 = categories
        .values()
        .map(|category| category.points as u16)
        .sum();
    total.min(MAX_SCORE as u16) as u8
}

fn budget_rule(band: &str) -> (u8, &'static str) {
    if band.contains("200k+") || band.contains("150k-200k") {
        (30, "High budget range")
    } else if band.contains("100k-150k") {
        (20, "Mid-range budget")
    } else {
        (10, "Budget shared, below target bands")
    }
}

fn timeline_rule(window: &str) -> (u8, &'static str) {
    if window.contains("ASAP") || window.contains("3-6 months") {
        (20, "Ready to start soon")
    } else if window.contains("6-12 months") {
        (15, "Planning within the year")
    } else {
        (5, "Timeline still open")
    }
}

fn engagement_rule(
    vision: Option<&str>,
    must_haves: Option<&[String]>,
    images: Option<&[InspirationImage]>,
) -> (u8, &'static str) {
    let rich_vision = vision.map(|text| text.chars().count() > 100).unwrap_or(false);
    let many_must_haves = must_haves.map(|features| features.len() > 3).unwrap_or(false);

    if rich_vision && many_must_haves && images.is_some() {
        (20, "Detailed vision, feature list, and inspiration provided")
    } else if vision.is_some() || must_haves.is_some() {
        (10, "Vision or feature preferences shared")
    } else {
        (5, "Minimal detail provided so far")
    }
}

fn property_value_rule(value: &str) -> (u8, &'static str) {
    if value.contains("$1M+") || value.contains("$2M+") {
        (15, "High-value property")
    } else if value.contains("$800k") || value.contains("$900k") {
        (10, "Upper-mid property value")
    } else {
        (5, "Property value on record")
    }
}

fn decision_makers_rule(decision_makers: Option<&[DecisionMaker]>) -> (u8, &'static str) {
    let count = decision_makers.map(|people| people.len()).unwrap_or(0);
    if count > 1 {
        (10, "Multiple decision makers engaged")
    } else {
        (5, "Single decision maker identified")
    }
}

/// A field counts as present only when it holds a non-empty value.
fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn items<T>(values: Option<&[T]>) -> Option<&[T]> {
    values.filter(|slice| !slice.is_empty())
}
