use super::domain::{ContactDetails, DecisionMaker, InspirationImage, LeadSubmission, PropertyData};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("submission carries no name, email, or phone to reach the customer")]
    MissingContactIdentity,
    #[error("pool vision exceeds the intake cap (allowed <= {max} chars, found {found})")]
    VisionTooLong { max: usize, found: usize },
    #[error("too many must-have features (allowed <= {max}, found {found})")]
    TooManyMustHaves { max: usize, found: usize },
    #[error("too many inspiration images (allowed <= {max}, found {found})")]
    TooManyInspirationImages { max: usize, found: usize },
}

const DEFAULT_MAX_VISION_CHARS: usize = 4_000;
const DEFAULT_MAX_MUST_HAVES: usize = 20;
const DEFAULT_MAX_INSPIRATION_IMAGES: usize = 12;

/// Caps applied to free-form submission fields before they reach storage.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    max_vision_chars: usize,
    max_must_haves: usize,
    max_inspiration_images: usize,
}

impl IntakePolicy {
    pub fn new(max_vision_chars: usize, max_must_haves: usize, max_inspiration_images: usize) -> Self {
        Self {
            max_vision_chars: sanitize(max_vision_chars, DEFAULT_MAX_VISION_CHARS),
            max_must_haves: sanitize(max_must_haves, DEFAULT_MAX_MUST_HAVES),
            max_inspiration_images: sanitize(max_inspiration_images, DEFAULT_MAX_INSPIRATION_IMAGES),
        }
    }

    pub fn max_vision_chars(&self) -> usize {
        self.max_vision_chars
    }

    pub fn max_must_haves(&self) -> usize {
        self.max_must_haves
    }

    pub fn max_inspiration_images(&self) -> usize {
        self.max_inspiration_images
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_VISION_CHARS,
            DEFAULT_MAX_MUST_HAVES,
            DEFAULT_MAX_INSPIRATION_IMAGES,
        )
    }
}

fn sanitize(value: usize, fallback: usize) -> usize {
    if value == 0 {
        fallback
    } else {
        value
    }
}

/// Guard responsible for normalizing raw submissions before storage. It
/// trims whitespace, collapses empty optionals, and enforces size caps,
/// but never rewrites the customer's wording; band strings reach the
/// scoring engine exactly as captured.
#[derive(Debug, Clone)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl Default for IntakeGuard {
    fn default() -> Self {
        Self::with_policy(IntakePolicy::default())
    }
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Produces the normalized submission that gets stored and scored.
    pub fn normalize(&self, submission: LeadSubmission) -> Result<LeadSubmission, IntakeViolation> {
        let contact = ContactDetails {
            name: submission.contact.name.trim().to_string(),
            email: clean(submission.contact.email),
            phone: clean(submission.contact.phone),
            city: clean(submission.contact.city),
        };

        if contact.name.is_empty() && contact.email.is_none() && contact.phone.is_none() {
            return Err(IntakeViolation::MissingContactIdentity);
        }

        let pool_vision = clean(submission.pool_vision);
        if let Some(vision) = pool_vision.as_deref() {
            let found = vision.chars().count();
            if found > self.policy.max_vision_chars {
                return Err(IntakeViolation::VisionTooLong {
                    max: self.policy.max_vision_chars,
                    found,
                });
            }
        }

        let must_haves = clean_list(submission.must_haves);
        if let Some(features) = must_haves.as_deref() {
            if features.len() > self.policy.max_must_haves {
                return Err(IntakeViolation::TooManyMustHaves {
                    max: self.policy.max_must_haves,
                    found: features.len(),
                });
            }
        }

        let inspiration_images = clean_images(submission.inspiration_images);
        if let Some(images) = inspiration_images.as_deref() {
            if images.len() > self.policy.max_inspiration_images {
                return Err(IntakeViolation::TooManyInspirationImages {
                    max: self.policy.max_inspiration_images,
                    found: images.len(),
                });
            }
        }

        Ok(LeadSubmission {
            contact,
            budget_range: clean(submission.budget_range),
            timeline: clean(submission.timeline),
            pool_vision,
            must_haves,
            inspiration_images,
            property_data: clean_property(submission.property_data),
            decision_makers: clean_decision_makers(submission.decision_makers),
            created_by_admin: submission.created_by_admin,
        })
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn clean_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .map(|entries| {
            entries
                .into_iter()
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|entries| !entries.is_empty())
}

fn clean_images(values: Option<Vec<InspirationImage>>) -> Option<Vec<InspirationImage>> {
    values
        .map(|images| {
            images
                .into_iter()
                .filter_map(|image| {
                    let url = image.url.trim().to_string();
                    if url.is_empty() {
                        return None;
                    }
                    Some(InspirationImage {
                        url,
                        caption: clean(image.caption),
                    })
                })
                .collect::<Vec<_>>()
        })
        .filter(|images| !images.is_empty())
}

fn clean_property(value: Option<PropertyData>) -> Option<PropertyData> {
    value
        .map(|property| PropertyData {
            estimated_value: clean(property.estimated_value),
            source: clean(property.source),
        })
        .filter(|property| property.estimated_value.is_some() || property.source.is_some())
}

fn clean_decision_makers(values: Option<Vec<DecisionMaker>>) -> Option<Vec<DecisionMaker>> {
    values
        .map(|people| {
            people
                .into_iter()
                .filter_map(|person| {
                    let name = person.name.trim().to_string();
                    if name.is_empty() {
                        return None;
                    }
                    let relationship = person.relationship.trim().to_string();
                    Some(DecisionMaker {
                        name,
                        relationship: if relationship.is_empty() {
                            "unspecified".to_string()
                        } else {
                            relationship
                        },
                    })
                })
                .collect::<Vec<_>>()
        })
        .filter(|people| !people.is_empty())
}
