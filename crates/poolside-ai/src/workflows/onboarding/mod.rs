//! Customer onboarding workflow: lead capture, scoring, and follow-up.

pub mod leads;
pub mod pipeline;

pub use pipeline::{LeadQueueEntry, PipelineSnapshot, TierBreakdownEntry};
