//! Business workflows for the onboarding service.

pub mod onboarding;
pub mod webforms;
