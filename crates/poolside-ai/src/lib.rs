//! Core library for the poolside-ai onboarding service.
//!
//! The crate turns raw customer submissions from the pool-builder's intake
//! wizard into scored, ranked, and action-ready sales leads. Modules under
//! [`workflows::onboarding`] carry the lead lifecycle (intake, scoring,
//! prioritization, HTTP routing) while [`workflows::webforms`] imports
//! legacy webform CSV exports into the same pipeline.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
