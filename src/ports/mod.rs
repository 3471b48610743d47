//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary between
//! the form logic and the remote diagnosis service.

mod diagnosis_api;

pub use diagnosis_api::{ApiError, DiagnosisApi, DIAGNOSIS_PATH, SAVE_PATH, SYMPTOMS_PATH};
