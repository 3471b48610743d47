//! # Triage
//!
//! Terminal intake form for a remote diagnosis service.
//!
//! A clinician enters a patient's name, gender and year of birth, picks
//! symptoms from the service's catalog, requests preliminary diagnostic
//! suggestions and marks the returned diagnosis as valid or invalid.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (symptoms, diagnosis results, request payloads)
//! - `ports`: Trait definition for the diagnosis service
//! - `adapters`: Concrete implementations (reqwest HTTP client, mock, log sanitizer)
//! - `application`: Form state and use cases
//! - `config`: Startup configuration from the environment
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Diagnosis, DiagnosisResult, Gender};

/// Result type for Triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Main error type for Triage
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Diagnosis service error: {0}")]
    Api(#[from] ports::ApiError),
}
