//! Diagnosis API port: the boundary to the remote diagnosis backend.
//!
//! The symptom taxonomy, inference and specialist matching all live behind
//! this trait; the client only moves payloads across it.

use crate::domain::{CatalogSymptom, Diagnosis, DiagnosisRequest, VerdictRequest};

/// Path of the symptom catalog endpoint.
pub const SYMPTOMS_PATH: &str = "/api/v1/symptoms";

/// Path of the diagnosis endpoint.
pub const DIAGNOSIS_PATH: &str = "/api/v1/diagnosis";

/// Path of the verdict endpoint.
pub const SAVE_PATH: &str = "/api/v1/save";

/// Errors reported by a diagnosis backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach diagnosis API at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Diagnosis API returned HTTP {status}")]
    Status {
        status: u16,
        /// The `message` field of the error body, when the backend sent one
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

impl ApiError {
    /// Server-provided message, if the error body carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Trait for the three backend calls the client makes.
///
/// Implementations are blocking; the TUI runs them on a worker thread.
pub trait DiagnosisApi: Send + Sync {
    /// Fetch the symptom catalog.
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status or a malformed body.
    fn fetch_symptoms(&self) -> Result<Vec<CatalogSymptom>, ApiError>;

    /// Request preliminary diagnoses for a patient.
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status or a malformed body.
    fn request_diagnosis(&self, request: &DiagnosisRequest) -> Result<Diagnosis, ApiError>;

    /// Post the clinician's verdict. Any 2xx counts as saved.
    ///
    /// # Errors
    /// Returns error on transport failure or non-2xx status.
    fn save_verdict(&self, verdict: &VerdictRequest) -> Result<(), ApiError>;
}
