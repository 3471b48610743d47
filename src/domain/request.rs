//! Request bodies sent to the diagnosis backend.

use serde::{Deserialize, Serialize};

use super::{Gender, SymptomPayload};

/// Body of `POST /api/v1/diagnosis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub patient_name: String,
    pub gender: Gender,
    /// Sent exactly as typed
    pub year_of_birth: String,
    pub symptoms: Vec<SymptomPayload>,
}

/// Body of `POST /api/v1/save`: the clinician's verdict on a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRequest {
    pub patient_name: String,
    pub gender: Gender,
    pub year_of_birth: String,
    pub symptoms: Vec<SymptomPayload>,
    /// The displayed diagnosis array, serialized as JSON text
    pub diagnosis: String,
    pub is_valid: bool,
}
