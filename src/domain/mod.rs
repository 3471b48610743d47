//! Domain layer: data model and wire payloads.
//!
//! Pure serde types and validation rules. No I/O happens here.

mod diagnosis;
mod lenient;
mod patient;
mod request;
mod symptom;
mod validation;

pub use diagnosis::{Diagnosis, DiagnosisIssue, DiagnosisResult, Specialisation};
pub use patient::{parse_year_of_birth, Gender, DEFAULT_YEAR_OF_BIRTH, MIN_YEAR_OF_BIRTH};
pub use request::{DiagnosisRequest, VerdictRequest};
pub use symptom::{CatalogSymptom, SymptomOption, SymptomPayload};
pub use validation::{validate_submission, FormError};
