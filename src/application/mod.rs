//! Application layer: form state and use cases.
//!
//! This module orchestrates domain rules with the diagnosis API port.

mod form;
mod selection;

pub use form::{
    Acknowledgement, DiagnosisForm, DIAGNOSIS_FAILED, SYMPTOMS_UNAVAILABLE, VERDICT_SAVE_FAILED,
};
pub use selection::SymptomPicker;
