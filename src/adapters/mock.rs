//! In-process diagnosis backend returning canned data.
//!
//! Serves the same catalog and diagnosis the upstream backend returns in its
//! mock mode, so the client can be demonstrated without a server. Tests use
//! the builders to script failures and inspect the payloads received.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::{CatalogSymptom, Diagnosis, DiagnosisRequest, VerdictRequest};
use crate::ports::{ApiError, DiagnosisApi};

/// Mock diagnosis backend.
pub struct MockDiagnosisApi {
    symptoms: Result<Vec<CatalogSymptom>, ApiError>,
    diagnosis: Result<Value, ApiError>,
    save: Result<(), ApiError>,
    last_request: Mutex<Option<DiagnosisRequest>>,
    last_verdict: Mutex<Option<VerdictRequest>>,
    diagnosis_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl Default for MockDiagnosisApi {
    fn default() -> Self {
        Self {
            symptoms: Ok(default_catalog()),
            diagnosis: Ok(default_diagnosis()),
            save: Ok(()),
            last_request: Mutex::new(None),
            last_verdict: Mutex::new(None),
            diagnosis_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
        }
    }
}

impl MockDiagnosisApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_symptoms(mut self, symptoms: Vec<CatalogSymptom>) -> Self {
        self.symptoms = Ok(symptoms);
        self
    }

    /// Respond to diagnosis requests with this JSON array.
    #[must_use]
    pub fn with_diagnosis(mut self, diagnosis: Value) -> Self {
        self.diagnosis = Ok(diagnosis);
        self
    }

    #[must_use]
    pub fn failing_symptoms(mut self, error: ApiError) -> Self {
        self.symptoms = Err(error);
        self
    }

    #[must_use]
    pub fn failing_diagnosis(mut self, error: ApiError) -> Self {
        self.diagnosis = Err(error);
        self
    }

    #[must_use]
    pub fn failing_save(mut self, error: ApiError) -> Self {
        self.save = Err(error);
        self
    }

    /// The last diagnosis request received.
    #[must_use]
    pub fn last_request(&self) -> Option<DiagnosisRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }

    /// The last verdict received.
    #[must_use]
    pub fn last_verdict(&self) -> Option<VerdictRequest> {
        self.last_verdict.lock().ok().and_then(|v| v.clone())
    }

    #[must_use]
    pub fn diagnosis_calls(&self) -> usize {
        self.diagnosis_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

impl DiagnosisApi for MockDiagnosisApi {
    fn fetch_symptoms(&self) -> Result<Vec<CatalogSymptom>, ApiError> {
        tracing::info!("Mock backend: returning symptom catalog");
        self.symptoms.clone()
    }

    fn request_diagnosis(&self, request: &DiagnosisRequest) -> Result<Diagnosis, ApiError> {
        self.diagnosis_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request.clone());
        }

        tracing::info!("Mock backend: returning canned diagnosis");
        let raw = self.diagnosis.clone()?;
        Diagnosis::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn save_verdict(&self, verdict: &VerdictRequest) -> Result<(), ApiError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_verdict.lock() {
            *slot = Some(verdict.clone());
        }

        tracing::info!(is_valid = verdict.is_valid, "Mock backend: verdict discarded");
        self.save.clone()
    }
}

/// The backend's mock symptom catalog.
#[must_use]
pub fn default_catalog() -> Vec<CatalogSymptom> {
    [
        ("10", "Headache"),
        ("15", "Fever"),
        ("20", "Cough"),
        ("25", "Sore throat"),
        ("30", "Nausea"),
        ("35", "Fatigue"),
        ("40", "Dizziness"),
        ("45", "Shortness of breath"),
        ("50", "Chest pain"),
        ("55", "Abdominal pain"),
    ]
    .into_iter()
    .map(|(id, name)| CatalogSymptom::new(id, name))
    .collect()
}

/// The backend's mock diagnosis. Numeric ids and accuracy, as it sends them.
#[must_use]
pub fn default_diagnosis() -> Value {
    json!([
        {
            "issue": {
                "id": 100,
                "name": "Urinary Tract Infection (UTI)",
                "accuracy": 85,
                "icd": "N39.0",
                "icdName": "Urinary tract infection, site not specified",
                "profName": "Urinary tract infection"
            },
            "specialisation": [
                {
                    "id": 5,
                    "name": "General practitioner",
                    "specId": 5,
                    "specialistName": "General medicine"
                }
            ]
        },
        {
            "issue": {
                "id": 150,
                "name": "Dehydration",
                "accuracy": 60,
                "icd": "E86.0",
                "icdName": "Volume depletion",
                "profName": "Dehydration"
            },
            "specialisation": [
                {
                    "id": 10,
                    "name": "Internal medicine",
                    "specId": 10,
                    "specialistName": "Internal medicine"
                }
            ]
        },
        {
            "issue": {
                "id": 210,
                "name": "Liver Disease (early stages)",
                "accuracy": 30,
                "icd": "K72.90",
                "icdName": "Hepatic failure, unspecified without coma",
                "profName": "Hepatic failure"
            },
            "specialisation": [
                {
                    "id": 25,
                    "name": "Hepatologist",
                    "specId": 25,
                    "specialistName": "Hepatology"
                }
            ]
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    fn request() -> DiagnosisRequest {
        DiagnosisRequest {
            patient_name: "Amina".into(),
            gender: Gender::Female,
            year_of_birth: "1984".into(),
            symptoms: Vec::new(),
        }
    }

    #[test]
    fn default_catalog_has_ten_entries() {
        let catalog = MockDiagnosisApi::new().fetch_symptoms().expect("catalog");
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0], CatalogSymptom::new("10", "Headache"));
        assert_eq!(catalog[9], CatalogSymptom::new("55", "Abdominal pain"));
    }

    #[test]
    fn default_diagnosis_decodes_in_order() {
        let api = MockDiagnosisApi::new();
        let diagnosis = api.request_diagnosis(&request()).expect("diagnosis");

        let names: Vec<&str> = diagnosis
            .results()
            .iter()
            .map(|r| r.issue.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Urinary Tract Infection (UTI)", "Dehydration", "Liver Disease (early stages)"]
        );
        assert_eq!(diagnosis.results()[0].issue.accuracy, "85");
        assert_eq!(api.diagnosis_calls(), 1);
        assert_eq!(api.last_request(), Some(request()));
    }

    #[test]
    fn scripted_failures_are_returned() {
        let api = MockDiagnosisApi::new()
            .failing_symptoms(ApiError::Status {
                status: 500,
                message: None,
            })
            .failing_save(ApiError::Timeout(3));

        assert!(api.fetch_symptoms().is_err());

        let verdict = VerdictRequest {
            patient_name: "Amina".into(),
            gender: Gender::Female,
            year_of_birth: "1984".into(),
            symptoms: Vec::new(),
            diagnosis: "[]".into(),
            is_valid: true,
        };
        assert_eq!(api.save_verdict(&verdict), Err(ApiError::Timeout(3)));
        assert_eq!(api.save_calls(), 1);
        assert_eq!(api.last_verdict(), Some(verdict));
    }

    #[test]
    fn malformed_scripted_diagnosis_is_a_decode_error() {
        let api = MockDiagnosisApi::new().with_diagnosis(json!({"not": "an array"}));
        assert!(matches!(
            api.request_diagnosis(&request()),
            Err(ApiError::Decode(_))
        ));
    }
}
