//! Diagnosis form controller.
//!
//! Owns the intake form state and drives the three backend calls. Each call is
//! split into a `begin_*` step, which validates and yields the payload, and a
//! `finish_*` step, which applies the outcome. The TUI runs the call itself on
//! a worker thread in between; the `load_symptoms` / `submit_*` methods do all
//! three steps synchronously against any [`DiagnosisApi`].

use chrono::Datelike;
use zeroize::Zeroize;

use super::selection::SymptomPicker;
use crate::domain::{
    validate_submission, CatalogSymptom, Diagnosis, DiagnosisRequest, FormError, Gender,
    SymptomOption, SymptomPayload, VerdictRequest, DEFAULT_YEAR_OF_BIRTH,
};
use crate::ports::{ApiError, DiagnosisApi};

/// Banner text when the symptom catalog cannot be fetched.
pub const SYMPTOMS_UNAVAILABLE: &str = "Could not load symptoms list";

/// Banner text when a diagnosis request fails without a server message.
pub const DIAGNOSIS_FAILED: &str = "Failed to get diagnosis. Please try again.";

/// Acknowledgement text when a verdict cannot be saved.
pub const VERDICT_SAVE_FAILED: &str = "Failed to save diagnosis";

/// Longest accepted patient name, in characters.
const MAX_NAME_CHARS: usize = 120;

/// Result of posting a verdict, shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
    pub saved: bool,
}

impl Acknowledgement {
    #[must_use]
    pub fn saved(is_valid: bool) -> Self {
        let verdict = if is_valid { "Valid" } else { "Invalid" };
        Self {
            message: format!("Diagnosis marked as {verdict} and saved!"),
            saved: true,
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            message: VERDICT_SAVE_FAILED.to_string(),
            saved: false,
        }
    }
}

/// Intake form state.
#[derive(Debug, Clone)]
pub struct DiagnosisForm {
    patient_name: String,
    gender: Gender,
    year_of_birth: String,
    picker: SymptomPicker,
    diagnosis: Option<Diagnosis>,
    loading: bool,
    catalog_loading: bool,
    error: Option<String>,
    acknowledgement: Option<Acknowledgement>,
    /// Pinned "current year" for year-of-birth checks; the clock is used when unset
    current_year: Option<i32>,
}

impl Default for DiagnosisForm {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            gender: Gender::default(),
            year_of_birth: DEFAULT_YEAR_OF_BIRTH.to_string(),
            picker: SymptomPicker::default(),
            diagnosis: None,
            loading: false,
            catalog_loading: false,
            error: None,
            acknowledgement: None,
            current_year: None,
        }
    }
}

impl DiagnosisForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the year used as the upper bound for year of birth.
    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    // === Field access ===

    #[must_use]
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub fn year_of_birth(&self) -> &str {
        &self.year_of_birth
    }

    #[must_use]
    pub fn picker(&self) -> &SymptomPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut SymptomPicker {
        &mut self.picker
    }

    #[must_use]
    pub fn selected_symptoms(&self) -> &[SymptomOption] {
        self.picker.selected()
    }

    #[must_use]
    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnosis.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_catalog_loading(&self) -> bool {
        self.catalog_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn acknowledgement(&self) -> Option<&Acknowledgement> {
        self.acknowledgement.as_ref()
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.picker.selected().is_empty() && !self.patient_name.trim().is_empty()
    }

    // === Input handlers ===

    pub fn set_patient_name(&mut self, name: impl Into<String>) {
        self.patient_name.zeroize();
        self.patient_name = name.into();
    }

    pub fn push_name_char(&mut self, c: char) {
        if !c.is_control() && self.patient_name.chars().count() < MAX_NAME_CHARS {
            self.patient_name.push(c);
        }
    }

    pub fn pop_name_char(&mut self) {
        self.patient_name.pop();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn toggle_gender(&mut self) {
        self.gender = self.gender.toggled();
    }

    pub fn set_year_of_birth(&mut self, year: impl Into<String>) {
        self.year_of_birth = year.into();
    }

    /// Append a digit to the year field (other characters are ignored).
    pub fn push_year_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.year_of_birth.len() < 4 {
            self.year_of_birth.push(c);
        }
    }

    pub fn pop_year_char(&mut self) {
        self.year_of_birth.pop();
    }

    pub fn dismiss_acknowledgement(&mut self) {
        self.acknowledgement = None;
    }

    /// Start over with a new patient: fields, selection, results and messages
    /// return to their defaults. The symptom catalog is kept.
    ///
    /// # Errors
    /// Returns `RequestInFlight` while a diagnosis is pending, since its
    /// outcome belongs to the current patient. State is untouched then.
    pub fn reset_patient(&mut self) -> Result<(), FormError> {
        if self.loading {
            return Err(FormError::RequestInFlight);
        }

        self.patient_name.zeroize();
        self.gender = Gender::default();
        self.year_of_birth = DEFAULT_YEAR_OF_BIRTH.to_string();
        self.picker.clear_selection();
        self.picker.clear_query();
        self.diagnosis = None;
        self.error = None;
        self.acknowledgement = None;
        Ok(())
    }

    // === Symptom catalog ===

    /// Mark a catalog fetch as started.
    pub fn begin_symptom_load(&mut self) {
        self.catalog_loading = true;
    }

    /// Apply the outcome of a catalog fetch.
    pub fn finish_symptoms(&mut self, outcome: Result<Vec<CatalogSymptom>, ApiError>) {
        self.catalog_loading = false;
        match outcome {
            Ok(symptoms) => {
                tracing::info!(count = symptoms.len(), "Symptom catalog loaded");
                self.picker
                    .set_options(symptoms.into_iter().map(SymptomOption::from).collect());
                if self.error.as_deref() == Some(SYMPTOMS_UNAVAILABLE) {
                    self.error = None;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load symptoms");
                self.picker.set_options(Vec::new());
                self.error = Some(SYMPTOMS_UNAVAILABLE.to_string());
            }
        }
    }

    /// Fetch the catalog synchronously.
    pub fn load_symptoms(&mut self, api: &dyn DiagnosisApi) {
        self.begin_symptom_load();
        let outcome = api.fetch_symptoms();
        self.finish_symptoms(outcome);
    }

    // === Diagnosis ===

    /// Validate the form and build the diagnosis request.
    ///
    /// On success `loading` is set and the error cleared. Validation failures
    /// set the error and leave `loading` alone.
    ///
    /// # Errors
    /// Returns the first failing check, or `RequestInFlight` while a request
    /// is already pending (state untouched in that case).
    pub fn begin_diagnosis(&mut self) -> Result<DiagnosisRequest, FormError> {
        if self.loading {
            return Err(FormError::RequestInFlight);
        }

        if let Err(e) = validate_submission(
            &self.patient_name,
            self.picker.selected().len(),
            &self.year_of_birth,
            self.current_year(),
        ) {
            tracing::debug!(reason = ?e, "Diagnosis submission rejected");
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.loading = true;
        self.error = None;

        tracing::info!(
            symptoms = self.picker.selected().len(),
            gender = %self.gender,
            "Submitting diagnosis request"
        );

        Ok(DiagnosisRequest {
            patient_name: self.patient_name.trim().to_string(),
            gender: self.gender,
            year_of_birth: self.year_of_birth.clone(),
            symptoms: self.symptom_payload(),
        })
    }

    /// Apply the outcome of a diagnosis request. Clears `loading`.
    pub fn finish_diagnosis(&mut self, outcome: Result<Diagnosis, ApiError>) {
        self.loading = false;
        match outcome {
            Ok(diagnosis) => {
                tracing::info!(results = diagnosis.len(), "Diagnosis received");
                self.diagnosis = Some(diagnosis);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Diagnosis request failed");
                self.error = Some(
                    e.server_message()
                        .map_or_else(|| DIAGNOSIS_FAILED.to_string(), str::to_string),
                );
            }
        }
    }

    /// Validate, request and apply a diagnosis synchronously.
    ///
    /// # Errors
    /// Returns the validation error when no request was sent.
    pub fn submit_diagnosis(&mut self, api: &dyn DiagnosisApi) -> Result<(), FormError> {
        let request = self.begin_diagnosis()?;
        let outcome = api.request_diagnosis(&request);
        self.finish_diagnosis(outcome);
        Ok(())
    }

    // === Verdict ===

    /// Build the verdict payload for the displayed diagnosis, if any.
    #[must_use]
    pub fn begin_validation(&self, is_valid: bool) -> Option<VerdictRequest> {
        let diagnosis = self.diagnosis.as_ref()?;

        tracing::info!(is_valid, "Saving diagnosis verdict");

        Some(VerdictRequest {
            patient_name: self.patient_name.clone(),
            gender: self.gender,
            year_of_birth: self.year_of_birth.clone(),
            symptoms: self.symptom_payload(),
            diagnosis: diagnosis.serialized(),
            is_valid,
        })
    }

    /// Apply the outcome of posting a verdict; the acknowledgement replaces
    /// any previous one. The error banner is not touched.
    pub fn finish_validation(
        &mut self,
        is_valid: bool,
        outcome: Result<(), ApiError>,
    ) -> &Acknowledgement {
        let ack = match outcome {
            Ok(()) => Acknowledgement::saved(is_valid),
            Err(e) => {
                tracing::warn!(error = %e, "Saving verdict failed");
                Acknowledgement::failed()
            }
        };
        self.acknowledgement.insert(ack)
    }

    /// Post a verdict synchronously. `None` when there is no diagnosis.
    pub fn submit_validation(
        &mut self,
        api: &dyn DiagnosisApi,
        is_valid: bool,
    ) -> Option<Acknowledgement> {
        let verdict = self.begin_validation(is_valid)?;
        let outcome = api.save_verdict(&verdict);
        Some(self.finish_validation(is_valid, outcome).clone())
    }

    fn symptom_payload(&self) -> Vec<SymptomPayload> {
        self.picker
            .selected()
            .iter()
            .map(SymptomPayload::from)
            .collect()
    }
}
