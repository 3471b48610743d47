//! Local checks run before a diagnosis request is issued.

use super::patient::parse_year_of_birth;

/// Reasons a diagnosis submission is refused before any network call.
///
/// The `Display` text is shown verbatim in the form's error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Patient name is required")]
    MissingPatientName,

    #[error("Please select at least one symptom")]
    NoSymptomsSelected,

    #[error("Please enter a valid year of birth")]
    InvalidYearOfBirth,

    #[error("A diagnosis request is already in progress")]
    RequestInFlight,
}

/// Validate submission fields in order: name, symptoms, year of birth.
///
/// # Errors
/// Returns the first failing check.
pub fn validate_submission(
    patient_name: &str,
    selected_symptoms: usize,
    year_of_birth: &str,
    current_year: i32,
) -> Result<(), FormError> {
    if patient_name.trim().is_empty() {
        return Err(FormError::MissingPatientName);
    }
    if selected_symptoms == 0 {
        return Err(FormError::NoSymptomsSelected);
    }
    if parse_year_of_birth(year_of_birth, current_year).is_none() {
        return Err(FormError::InvalidYearOfBirth);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_checked_first() {
        assert_eq!(
            validate_submission("   ", 0, "", 2026),
            Err(FormError::MissingPatientName)
        );
    }

    #[test]
    fn symptoms_are_checked_before_year() {
        assert_eq!(
            validate_submission("John", 0, "1800", 2026),
            Err(FormError::NoSymptomsSelected)
        );
    }

    #[test]
    fn year_is_checked_last() {
        assert_eq!(
            validate_submission("John", 1, "1899", 2026),
            Err(FormError::InvalidYearOfBirth)
        );
        assert_eq!(validate_submission("John", 1, "1990", 2026), Ok(()));
    }

    #[test]
    fn messages_match_banner_text() {
        assert_eq!(
            FormError::MissingPatientName.to_string(),
            "Patient name is required"
        );
        assert_eq!(
            FormError::NoSymptomsSelected.to_string(),
            "Please select at least one symptom"
        );
        assert_eq!(
            FormError::InvalidYearOfBirth.to_string(),
            "Please enter a valid year of birth"
        );
    }
}
