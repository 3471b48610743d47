//! Diagnosis result types.
//!
//! Represents the ranked suggestions returned by `POST /api/v1/diagnosis`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// One candidate condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisIssue {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,

    pub name: String,

    /// Percentage as text, without the `%` sign
    #[serde(deserialize_with = "lenient::text")]
    pub accuracy: String,

    /// ICD code
    #[serde(deserialize_with = "lenient::text")]
    pub icd: String,

    /// Professional (clinical) name of the condition
    pub prof_name: String,
}

/// A specialist recommendation attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialisation {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,

    pub name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub spec_id: String,

    pub specialist_name: String,
}

impl Specialisation {
    /// Display form used in result cards: `"<specialistName> (<name>)"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.specialist_name, self.name)
    }
}

/// One ranked diagnostic suggestion with its specialist list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub issue: DiagnosisIssue,
    #[serde(default)]
    pub specialisation: Vec<Specialisation>,
}

/// A diagnosis response as received from the backend.
///
/// Holds the typed view used for rendering alongside the raw JSON array, so the
/// verdict payload can echo back exactly what was displayed (including fields
/// the typed view does not model).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    results: Vec<DiagnosisResult>,
    raw: Value,
}

impl Diagnosis {
    /// Build from a decoded JSON array.
    ///
    /// # Errors
    /// Returns error if the value is not an array of diagnosis results.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let results = Vec::<DiagnosisResult>::deserialize(&raw)?;
        Ok(Self { results, raw })
    }

    /// Parse a response body.
    ///
    /// # Errors
    /// Returns error on invalid JSON or an unexpected shape.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(body)?)
    }

    #[must_use]
    pub fn results(&self) -> &[DiagnosisResult] {
        &self.results
    }

    /// Compact JSON text of the array as received.
    #[must_use]
    pub fn serialized(&self) -> String {
        self.raw.to_string()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
