//! Symptom catalog types.

use serde::{Deserialize, Serialize};

use super::lenient;

/// One entry of the backend symptom catalog (`GET /api/v1/symptoms`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSymptom {
    /// Catalog identifier. Some backends send it as a number.
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,

    /// Display name
    pub name: String,
}

impl CatalogSymptom {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Client-side projection of a catalog symptom used by the selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymptomOption {
    pub value: String,
    pub label: String,
}

impl SymptomOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<CatalogSymptom> for SymptomOption {
    fn from(symptom: CatalogSymptom) -> Self {
        Self {
            value: symptom.id,
            label: symptom.name,
        }
    }
}

/// Symptom as sent to the backend inside diagnosis and verdict payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomPayload {
    pub id: String,
    pub description: String,
}

impl From<&SymptomOption> for SymptomPayload {
    fn from(option: &SymptomOption) -> Self {
        Self {
            id: option.value.clone(),
            description: option.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_accepts_numeric_ids() {
        let parsed: Vec<CatalogSymptom> =
            serde_json::from_str(r#"[{"id": 10, "name": "Headache"}, {"id": "s1", "name": "Fever"}]"#)
                .expect("catalog should parse");

        assert_eq!(parsed[0], CatalogSymptom::new("10", "Headache"));
        assert_eq!(parsed[1], CatalogSymptom::new("s1", "Fever"));
    }

    #[test]
    fn option_maps_id_and_name() {
        let option = SymptomOption::from(CatalogSymptom::new("s1", "Fever"));
        assert_eq!(option.value, "s1");
        assert_eq!(option.label, "Fever");
    }

    #[test]
    fn payload_uses_label_as_description() {
        let option = SymptomOption::new("s1", "Fever");
        let payload = SymptomPayload::from(&option);
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json, serde_json::json!({"id": "s1", "description": "Fever"}));
    }
}
