//! Patient demographics captured by the intake form.

use serde::{Deserialize, Serialize};

/// Earliest accepted year of birth.
pub const MIN_YEAR_OF_BIRTH: i32 = 1900;

/// Year of birth the form starts with.
pub const DEFAULT_YEAR_OF_BIRTH: &str = "1990";

/// Patient gender as understood by the diagnosis backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// The other option (the form only offers two).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }

    /// Label shown in the form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Parse a year of birth typed into the form.
///
/// Accepts an integer (surrounding whitespace ignored) in
/// `[MIN_YEAR_OF_BIRTH, current_year]`.
#[must_use]
pub fn parse_year_of_birth(input: &str, current_year: i32) -> Option<i32> {
    let year: i32 = input.trim().parse().ok()?;
    (MIN_YEAR_OF_BIRTH..=current_year).contains(&year).then_some(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(Gender::default(), Gender::Male);
    }

    #[test]
    fn gender_toggle_round_trips() {
        assert_eq!(Gender::Male.toggled(), Gender::Female);
        assert_eq!(Gender::Male.toggled().toggled(), Gender::Male);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert_eq!(parse_year_of_birth("1900", 2026), Some(1900));
        assert_eq!(parse_year_of_birth("2026", 2026), Some(2026));
        assert_eq!(parse_year_of_birth(" 1990 ", 2026), Some(1990));
    }

    #[test]
    fn year_rejects_out_of_range_and_garbage() {
        for input in ["1899", "2027", "", "   ", "19x0", "1990.5", "-1990", "0"] {
            assert_eq!(parse_year_of_birth(input, 2026), None, "input {input:?}");
        }
    }
}
