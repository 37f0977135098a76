//! School stage a library book is intended for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookLevel {
    /// Primary school.
    Ilkokul,
    /// Middle school.
    Ortaokul,
    /// Suitable for both.
    Ortak,
}

impl BookLevel {
    pub const ALL: [BookLevel; 3] = [BookLevel::Ilkokul, BookLevel::Ortaokul, BookLevel::Ortak];

    pub fn as_str(self) -> &'static str {
        match self {
            BookLevel::Ilkokul => "ilkokul",
            BookLevel::Ortaokul => "ortaokul",
            BookLevel::Ortak => "ortak",
        }
    }

    /// Exact, case-sensitive match against the stored values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    /// Comma-separated list of valid values, for error messages.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Used when decoding the `level` column.
impl TryFrom<String> for BookLevel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown book level: {value}")))
    }
}

impl fmt::Display for BookLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_known_levels() {
        assert_eq!(BookLevel::parse("ilkokul"), Some(BookLevel::Ilkokul));
        assert_eq!(BookLevel::parse("ortak"), Some(BookLevel::Ortak));
        assert_eq!(BookLevel::parse("Ortak"), None);
        assert_eq!(BookLevel::parse("lise"), None);
    }

    #[test]
    fn try_from_string_rejects_unknown_values() {
        assert_eq!(BookLevel::try_from("ortaokul".to_string()).ok(), Some(BookLevel::Ortaokul));
        assert!(BookLevel::try_from("kolej".to_string()).is_err());
    }

    #[test]
    fn choices_lists_every_level() {
        assert_eq!(BookLevel::choices(), "ilkokul, ortaokul, ortak");
    }
}
