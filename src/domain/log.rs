/// DrinkLog record for a single calendar day
///
/// This module defines the DrinkLog struct that represents one day's
/// consumption: a total drink count, a category label, an optional note and
/// an optional per-category breakdown. The calendar date is the unique key
/// within the collection.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use crate::domain::DomainError;

/// Maximum length of the free-text note on a record
pub const NOTE_MAX_LEN: usize = 500;

/// Category label attached to a day's record
///
/// A record is labelled with a single drink category, `Mixed` when more than
/// one category was used, or `Clean` for a zero-drink day. Labels outside the
/// fixed set round-trip through `Custom` so stored data is never rejected
/// for an unknown spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrinkKind {
    /// Zero drinks for the day
    Clean,
    /// More than one category used
    Mixed,
    Beer,
    Wine,
    Spirits,
    Cocktail,
    /// Any other label, kept verbatim
    Custom(String),
}

impl DrinkKind {
    /// The wire label for this kind, as stored in the serialized collection
    pub fn as_label(&self) -> &str {
        match self {
            DrinkKind::Clean => "clean",
            DrinkKind::Mixed => "mixed",
            DrinkKind::Beer => "beer",
            DrinkKind::Wine => "wine",
            DrinkKind::Spirits => "spirits",
            DrinkKind::Cocktail => "cocktail",
            DrinkKind::Custom(name) => name,
        }
    }

    /// Parse a wire label; unknown labels become `Custom`
    pub fn from_label(s: &str) -> Self {
        match s {
            "clean" => DrinkKind::Clean,
            "mixed" => DrinkKind::Mixed,
            "beer" => DrinkKind::Beer,
            "wine" => DrinkKind::Wine,
            "spirits" => DrinkKind::Spirits,
            "cocktail" => DrinkKind::Cocktail,
            other => DrinkKind::Custom(other.to_string()),
        }
    }

    /// Derive the label for an entry from its count and breakdown
    ///
    /// Zero drinks is always `Clean`; a breakdown with exactly one category
    /// uses that category's label; more than one is `Mixed`; no breakdown
    /// falls back to the generic `custom` label.
    pub fn for_entry(drinks: u32, breakdown: Option<&BTreeMap<String, u32>>) -> Self {
        if drinks == 0 {
            return DrinkKind::Clean;
        }
        match breakdown {
            Some(map) => {
                let used: Vec<&String> = map.iter().filter(|(_, n)| **n > 0).map(|(k, _)| k).collect();
                match used.as_slice() {
                    [only] => DrinkKind::from_label(only.as_str()),
                    _ => DrinkKind::Mixed,
                }
            }
            None => DrinkKind::Custom("custom".to_string()),
        }
    }
}

impl fmt::Display for DrinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl Serialize for DrinkKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for DrinkKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(DrinkKind::from_label(&s))
    }
}

/// One day's drink record
///
/// The serialized field names (`date`, `drinks`, `type`, `note`,
/// `breakdown`) are the persisted layout of the collection; `note` and
/// `breakdown` are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkLog {
    /// Calendar date, the unique key within the collection
    pub date: NaiveDate,
    /// Total drink count for the date, 0 for a clean day
    pub drinks: u32,
    /// Category label; `clean` iff drinks == 0
    #[serde(rename = "type")]
    pub kind: DrinkKind,
    /// Optional free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Optional per-category counts; values must sum to `drinks`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, u32>>,
}

impl DrinkLog {
    /// Create a new record with validation
    ///
    /// Checks the clean/label consistency, the breakdown sum and the note
    /// length. Deserialization bypasses these checks; stored data is
    /// trusted as written.
    pub fn new(
        date: NaiveDate,
        drinks: u32,
        kind: DrinkKind,
        note: Option<String>,
        breakdown: Option<BTreeMap<String, u32>>,
    ) -> Result<Self, DomainError> {
        Self::validate_kind(drinks, &kind)?;
        Self::validate_breakdown(drinks, breakdown.as_ref())?;
        Self::validate_note(note.as_deref())?;

        Ok(Self {
            date,
            drinks,
            kind,
            note,
            breakdown,
        })
    }

    /// A zero-drink record for the given date
    pub fn clean_day(date: NaiveDate, note: Option<String>) -> Result<Self, DomainError> {
        Self::new(date, 0, DrinkKind::Clean, note, None)
    }

    /// Whether this record is a clean day
    pub fn is_clean(&self) -> bool {
        self.drinks == 0
    }

    // Validation helper methods

    /// A record is `clean` exactly when it has zero drinks
    fn validate_kind(drinks: u32, kind: &DrinkKind) -> Result<(), DomainError> {
        match (drinks, kind) {
            (0, DrinkKind::Clean) => Ok(()),
            (0, other) => Err(DomainError::InvalidKind(format!(
                "a zero-drink day must be labelled clean, got {}",
                other
            ))),
            (_, DrinkKind::Clean) => Err(DomainError::InvalidKind(
                "a clean day cannot have drinks".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Breakdown values, when present, must sum to the total drink count
    fn validate_breakdown(
        drinks: u32,
        breakdown: Option<&BTreeMap<String, u32>>,
    ) -> Result<(), DomainError> {
        if let Some(map) = breakdown {
            let sum: u32 = map.values().sum();
            if sum != drinks {
                return Err(DomainError::InvalidBreakdown(format!(
                    "breakdown sums to {} but drinks is {}",
                    sum, drinks
                )));
            }
        }
        Ok(())
    }

    fn validate_note(note: Option<&str>) -> Result<(), DomainError> {
        if let Some(text) = note {
            if text.len() > NOTE_MAX_LEN {
                return Err(DomainError::InvalidNote(format!(
                    "note cannot be longer than {} characters",
                    NOTE_MAX_LEN
                )));
            }
        }
        Ok(())
    }
}
