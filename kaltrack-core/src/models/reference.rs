use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference item is a named food with a fixed calorie density, used as a
/// lookup table when logging entries. Names are unique case-insensitively
/// within the reference list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub name: String,
    pub calories_per_100g: u32,
}

impl ReferenceItem {
    pub fn new(name: impl Into<String>, calories_per_100g: u32) -> Self {
        Self {
            name: name.into(),
            calories_per_100g,
        }
    }

    /// Case-insensitive name comparison, the matching rule used everywhere a
    /// food name is resolved against the reference list.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for ReferenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} kcal/100g)", self.name, self.calories_per_100g)
    }
}
