use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FoodEntry, ReferenceItem, DEFAULT_DAILY_GOAL};

/// The single persisted root object holding all application state.
///
/// Serialized with the historical camelCase field names so existing data
/// files stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub food_entries: Vec<FoodEntry>,
    pub reference_list: Vec<ReferenceItem>,
    pub daily_calorie_goal: u32,
    /// The last date the user logged against, used to pre-fill new entries.
    pub last_used_date: NaiveDate,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            food_entries: Vec::new(),
            reference_list: Vec::new(),
            daily_calorie_goal: DEFAULT_DAILY_GOAL,
            last_used_date: Local::now().date_naive(),
        }
    }
}

impl Document {
    /// Rebuilds a document from parsed JSON, coercing each invalid field
    /// independently to its default while preserving fields that validate.
    /// Within the collections, malformed elements are dropped individually
    /// rather than discarding the whole array.
    ///
    /// Returns the document and whether any field needed repair. A non-object
    /// root is treated as wholly invalid and replaced with the default.
    pub fn from_json_value(value: Value) -> (Self, bool) {
        let mut obj = match value {
            Value::Object(map) => map,
            _ => return (Self::default(), true),
        };
        let (food_entries, entries_repaired) = salvage_array::<FoodEntry>(obj.remove("foodEntries"));
        let (reference_list, refs_repaired) =
            salvage_array::<ReferenceItem>(obj.remove("referenceList"));
        let mut repaired = entries_repaired || refs_repaired;

        let daily_calorie_goal = match obj.remove("dailyCalorieGoal") {
            Some(Value::Number(n)) => match n.as_u64().and_then(|g| u32::try_from(g).ok()) {
                Some(g) if g > 0 => g,
                _ => {
                    repaired = true;
                    DEFAULT_DAILY_GOAL
                }
            },
            _ => {
                repaired = true;
                DEFAULT_DAILY_GOAL
            }
        };

        // Missing lastUsedDate is normal for first-generation files, not a
        // repair; only a present-but-malformed value counts as one.
        let last_used_date = match obj.remove("lastUsedDate") {
            Some(v) => serde_json::from_value(v).unwrap_or_else(|_| {
                repaired = true;
                Local::now().date_naive()
            }),
            None => Local::now().date_naive(),
        };

        (
            Self {
                food_entries,
                reference_list,
                daily_calorie_goal,
                last_used_date,
            },
            repaired,
        )
    }

    /// Re-applies the field validation rules in place. Idempotent: a second
    /// pass over an already-valid document changes nothing.
    ///
    /// With typed fields the only representable violation is a zero goal
    /// (the collections cannot be non-arrays once deserialized).
    pub fn sanitize(&mut self) -> bool {
        if self.daily_calorie_goal == 0 {
            self.daily_calorie_goal = DEFAULT_DAILY_GOAL;
            return true;
        }
        false
    }

    /// Resolves a food name against the reference list, case-insensitively.
    pub fn find_reference(&self, name: &str) -> Option<&ReferenceItem> {
        self.reference_list.iter().find(|item| item.matches(name))
    }
}

/// Coerces a collection field to a vector, keeping the elements that parse.
/// A missing or non-array value yields an empty vector; a malformed element
/// is dropped without taking its valid neighbors with it. Either case counts
/// as a repair.
fn salvage_array<T: serde::de::DeserializeOwned>(value: Option<Value>) -> (Vec<T>, bool) {
    match value {
        Some(Value::Array(items)) => {
            let total = items.len();
            let parsed: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            let repaired = parsed.len() != total;
            (parsed, repaired)
        }
        _ => (Vec::new(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert!(doc.food_entries.is_empty());
        assert!(doc.reference_list.is_empty());
        assert_eq!(doc.daily_calorie_goal, 2000);
    }

    #[test]
    fn test_from_value_valid_document_is_not_repaired() {
        let value = json!({
            "foodEntries": [
                {"id": 1, "foodItem": "Apple", "amount": 100, "calories": 52, "date": "2025-01-01"}
            ],
            "referenceList": [{"name": "Apple", "caloriesPer100g": 52}],
            "dailyCalorieGoal": 1800,
            "lastUsedDate": "2025-01-01"
        });

        let (doc, repaired) = Document::from_json_value(value);
        assert!(!repaired);
        assert_eq!(doc.food_entries.len(), 1);
        assert_eq!(doc.reference_list.len(), 1);
        assert_eq!(doc.daily_calorie_goal, 1800);
        assert_eq!(
            doc.last_used_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_from_value_repairs_wrong_typed_entries() {
        let value = json!({
            "foodEntries": "not-an-array",
            "dailyCalorieGoal": 2000,
            "referenceList": []
        });

        let (doc, repaired) = Document::from_json_value(value);
        assert!(repaired);
        assert!(doc.food_entries.is_empty());
        assert!(doc.reference_list.is_empty());
        assert_eq!(doc.daily_calorie_goal, 2000);
    }

    #[test]
    fn test_from_value_repairs_each_field_independently() {
        let value = json!({
            "foodEntries": 7,
            "referenceList": [{"name": "Rice", "caloriesPer100g": 130}],
            "dailyCalorieGoal": -50
        });

        let (doc, repaired) = Document::from_json_value(value);
        assert!(repaired);
        assert!(doc.food_entries.is_empty());
        // The valid field survives the repair of its neighbors.
        assert_eq!(doc.reference_list, vec![ReferenceItem::new("Rice", 130)]);
        assert_eq!(doc.daily_calorie_goal, 2000);
    }

    #[test]
    fn test_from_value_salvages_valid_elements() {
        let value = json!({
            "foodEntries": [
                {"id": 1, "foodItem": "Apple", "amount": 100, "calories": 52, "date": "2025-01-01"},
                {"id": "bogus"},
                {"id": 2, "foodItem": "Rice", "amount": 200, "calories": 260, "date": "2025-01-02"}
            ],
            "referenceList": [
                {"name": "Apple", "caloriesPer100g": 52},
                "garbage"
            ],
            "dailyCalorieGoal": 1800
        });

        let (doc, repaired) = Document::from_json_value(value);
        assert!(repaired);
        // Only the malformed elements are dropped.
        let ids: Vec<i64> = doc.food_entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(doc.reference_list, vec![ReferenceItem::new("Apple", 52)]);
        assert_eq!(doc.daily_calorie_goal, 1800);
    }

    #[test]
    fn test_from_value_non_object_root() {
        let (doc, repaired) = Document::from_json_value(json!([1, 2, 3]));
        assert!(repaired);
        assert!(doc.food_entries.is_empty());
        assert_eq!(doc.daily_calorie_goal, 2000);
    }

    #[test]
    fn test_from_value_zero_goal_repaired() {
        let value = json!({
            "foodEntries": [],
            "referenceList": [],
            "dailyCalorieGoal": 0
        });
        let (doc, repaired) = Document::from_json_value(value);
        assert!(repaired);
        assert_eq!(doc.daily_calorie_goal, 2000);
    }

    #[test]
    fn test_sanitize_is_noop_on_valid_document() {
        let mut doc = Document::default();
        doc.daily_calorie_goal = 1500;
        let before = doc.clone();
        assert!(!doc.sanitize());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_sanitize_repairs_zero_goal() {
        let mut doc = Document::default();
        doc.daily_calorie_goal = 0;
        assert!(doc.sanitize());
        assert_eq!(doc.daily_calorie_goal, 2000);
        // Second pass is a no-op.
        assert!(!doc.sanitize());
    }

    #[test]
    fn test_find_reference_case_insensitive() {
        let mut doc = Document::default();
        doc.reference_list.push(ReferenceItem::new("Apple", 52));
        assert!(doc.find_reference("apple").is_some());
        assert!(doc.find_reference("APPLE").is_some());
        assert!(doc.find_reference("pear").is_none());
    }

    #[test]
    fn test_document_json_roundtrip() {
        let mut doc = Document::default();
        doc.reference_list.push(ReferenceItem::new("Apple", 52));
        doc.food_entries.push(FoodEntry::new(
            1,
            "Apple",
            150,
            78,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
