//! Derived views over the entry collection: per-day grouping, calorie
//! totals, and the per-date display transforms.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::FoodEntry;

/// Partitions entries by date, preserving each entry's relative order
/// within its date.
pub fn group_by_date(entries: &[FoodEntry]) -> BTreeMap<NaiveDate, Vec<FoodEntry>> {
    let mut groups: BTreeMap<NaiveDate, Vec<FoodEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.date).or_default().push(entry.clone());
    }
    groups
}

/// Sum of calories over the given entries.
pub fn daily_total(entries: &[FoodEntry]) -> u32 {
    entries.iter().map(|entry| entry.calories).sum()
}

/// Merges entries whose food name matches case-insensitively by summing
/// amounts and calories. The first occurrence keeps its id, name, and date.
///
/// Intended for a single date's entries, though it does not require it.
pub fn combine_same_item(entries: &[FoodEntry]) -> Vec<FoodEntry> {
    let mut combined: Vec<FoodEntry> = Vec::new();
    for entry in entries {
        let key = entry.food_item.to_lowercase();
        match combined
            .iter_mut()
            .find(|e| e.food_item.to_lowercase() == key)
        {
            Some(existing) => {
                existing.amount += entry.amount;
                existing.calories += entry.calories;
            }
            None => combined.push(entry.clone()),
        }
    }
    combined
}

/// Date keys sorted most recent first. `YYYY-MM-DD` sorts lexicographically
/// equal to chronologically, so this matches the historical string sort.
pub fn sorted_dates_descending<I>(dates: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = dates.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

/// Goal minus consumed. Negative means over goal, which is a valid signal,
/// not an error.
pub fn remaining_calories(goal: u32, consumed: u32) -> i64 {
    i64::from(goal) - i64::from(consumed)
}

/// Per-date display transform applied before rendering a date's entries.
///
/// The two historical UI variants diverged here: one combined same-named
/// foods, the other listed raw entries newest first. Both are legitimate
/// display policies, so the choice belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPolicy {
    /// Merge same-named foods into one row per food.
    #[default]
    CombineByName,
    /// Raw entries sorted by id descending (newest first).
    RecentFirst,
}

impl DisplayPolicy {
    pub fn apply(&self, entries: &[FoodEntry]) -> Vec<FoodEntry> {
        match self {
            DisplayPolicy::CombineByName => combine_same_item(entries),
            DisplayPolicy::RecentFirst => {
                let mut sorted = entries.to_vec();
                sorted.sort_by(|a, b| b.id.cmp(&a.id));
                sorted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(id: i64, food: &str, amount: u32, calories: u32, d: &str) -> FoodEntry {
        FoodEntry::new(id, food, amount, calories, date(d))
    }

    #[test]
    fn test_group_by_date_partitions() {
        let entries = vec![
            entry(1, "Apple", 100, 52, "2025-01-01"),
            entry(2, "Rice", 200, 260, "2025-01-02"),
            entry(3, "Pear", 100, 57, "2025-01-01"),
            entry(4, "Oats", 50, 195, "2025-01-03"),
        ];

        let groups = group_by_date(&entries);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&date("2025-01-01")].len(), 2);
        assert_eq!(groups[&date("2025-01-02")].len(), 1);
        assert_eq!(groups[&date("2025-01-03")].len(), 1);
    }

    #[test]
    fn test_group_by_date_preserves_relative_order() {
        let entries = vec![
            entry(10, "Apple", 100, 52, "2025-01-01"),
            entry(11, "Rice", 200, 260, "2025-01-02"),
            entry(12, "Pear", 100, 57, "2025-01-01"),
        ];

        let groups = group_by_date(&entries);
        let ids: Vec<i64> = groups[&date("2025-01-01")].iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 12]);
    }

    #[test]
    fn test_daily_total_sums_group_calories() {
        let entries = vec![
            entry(1, "Apple", 100, 52, "2025-01-01"),
            entry(2, "Pear", 100, 57, "2025-01-01"),
            entry(3, "Rice", 200, 260, "2025-01-02"),
        ];

        let groups = group_by_date(&entries);
        assert_eq!(daily_total(&groups[&date("2025-01-01")]), 109);
        assert_eq!(daily_total(&groups[&date("2025-01-02")]), 260);
        assert_eq!(daily_total(&[]), 0);
    }

    #[test]
    fn test_combine_same_item_merges_case_insensitively() {
        let entries = vec![
            entry(1, "Apple", 100, 52, "2025-01-01"),
            entry(2, "Rice", 200, 260, "2025-01-01"),
            entry(3, "apple", 50, 26, "2025-01-01"),
        ];

        let combined = combine_same_item(&entries);
        assert_eq!(combined.len(), 2);
        // First occurrence keeps its identity; amounts and calories are summed.
        assert_eq!(combined[0].id, 1);
        assert_eq!(combined[0].food_item, "Apple");
        assert_eq!(combined[0].amount, 150);
        assert_eq!(combined[0].calories, 78);
        assert_eq!(combined[1].food_item, "Rice");
    }

    #[test]
    fn test_sorted_dates_descending() {
        let dates = vec![date("2025-01-01"), date("2025-03-15"), date("2025-01-02")];
        assert_eq!(
            sorted_dates_descending(dates),
            vec![date("2025-03-15"), date("2025-01-02"), date("2025-01-01")]
        );
    }

    #[test]
    fn test_remaining_calories_can_be_negative() {
        assert_eq!(remaining_calories(2000, 2600), -600);
        assert_eq!(remaining_calories(2000, 1500), 500);
        assert_eq!(remaining_calories(2000, 2000), 0);
    }

    #[test]
    fn test_display_policy_combine() {
        let entries = vec![
            entry(1, "Apple", 100, 52, "2025-01-01"),
            entry(2, "apple", 100, 52, "2025-01-01"),
        ];
        let rows = DisplayPolicy::CombineByName.apply(&entries);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 200);
    }

    #[test]
    fn test_display_policy_recent_first() {
        let entries = vec![
            entry(1, "Apple", 100, 52, "2025-01-01"),
            entry(3, "Pear", 100, 57, "2025-01-01"),
            entry(2, "Rice", 200, 260, "2025-01-01"),
        ];
        let rows = DisplayPolicy::RecentFirst.apply(&entries);
        let ids: Vec<i64> = rows.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        // No merging under this policy.
        assert_eq!(rows.len(), 3);
    }
}
