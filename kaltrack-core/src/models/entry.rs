use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A food entry is one logged consumption record: what was eaten, how much,
/// and the calories derived from the reference list at logging time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Millisecond-timestamp-derived id, unique within the document.
    pub id: i64,
    /// Name of the food, matching a reference item case-insensitively at
    /// creation time. May become orphaned if the reference item is deleted.
    pub food_item: String,
    /// Amount eaten, in grams.
    pub amount: u32,
    /// Derived calories: round(amount * calories_per_100g / 100).
    pub calories: u32,
    pub date: NaiveDate,
}

impl FoodEntry {
    pub fn new(
        id: i64,
        food_item: impl Into<String>,
        amount: u32,
        calories: u32,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            food_item: food_item.into(),
            amount,
            calories,
            date,
        }
    }

    /// Calories for `amount` grams of a food with the given density,
    /// rounded half-up to the nearest whole calorie.
    pub fn derive_calories(amount: u32, calories_per_100g: u32) -> u32 {
        let total = u64::from(amount) * u64::from(calories_per_100g);
        ((total + 50) / 100) as u32
    }
}

impl fmt::Display for FoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {}g ({} kcal)",
            self.date, self.food_item, self.amount, self.calories
        )
    }
}
