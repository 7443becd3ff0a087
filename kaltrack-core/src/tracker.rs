//! Mutation operations over the tracker document.
//!
//! The [`Tracker`] owns the in-memory document and its backing store. Every
//! mutation is transactional: it builds a working copy, validates input
//! before touching anything, persists the copy, and commits it in memory
//! only if the save succeeded. A failed save leaves the in-memory state
//! exactly as it was, auto-created reference items included.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::models::{Document, FoodEntry, ReferenceItem};
use crate::store::DocumentStore;

/// Errors reported by mutation operations. Input validation failures occur
/// before any state mutation; `SaveFailed` means the in-memory state was
/// rolled back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpError {
    #[error("food name cannot be empty")]
    EmptyName,
    #[error("amount must be a positive number of grams")]
    InvalidAmount,
    #[error("calories per 100g must be a positive number")]
    InvalidCalories,
    #[error("daily calorie goal must be a positive number")]
    InvalidGoal,
    #[error("'{0}' is not in the reference list; calories per 100g is required")]
    MissingCalories(String),
    #[error("'{0}' is already in the reference list")]
    DuplicateReference(String),
    #[error("no reference item named '{0}'")]
    UnknownReference(String),
    #[error("no entry with id {0}")]
    EntryNotFound(i64),
    #[error("entry references '{0}', which is no longer in the reference list")]
    OrphanedEntry(String),
    #[error("failed to save data file")]
    SaveFailed,
}

/// The in-memory domain model plus its document store.
pub struct Tracker {
    document: Document,
    store: DocumentStore,
    last_id: i64,
}

impl Tracker {
    /// Hydrates a tracker from the store. Never fails: the store falls back
    /// to a default document internally.
    pub fn load(store: DocumentStore) -> Self {
        let document = store.load();
        let last_id = document.food_entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            document,
            store,
            last_id,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.document.food_entries
    }

    pub fn reference_list(&self) -> &[ReferenceItem] {
        &self.document.reference_list
    }

    pub fn goal(&self) -> u32 {
        self.document.daily_calorie_goal
    }

    pub fn last_used_date(&self) -> NaiveDate {
        self.document.last_used_date
    }

    /// Logs a food entry. If the food is not in the reference list,
    /// `new_item_calories_per_100g` is required and a reference item is
    /// created alongside the entry. `date` defaults to the last used date.
    /// Returns the new entry's id.
    pub fn add_entry(
        &mut self,
        food_item: &str,
        amount: u32,
        date: Option<NaiveDate>,
        new_item_calories_per_100g: Option<u32>,
    ) -> Result<i64, OpError> {
        let name = food_item.trim();
        if name.is_empty() {
            return Err(OpError::EmptyName);
        }
        if amount == 0 {
            return Err(OpError::InvalidAmount);
        }

        let mut working = self.document.clone();
        let date = date.unwrap_or(working.last_used_date);

        let calories_per_100g = match working.find_reference(name).map(|i| i.calories_per_100g) {
            Some(kcal) => kcal,
            None => {
                let kcal = new_item_calories_per_100g
                    .ok_or_else(|| OpError::MissingCalories(name.to_string()))?;
                if kcal == 0 {
                    return Err(OpError::InvalidCalories);
                }
                working.reference_list.push(ReferenceItem::new(name, kcal));
                kcal
            }
        };

        let id = self.next_id();
        let calories = FoodEntry::derive_calories(amount, calories_per_100g);
        working
            .food_entries
            .push(FoodEntry::new(id, name, amount, calories, date));
        working.last_used_date = date;

        self.commit(working)?;
        self.last_id = id;
        Ok(id)
    }

    /// Removes the entry with the given id.
    pub fn delete_entry(&mut self, id: i64) -> Result<(), OpError> {
        let mut working = self.document.clone();
        let index = working
            .food_entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(OpError::EntryNotFound(id))?;
        working.food_entries.remove(index);
        self.commit(working)
    }

    /// Changes an entry's amount and recomputes its calories from the
    /// current reference list. Fails if the entry's food no longer resolves
    /// to a reference item.
    pub fn edit_entry_amount(&mut self, id: i64, new_amount: u32) -> Result<(), OpError> {
        if new_amount == 0 {
            return Err(OpError::InvalidAmount);
        }

        let mut working = self.document.clone();
        let index = working
            .food_entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(OpError::EntryNotFound(id))?;

        let food_item = working.food_entries[index].food_item.clone();
        let calories_per_100g = working
            .find_reference(&food_item)
            .map(|item| item.calories_per_100g)
            .ok_or(OpError::OrphanedEntry(food_item))?;

        let entry = &mut working.food_entries[index];
        entry.amount = new_amount;
        entry.calories = FoodEntry::derive_calories(new_amount, calories_per_100g);
        self.commit(working)
    }

    /// Adds a reference item. Names are unique case-insensitively.
    pub fn add_reference_item(&mut self, name: &str, calories_per_100g: u32) -> Result<(), OpError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OpError::EmptyName);
        }
        if calories_per_100g == 0 {
            return Err(OpError::InvalidCalories);
        }
        if self.document.find_reference(name).is_some() {
            return Err(OpError::DuplicateReference(name.to_string()));
        }

        let mut working = self.document.clone();
        working
            .reference_list
            .push(ReferenceItem::new(name, calories_per_100g));
        self.commit(working)
    }

    /// Renames and/or re-prices a reference item, cascading to every entry
    /// that matches the old name case-insensitively: the entry takes the new
    /// name and its calories are recomputed from the new density.
    pub fn edit_reference_item(
        &mut self,
        name: &str,
        new_name: &str,
        calories_per_100g: u32,
    ) -> Result<(), OpError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(OpError::EmptyName);
        }
        if calories_per_100g == 0 {
            return Err(OpError::InvalidCalories);
        }

        let mut working = self.document.clone();
        let index = working
            .reference_list
            .iter()
            .position(|item| item.matches(name))
            .ok_or_else(|| OpError::UnknownReference(name.to_string()))?;

        // A rename may only collide with the item being edited itself.
        let collision = working
            .reference_list
            .iter()
            .enumerate()
            .any(|(i, item)| i != index && item.matches(new_name));
        if collision {
            return Err(OpError::DuplicateReference(new_name.to_string()));
        }

        let old_name = working.reference_list[index].name.clone();
        working.reference_list[index] = ReferenceItem::new(new_name, calories_per_100g);

        for entry in &mut working.food_entries {
            if entry.food_item.to_lowercase() == old_name.to_lowercase() {
                entry.food_item = new_name.to_string();
                entry.calories = FoodEntry::derive_calories(entry.amount, calories_per_100g);
            }
        }
        self.commit(working)
    }

    /// Removes a reference item. Entries referencing it are left untouched
    /// and become orphaned; past records survive removal from the catalog.
    pub fn delete_reference_item(&mut self, name: &str) -> Result<(), OpError> {
        let mut working = self.document.clone();
        let index = working
            .reference_list
            .iter()
            .position(|item| item.matches(name))
            .ok_or_else(|| OpError::UnknownReference(name.to_string()))?;
        working.reference_list.remove(index);
        self.commit(working)
    }

    /// Sets the daily calorie goal.
    pub fn set_daily_goal(&mut self, value: u32) -> Result<(), OpError> {
        if value == 0 {
            return Err(OpError::InvalidGoal);
        }
        let mut working = self.document.clone();
        working.daily_calorie_goal = value;
        self.commit(working)
    }

    /// Wall-clock milliseconds, bumped past the last issued id so ids stay
    /// strictly monotonic even under rapid insertion.
    fn next_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_id + 1)
    }

    fn commit(&mut self, working: Document) -> Result<(), OpError> {
        if self.store.save(&working) {
            self.document = working;
            Ok(())
        } else {
            Err(OpError::SaveFailed)
        }
    }
}
