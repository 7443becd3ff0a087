//! kaltrack core library
//!
//! The data layer of the calorie tracker: the persisted document and its
//! invariants, the crash-safe document store, the aggregation engine, and
//! the mutation operations. Presentation layers (CLI, GUI) are external
//! collaborators that hydrate a [`Tracker`] and render its derived views.

pub mod aggregate;
pub mod models;
pub mod store;
pub mod tracker;

pub use aggregate::{
    combine_same_item, daily_total, group_by_date, remaining_calories, sorted_dates_descending,
    DisplayPolicy,
};
pub use models::{Document, FoodEntry, ReferenceItem, DEFAULT_DAILY_GOAL};
pub use store::{DocumentStore, StorageError};
pub use tracker::{OpError, Tracker};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
