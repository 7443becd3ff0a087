mod document;
mod entry;
mod reference;

pub use document::Document;
pub use entry::FoodEntry;
pub use reference::ReferenceItem;

/// Default daily calorie goal used whenever the stored value is missing or invalid.
pub const DEFAULT_DAILY_GOAL: u32 = 2000;
