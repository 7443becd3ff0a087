pub mod config_cmd;
pub mod entry;
pub mod food;
pub mod goal;
pub mod history;
pub mod log;
pub mod status;

pub use config_cmd::ConfigCommand;
pub use entry::{EntryCommand, EntrySubcommand};
pub use food::{FoodCommand, FoodSubcommand};
pub use goal::GoalCommand;
pub use history::HistoryCommand;
pub use log::LogCommand;
pub use status::StatusCommand;

use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` date argument.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse()
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}
