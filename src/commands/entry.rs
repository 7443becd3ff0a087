use clap::{Args, Subcommand};

use kaltrack_core::Tracker;

#[derive(Args)]
pub struct EntryCommand {
    #[command(subcommand)]
    pub command: EntrySubcommand,
}

#[derive(Subcommand)]
pub enum EntrySubcommand {
    /// Delete a logged entry by id
    Delete {
        /// Entry id (shown by `kal history` and `kal log`)
        id: i64,
    },

    /// Change a logged entry's amount; calories are recomputed
    Edit {
        /// Entry id
        id: i64,

        /// New amount in grams
        grams: u32,
    },
}

impl EntryCommand {
    pub fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            EntrySubcommand::Delete { id } => {
                tracker.delete_entry(*id)?;
                println!("Deleted entry {}", id);
                Ok(())
            }
            EntrySubcommand::Edit { id, grams } => {
                tracker.edit_entry_amount(*id, *grams)?;
                let entry = tracker
                    .entries()
                    .iter()
                    .find(|e| e.id == *id)
                    .ok_or("edited entry missing after save")?;
                println!(
                    "Updated entry {}: {} {}g ({} kcal)",
                    entry.id, entry.food_item, entry.amount, entry.calories
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kaltrack_core::DocumentStore;
    use tempfile::TempDir;

    fn tracker_with_entry() -> (Tracker, i64, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("data.json"));
        let mut tracker = Tracker::load(store);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let id = tracker.add_entry("Apple", 100, Some(date), Some(52)).unwrap();
        (tracker, id, temp_dir)
    }

    #[test]
    fn test_edit_command_updates_amount_and_calories() {
        let (mut tracker, id, _temp) = tracker_with_entry();
        let cmd = EntryCommand {
            command: EntrySubcommand::Edit { id, grams: 200 },
        };

        cmd.run(&mut tracker).unwrap();

        assert_eq!(tracker.entries()[0].amount, 200);
        assert_eq!(tracker.entries()[0].calories, 104);
    }

    #[test]
    fn test_delete_command_removes_entry() {
        let (mut tracker, id, _temp) = tracker_with_entry();
        let cmd = EntryCommand {
            command: EntrySubcommand::Delete { id },
        };

        cmd.run(&mut tracker).unwrap();
        assert!(tracker.entries().is_empty());

        // A second delete reports the missing id.
        assert!(cmd.run(&mut tracker).is_err());
    }
}
