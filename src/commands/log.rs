use clap::Args;

use kaltrack_core::Tracker;

use super::parse_date;

#[derive(Args)]
pub struct LogCommand {
    /// Food name
    pub food: String,

    /// Amount eaten, in grams
    pub grams: u32,

    /// Date (YYYY-MM-DD), defaults to the last used date
    #[arg(long, short)]
    pub date: Option<String>,

    /// Calories per 100g - required when the food is not in the food list yet
    #[arg(long, value_name = "PER_100G")]
    pub kcal: Option<u32>,
}

impl LogCommand {
    pub fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        let date = self.date.as_deref().map(parse_date).transpose()?;

        let id = tracker.add_entry(&self.food, self.grams, date, self.kcal)?;
        let entry = tracker
            .entries()
            .iter()
            .find(|e| e.id == id)
            .ok_or("logged entry missing after save")?;

        println!(
            "Logged {} {}g on {} ({} kcal, id {})",
            entry.food_item, entry.amount, entry.date, entry.calories, entry.id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaltrack_core::DocumentStore;
    use tempfile::TempDir;

    fn test_tracker() -> (Tracker, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("data.json"));
        (Tracker::load(store), temp_dir)
    }

    #[test]
    fn test_log_command_adds_entry() {
        let (mut tracker, _temp) = test_tracker();
        let cmd = LogCommand {
            food: "Apple".to_string(),
            grams: 150,
            date: Some("2025-01-01".to_string()),
            kcal: Some(52),
        };

        cmd.run(&mut tracker).unwrap();

        assert_eq!(tracker.entries().len(), 1);
        assert_eq!(tracker.entries()[0].calories, 78);
        assert_eq!(tracker.reference_list().len(), 1);
    }

    #[test]
    fn test_log_command_rejects_invalid_date() {
        let (mut tracker, _temp) = test_tracker();
        let cmd = LogCommand {
            food: "Apple".to_string(),
            grams: 150,
            date: Some("01/01/2025".to_string()),
            kcal: Some(52),
        };

        assert!(cmd.run(&mut tracker).is_err());
        assert!(tracker.entries().is_empty());
    }
}
