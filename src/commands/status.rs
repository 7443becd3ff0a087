use chrono::Local;
use clap::Args;

use kaltrack_core::{aggregate::daily_total, remaining_calories, Tracker};

#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub fn run(&self, tracker: &Tracker) -> Result<(), Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        let todays: Vec<_> = tracker
            .entries()
            .iter()
            .filter(|e| e.date == today)
            .cloned()
            .collect();

        let consumed = daily_total(&todays);
        let goal = tracker.goal();
        let remaining = remaining_calories(goal, consumed);

        println!("Today ({})", today);
        println!("  Consumed: {} kcal", consumed);
        println!("  Goal:     {} kcal", goal);
        if remaining < 0 {
            println!("  Over by:  {} kcal", -remaining);
        } else {
            println!("  Remaining: {} kcal", remaining);
        }
        Ok(())
    }
}
