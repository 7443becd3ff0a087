use clap::Args;

use kaltrack_core::Tracker;

#[derive(Args)]
pub struct GoalCommand {
    /// New daily calorie goal; omit to show the current one
    pub value: Option<u32>,
}

impl GoalCommand {
    pub fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match self.value {
            Some(value) => {
                tracker.set_daily_goal(value)?;
                println!("Daily calorie goal set to {}", value);
            }
            None => {
                println!("Daily calorie goal: {}", tracker.goal());
            }
        }
        Ok(())
    }
}
