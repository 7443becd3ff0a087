use chrono::{Days, Local, NaiveDate};
use clap::{Args, ValueEnum};
use serde_json::json;

use kaltrack_core::{
    aggregate::{daily_total, group_by_date, sorted_dates_descending},
    DisplayPolicy, Tracker,
};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Merge same-named foods into one row per day
    Combine,
    /// List raw entries, newest first
    Recent,
}

impl From<PolicyArg> for DisplayPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Combine => DisplayPolicy::CombineByName,
            PolicyArg::Recent => DisplayPolicy::RecentFirst,
        }
    }
}

#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Display policy; defaults to the configured one
    #[arg(long, short, value_enum)]
    pub policy: Option<PolicyArg>,
}

impl HistoryCommand {
    pub fn run(
        &self,
        tracker: &Tracker,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let policy = self
            .policy
            .map(DisplayPolicy::from)
            .unwrap_or_else(|| config.display_policy());

        let groups = group_by_date(tracker.entries());
        let dates = sorted_dates_descending(groups.keys().copied());

        match self.format {
            OutputFormat::Json => {
                let days: Vec<_> = dates
                    .iter()
                    .map(|date| {
                        let entries = &groups[date];
                        json!({
                            "date": date,
                            "entries": policy.apply(entries),
                            "total": daily_total(entries),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&days)?);
            }
            OutputFormat::Text => {
                if dates.is_empty() {
                    println!("No entries logged yet.");
                    return Ok(());
                }
                for date in &dates {
                    let entries = &groups[date];
                    println!("{}", format_date(*date));
                    for entry in policy.apply(entries) {
                        println!(
                            "  [{}] {} {}g - {} kcal",
                            entry.id, entry.food_item, entry.amount, entry.calories
                        );
                    }
                    println!("  Daily total: {} kcal\n", daily_total(entries));
                }
            }
        }
        Ok(())
    }
}

/// Renders a date as Today, Yesterday, or a long-form date.
pub fn format_date(date: NaiveDate) -> String {
    let today = Local::now().date_naive();
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_sub_days(Days::new(1)) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %B %-d, %Y").to_string()
    }
}
