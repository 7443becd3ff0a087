use clap::{Args, Subcommand};

use kaltrack_core::{OpError, Tracker};

use super::history::OutputFormat;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// List the foods in the reference table
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a food to the reference table
    Add {
        /// Food name (unique, case-insensitive)
        name: String,

        /// Calories per 100g
        kcal: u32,
    },

    /// Rename and/or re-price a food; logged entries follow the change
    Edit {
        /// Current food name
        name: String,

        /// New name
        #[arg(long, value_name = "NAME")]
        rename: Option<String>,

        /// New calories per 100g
        #[arg(long, value_name = "PER_100G")]
        kcal: Option<u32>,
    },

    /// Remove a food; logged entries referencing it are kept
    Delete {
        /// Food name
        name: String,
    },
}

impl FoodCommand {
    pub fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(tracker.reference_list())?);
                    }
                    OutputFormat::Text => {
                        if tracker.reference_list().is_empty() {
                            println!("No foods in the reference table yet.");
                        }
                        for item in tracker.reference_list() {
                            println!("{}", item);
                        }
                    }
                }
                Ok(())
            }
            FoodSubcommand::Add { name, kcal } => {
                tracker.add_reference_item(name, *kcal)?;
                println!("Added {} ({} kcal/100g)", name.trim(), kcal);
                Ok(())
            }
            FoodSubcommand::Edit { name, rename, kcal } => {
                let current = tracker
                    .reference_list()
                    .iter()
                    .find(|item| item.matches(name))
                    .ok_or_else(|| OpError::UnknownReference(name.clone()))?;

                let new_name = rename.clone().unwrap_or_else(|| current.name.clone());
                let new_kcal = kcal.unwrap_or(current.calories_per_100g);

                tracker.edit_reference_item(name, &new_name, new_kcal)?;
                println!("Updated {} ({} kcal/100g)", new_name.trim(), new_kcal);
                Ok(())
            }
            FoodSubcommand::Delete { name } => {
                tracker.delete_reference_item(name)?;
                println!("Deleted {} (logged entries are kept)", name);
                Ok(())
            }
        }
    }
}
