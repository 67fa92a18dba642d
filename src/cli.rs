use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::planner::MealSlot;
use crate::search::FilterMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find recipes, plan meals and build shopping lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search recipes by ingredients, mood or cooking time
    Search {
        #[arg(short, long, value_enum, default_value_t = FilterMode::Ingredients)]
        mode: FilterMode,
        /// Only keep recipes that use nothing but the listed ingredients
        #[arg(long)]
        strict_only: bool,
        query: String,
    },
    /// Autocomplete suggestions for partial input
    Suggest {
        #[arg(short, long, value_enum, default_value_t = FilterMode::Ingredients)]
        mode: FilterMode,
        #[arg(default_value = "")]
        input: String,
    },
    /// Show the full, enriched recipe
    Show { id: String },
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Shopping(ShoppingCommand),
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Plan a recipe for a date and meal slot
    Add {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        #[arg(value_enum)]
        slot: MealSlot,
        recipe_id: String,
        /// Don't add the recipe's ingredients to the week's shopping list
        #[arg(long)]
        no_shopping: bool,
    },
    /// Remove a planned meal from a week
    Remove { week_id: String, meal_id: String },
    /// Show a week's plan (the week containing today by default)
    Show { week_id: Option<String> },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Week id such as 2026-W42
    pub week_id: String,
}

#[derive(Subcommand, Debug)]
pub enum ShoppingCommand {
    /// Build the week's shopping list from its planned meals
    Generate {
        #[command(flatten)]
        list: ListArgs,
        /// Keep recipe measures instead of converting to g/kg/ml/l
        #[arg(long)]
        raw_units: bool,
        /// Merge regional spellings of the same ingredient
        #[arg(long)]
        normalize_names: bool,
    },
    Show {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a manual item
    Add {
        #[command(flatten)]
        list: ListArgs,
        ingredient: String,
        #[arg(short, long)]
        quantity: Option<String>,
    },
    /// Tick an item off (or back on with --uncheck)
    Check {
        #[command(flatten)]
        list: ListArgs,
        item_id: String,
        #[arg(long)]
        uncheck: bool,
    },
    Remove {
        #[command(flatten)]
        list: ListArgs,
        item_id: String,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
