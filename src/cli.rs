use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::models::MealSlot;
use crate::planner::{SelectionMode, daily_seed_key};

/// CalorieMate: meal combinations matched to your calorie target.
#[derive(Parser, Debug)]
#[command(name = "calorie_mate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the dish catalog (JSON, or CSV by extension).
    #[arg(short, long, default_value = "meals.json", global = true)]
    pub catalog: PathBuf,

    /// Path to the optional settings JSON file.
    #[arg(long, default_value = "calorie_mate.json", global = true)]
    pub settings: PathBuf,

    /// Path to the selection cursor state file.
    #[arg(long, default_value = "cursors.json", global = true)]
    pub cursors: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Options shared by every command that picks suggestions.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// User id for cursor tracking and the daily seed.
    #[arg(short, long, default_value = "local")]
    pub user: String,

    /// Shuffle instead of showing the stable daily pick.
    #[arg(long)]
    pub shuffle: bool,

    /// Day for the daily pick (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Tolerance band around the target (fraction, e.g. 0.15).
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Largest per-dish quantity to search.
    #[arg(long)]
    pub max_quantity: Option<u32>,

    /// Print JSON instead of formatted text.
    #[arg(long)]
    pub json: bool,
}

impl SelectionArgs {
    pub fn mode(&self) -> SelectionMode {
        if self.shuffle {
            SelectionMode::Shuffle
        } else {
            let date = self.date.unwrap_or_else(|| Local::now().date_naive());
            SelectionMode::daily(daily_seed_key(&self.user, date))
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog regions and dish counts.
    Regions,

    /// Suggest combinations for one meal slot.
    Suggest {
        /// Region name (e.g. "South India" or "south").
        #[arg(short, long)]
        region: String,

        /// Meal slot: breakfast, lunch, snacks or dinner.
        #[arg(short, long)]
        slot: MealSlot,

        /// Calorie target for this slot.
        #[arg(short, long, conflicts_with = "daily", required_unless_present = "daily")]
        target: Option<f64>,

        /// Daily calorie target; the slot's share is used as the target.
        #[arg(short, long)]
        daily: Option<f64>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Suggest combinations for every slot of a day.
    Plan {
        /// Region name.
        #[arg(short, long)]
        region: String,

        /// Daily calorie target.
        #[arg(short, long)]
        daily: f64,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Browse one slot interactively, shuffling on request.
    Browse {
        /// Region name.
        #[arg(short, long)]
        region: String,

        /// Meal slot; prompted for when omitted.
        #[arg(short, long)]
        slot: Option<MealSlot>,

        /// Calorie target; prompted for when omitted.
        #[arg(short, long)]
        target: Option<f64>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Forget a user's shuffle history.
    ResetCursors {
        /// User whose cursors are removed.
        #[arg(short, long, default_value = "local")]
        user: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Regions
    }
}
