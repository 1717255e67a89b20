use std::path::Path;

use clap::Parser;
use tracing::info;

use calorie_mate_rs::cli::{Cli, Command, SelectionArgs};
use calorie_mate_rs::error::{MealError, Result};
use calorie_mate_rs::interface::{
    day_plan_json, display_day_plan, display_regions, display_slot_plan, prompt_slot,
    prompt_target, prompt_yes_no, slot_plan_json,
};
use calorie_mate_rs::logging::init_tracing;
use calorie_mate_rs::models::MealSlot;
use calorie_mate_rs::planner::{SelectionMode, plan_day, plan_slot, slot_target};
use calorie_mate_rs::settings::Settings;
use calorie_mate_rs::state::{CatalogManager, load_catalog, load_cursors, save_cursors};

/// Default per-slot target offered by the interactive prompt.
const BROWSE_DEFAULT_TARGET: f64 = 500.0;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.take().unwrap_or_default() {
        Command::Regions => cmd_regions(&cli),
        Command::Suggest {
            region,
            slot,
            target,
            daily,
            selection,
        } => cmd_suggest(&cli, &region, slot, target, daily, &selection),
        Command::Plan {
            region,
            daily,
            selection,
        } => cmd_plan(&cli, &region, daily, &selection),
        Command::Browse {
            region,
            slot,
            target,
            selection,
        } => cmd_browse(&cli, &region, slot, target, &selection),
        Command::ResetCursors { user } => cmd_reset_cursors(&cli, &user),
    }
}

/// Load the catalog, or explain what is missing and return `None`.
fn open_catalog(path: &Path) -> Result<Option<CatalogManager>> {
    if !path.exists() {
        eprintln!("Catalog file not found: {}", path.display());
        eprintln!("Pass --catalog <path> or place meals.json in the current directory.");
        return Ok(None);
    }
    Ok(Some(load_catalog(path)?))
}

fn load_settings(cli: &Cli, selection: &SelectionArgs) -> Result<Settings> {
    Settings::load(&cli.settings)?.with_overrides(selection.tolerance, selection.max_quantity)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// List regions and how many dishes each slot holds.
fn cmd_regions(cli: &Cli) -> Result<()> {
    let Some(catalog) = open_catalog(&cli.catalog)? else {
        return Ok(());
    };
    display_regions(&catalog);
    Ok(())
}

/// Suggest combinations for one slot and advance its cursor.
fn cmd_suggest(
    cli: &Cli,
    region: &str,
    slot: MealSlot,
    target: Option<f64>,
    daily: Option<f64>,
    selection: &SelectionArgs,
) -> Result<()> {
    let settings = load_settings(cli, selection)?;
    let Some(catalog) = open_catalog(&cli.catalog)? else {
        return Ok(());
    };

    let target = match (target, daily) {
        (Some(target), _) => target,
        (None, Some(daily)) => match slot_target(&settings, slot, daily)? {
            Some(target) => target,
            None => {
                println!("{} has no share of the daily target; nothing to suggest.", slot.label());
                return Ok(());
            }
        },
        (None, None) => {
            return Err(MealError::InvalidInput(
                "either --target or --daily is required".to_string(),
            ));
        }
    };

    let region = catalog.resolve_region(region)?.to_string();
    let slice = catalog.slice(&region, slot)?;
    let mut cursors = load_cursors(&cli.cursors)?;
    let cursor = cursors.get(&selection.user, &region, slot);
    let mode = selection.mode().for_slot(slot);

    let plan = plan_slot(slice, slot, target, &settings, &cursor, &mode)?;
    cursors.set(&selection.user, &region, slot, plan.next_cursor.clone());
    save_cursors(&cli.cursors, &cursors)?;

    if selection.json {
        print_json(&slot_plan_json(&plan))
    } else {
        println!("Region: {}", region);
        display_slot_plan(&plan);
        Ok(())
    }
}

/// Suggest combinations for every slot of the day.
fn cmd_plan(cli: &Cli, region: &str, daily: f64, selection: &SelectionArgs) -> Result<()> {
    let settings = load_settings(cli, selection)?;
    let Some(catalog) = open_catalog(&cli.catalog)? else {
        return Ok(());
    };

    let mut cursors = load_cursors(&cli.cursors)?;
    let plan = plan_day(
        &catalog,
        region,
        daily,
        &settings,
        &selection.user,
        &mut cursors,
        &selection.mode(),
    )?;
    save_cursors(&cli.cursors, &cursors)?;

    if selection.json {
        print_json(&day_plan_json(&plan))
    } else {
        display_day_plan(&plan);
        Ok(())
    }
}

/// Show one slot, then shuffle for as long as the user asks.
fn cmd_browse(
    cli: &Cli,
    region: &str,
    slot: Option<MealSlot>,
    target: Option<f64>,
    selection: &SelectionArgs,
) -> Result<()> {
    let settings = load_settings(cli, selection)?;
    let Some(catalog) = open_catalog(&cli.catalog)? else {
        return Ok(());
    };

    let region = catalog.resolve_region(region)?.to_string();
    let slot = match slot {
        Some(slot) => slot,
        None => prompt_slot()?,
    };
    let target = match target {
        Some(target) => target,
        None => prompt_target(BROWSE_DEFAULT_TARGET)?,
    };

    let slice = catalog.slice(&region, slot)?;
    let mut cursors = load_cursors(&cli.cursors)?;
    let mut cursor = cursors.get(&selection.user, &region, slot);
    let mut mode = selection.mode().for_slot(slot);
    let mut shown = 0;

    loop {
        let plan = plan_slot(slice, slot, target, &settings, &cursor, &mode)?;
        display_slot_plan(&plan);
        cursor = plan.next_cursor;
        shown += 1;

        if plan.candidates < 2 {
            println!("Nothing else to shuffle to.");
            break;
        }
        if !prompt_yes_no("Shuffle again?", true)? {
            break;
        }
        mode = SelectionMode::Shuffle;
    }

    cursors.set(&selection.user, &region, slot, cursor);
    save_cursors(&cli.cursors, &cursors)?;
    info!(shown, "browse finished");
    Ok(())
}

/// Drop a user's saved cursors.
fn cmd_reset_cursors(cli: &Cli, user: &str) -> Result<()> {
    let mut cursors = load_cursors(&cli.cursors)?;
    let removed = cursors.clear_user(user);
    save_cursors(&cli.cursors, &cursors)?;
    println!("Removed {} saved cursors for {}.", removed, user);
    Ok(())
}
