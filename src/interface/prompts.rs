use dialoguer::{Confirm, Input, Select};

use crate::error::{MealError, Result};
use crate::models::MealSlot;

/// Prompt for a per-slot calorie target.
pub fn prompt_target(default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Calorie target for this meal")
        .default(format!("{:.0}", default))
        .interact_text()?;

    let target: f64 = input
        .trim()
        .parse()
        .map_err(|_| MealError::InvalidInput("Invalid number".to_string()))?;

    if !target.is_finite() || target <= 0.0 {
        return Err(MealError::InvalidTarget(target));
    }
    Ok(target)
}

/// Prompt for a meal slot.
pub fn prompt_slot() -> Result<MealSlot> {
    let labels: Vec<&str> = MealSlot::ALL.iter().map(MealSlot::label).collect();
    let selection = Select::new()
        .with_prompt("Which meal?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MealSlot::ALL[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
